//! Linear scales with "nice" domains and tick generation.
//!
//! Tick steps are always 1, 2 or 5 times a power of ten. Negative powers are
//! handled through their reciprocal so that values such as `0.1` are produced
//! exactly instead of accumulating floating point error.

use crate::view::Range;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

const MAX_NICE_ITERATIONS: usize = 10;

/// Linear mapping from a data domain onto a pixel range.
///
/// The range may be inverted (for example `(height, 0)` for a Y axis).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: Range,
    range: (f64, f64),
}

impl LinearScale {
    /// Create a scale for the given domain and output range.
    pub fn new(domain: Range, range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Access the domain.
    pub fn domain(&self) -> Range {
        self.domain
    }

    /// Access the output range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value into the output range.
    ///
    /// A zero-width domain maps every value to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        let span = self.domain.span();
        if span == 0.0 || !span.is_finite() {
            return (r0 + r1) * 0.5;
        }
        r0 + (value - self.domain.min) / span * (r1 - r0)
    }

    /// Map an output value back into the domain.
    pub fn invert(&self, value: f64) -> f64 {
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return self.domain.min;
        }
        self.domain.min + (value - r0) / span * self.domain.span()
    }

    /// Extend the domain so both ends land on round tick values.
    pub fn nice(mut self, count: usize) -> Self {
        self.domain = nice_range(self.domain, count);
        self
    }

    /// Tick values inside the domain, in ascending order.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks(self.domain.min, self.domain.max, count)
    }

    /// Tick spacing for the given tick count, always positive.
    pub fn tick_step(&self, count: usize) -> f64 {
        tick_step(self.domain.min, self.domain.max, count)
    }
}

/// Extend a range to nice boundaries for the given tick count.
pub fn nice_range(range: Range, count: usize) -> Range {
    let mut start = range.min;
    let mut stop = range.max;
    let mut previous: Option<f64> = None;
    for _ in 0..MAX_NICE_ITERATIONS {
        let step = tick_increment(start, stop, count);
        if previous == Some(step) {
            break;
        }
        if step > 0.0 {
            start = (start / step).floor() * step;
            stop = (stop / step).ceil() * step;
        } else if step < 0.0 {
            start = (start * step).ceil() / step;
            stop = (stop * step).floor() / step;
        } else {
            break;
        }
        previous = Some(step);
    }
    Range::new(start, stop)
}

/// Generate tick values between `start` and `stop` (inclusive).
///
/// Ticks are returned in the direction of the input: descending when
/// `stop < start`.
pub fn ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let Some(spec) = tick_spec(lo, hi, count as f64) else {
        return Vec::new();
    };
    if spec.i2 < spec.i1 {
        return Vec::new();
    }
    let n = (spec.i2 - spec.i1) as usize + 1;
    let value = |i: f64| {
        if spec.inc < 0.0 {
            i / -spec.inc
        } else {
            i * spec.inc
        }
    };
    let mut out = Vec::with_capacity(n);
    for offset in 0..n {
        let i = if reverse {
            spec.i2 - offset as f64
        } else {
            spec.i1 + offset as f64
        };
        out.push(value(i));
    }
    out
}

/// Signed tick increment; negative values encode the reciprocal of a
/// sub-unit step.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    tick_spec(start, stop, count as f64).map_or(0.0, |spec| spec.inc)
}

/// Positive tick spacing between `start` and `stop`.
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let (lo, hi) = if stop < start {
        (stop, start)
    } else {
        (start, stop)
    };
    let inc = tick_increment(lo, hi, count);
    if inc < 0.0 { 1.0 / -inc } else { inc }
}

#[derive(Debug, Clone, Copy)]
struct TickSpec {
    i1: f64,
    i2: f64,
    inc: f64,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    let step = (stop - start) / count.max(0.0);
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let power = step.log10().floor();
    let error = step / 10_f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };
    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scale = 10_f64.powf(-power) / factor;
        i1 = (start * scale).round();
        i2 = (stop * scale).round();
        if i1 / scale < start {
            i1 += 1.0;
        }
        if i2 / scale > stop {
            i2 -= 1.0;
        }
        inc = -scale;
    } else {
        let step = 10_f64.powf(power) * factor;
        i1 = (start / step).round();
        i2 = (stop / step).round();
        if i1 * step < start {
            i1 += 1.0;
        }
        if i2 * step > stop {
            i2 -= 1.0;
        }
        inc = step;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    Some(TickSpec { i1, i2, inc })
}

/// Number of decimals needed to tell ticks of the given step apart.
pub fn precision_for_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let exponent = step.abs().log10().floor();
    if exponent >= 0.0 {
        0
    } else {
        (-exponent) as usize
    }
}

/// Format a number with a fixed precision and comma thousands separators.
pub fn format_grouped(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };
    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (index, ch) in int_part.chars().enumerate() {
        if index > 0 && (int_part.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    let is_zero = formatted.chars().all(|ch| ch == '0' || ch == '.');
    if value < 0.0 && !is_zero {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn map_and_invert_roundtrip() {
        let scale = LinearScale::new(Range::new(0.0, 50.0), (400.0, 0.0));
        assert_close(scale.map(0.0), 400.0);
        assert_close(scale.map(50.0), 0.0);
        assert_close(scale.map(25.0), 200.0);
        assert_close(scale.invert(scale.map(12.5)), 12.5);
    }

    #[test]
    fn degenerate_domain_maps_to_middle() {
        let scale = LinearScale::new(Range::new(3.0, 3.0), (0.0, 100.0));
        assert_close(scale.map(3.0), 50.0);
        assert_close(scale.map(10.0), 50.0);
    }

    #[test]
    fn ticks_use_round_steps() {
        assert_eq!(ticks(0.0, 10.0, 10), (0..=10).map(f64::from).collect::<Vec<_>>());
        assert_eq!(ticks(0.0, 97.0, 5), vec![0.0, 20.0, 40.0, 60.0, 80.0]);
        assert_eq!(ticks(0.0, 1.0, 5), vec![0.0, 0.2, 0.4, 0.6, 0.8, 1.0]);
    }

    #[test]
    fn ticks_follow_reversed_input() {
        assert_eq!(ticks(10.0, 0.0, 2), vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn ticks_of_point_domain() {
        assert_eq!(ticks(4.0, 4.0, 10), vec![4.0]);
        assert!(ticks(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn nice_extends_to_tick_boundaries() {
        let range = nice_range(Range::new(0.0, 97.3), 10);
        assert_eq!(range, Range::new(0.0, 100.0));
        let range = nice_range(Range::new(1.3, 8.7), 5);
        assert_eq!(range, Range::new(0.0, 10.0));
        let range = nice_range(Range::new(0.012, 0.987), 10);
        assert_close(range.min, 0.0);
        assert_close(range.max, 1.0);
    }

    #[test]
    fn nice_domain_contains_original() {
        for (lo, hi) in [(-3.7, 12.2), (87.1, 143.9), (0.0031, 0.0047)] {
            let range = nice_range(Range::new(lo, hi), 10);
            assert!(range.min <= lo && range.max >= hi);
        }
    }

    #[test]
    fn tick_step_is_positive_for_fractions() {
        assert_close(tick_step(0.0, 1.0, 10), 0.1);
        assert_close(tick_step(0.0, 100.0, 10), 10.0);
    }

    #[test]
    fn precision_matches_step() {
        assert_eq!(precision_for_step(10.0), 0);
        assert_eq!(precision_for_step(0.5), 1);
        assert_eq!(precision_for_step(0.02), 2);
    }

    #[test]
    fn grouped_formatting() {
        assert_eq!(format_grouped(1234567.0, 0), "1,234,567");
        assert_eq!(format_grouped(-1234.5, 1), "-1,234.5");
        assert_eq!(format_grouped(999.0, 0), "999");
        assert_eq!(format_grouped(-0.0001, 2), "0.00");
    }
}
