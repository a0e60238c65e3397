//! Data ranges and chart domains.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Compute the extent of the finite values in an iterator.
    ///
    /// Returns `None` when no finite value is present.
    pub fn extent<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut range: Option<Self> = None;
        for value in values.into_iter().filter(|value| value.is_finite()) {
            match range.as_mut() {
                None => range = Some(Self::new(value, value)),
                Some(existing) => existing.expand_to_include(value),
            }
        }
        range
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }

    /// Add padding around the range as a fraction of its span.
    pub fn padded(&self, frac: f64) -> Self {
        let padding = self.span().abs() * frac;
        Self {
            min: self.min - padding,
            max: self.max + padding,
        }
    }
}

/// Data domains on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// X axis range.
    pub x: Range,
    /// Y axis range.
    pub y: Range,
}

impl Viewport {
    /// Create a viewport from X and Y ranges.
    pub fn new(x: Range, y: Range) -> Self {
        Self { x, y }
    }

    /// Check whether both axes are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_skips_non_finite_values() {
        let range = Range::extent([3.0, f64::NAN, -1.0, f64::INFINITY, 7.5]).expect("extent");
        assert_eq!(range, Range::new(-1.0, 7.5));
    }

    #[test]
    fn extent_of_empty_input_is_none() {
        assert!(Range::extent(std::iter::empty()).is_none());
    }

    #[test]
    fn padded_grows_by_fraction_of_span() {
        let range = Range::new(10.0, 20.0).padded(0.1);
        assert!((range.min - 9.0).abs() < 1e-12);
        assert!((range.max - 21.0).abs() < 1e-12);
    }
}
