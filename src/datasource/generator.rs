use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::Rng;
use serde::Deserialize;

use crate::config::MAX_NUMBER_OF_DAYS;
use crate::geom::Point;
use crate::style::SERIES_PALETTE;

use super::{DataPoint, DatedSeries};

/// Parameters of the synthetic price series.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// First day of the series; defaults to `number_of_days` before today.
    pub start_date: Option<NaiveDate>,
    /// Number of calendar days covered, including skipped weekends.
    pub number_of_days: u32,
    /// Starting value.
    pub initial_value: f64,
    /// Relative size of the daily random walk.
    pub volatility: f64,
    /// Relative daily drift.
    pub trend: f64,
    /// Amplitude of the slow sine component.
    pub seasonality: f64,
    /// Emit Saturdays and Sundays.
    pub has_weekends: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            start_date: None,
            number_of_days: 90,
            initial_value: 100.0,
            volatility: 0.02,
            trend: 0.0002,
            seasonality: 5.0,
            has_weekends: false,
        }
    }
}

impl GeneratorOptions {
    fn start(&self, today: NaiveDate) -> NaiveDate {
        self.start_date.unwrap_or_else(|| {
            today
                .checked_sub_signed(Duration::days(i64::from(self.number_of_days)))
                .unwrap_or(NaiveDate::MIN)
        })
    }
}

/// Generate a random walk with drift, seasonality and noise.
///
/// Weekend days are skipped unless `has_weekends` is set; they still count
/// towards `number_of_days`. Values never drop below zero and are rounded to
/// two decimals. The series ends early if it would run past the last date
/// chrono can represent.
pub fn generate_financial_data<R: Rng + ?Sized>(
    options: &GeneratorOptions,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<DataPoint> {
    let start = options.start(today);
    let mut current = options.initial_value;
    let mut out = Vec::with_capacity(options.number_of_days.min(MAX_NUMBER_OF_DAYS) as usize);
    for day in 0..options.number_of_days {
        let Some(date) = start.checked_add_signed(Duration::days(i64::from(day))) else {
            break;
        };
        if !options.has_weekends && matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        let random_walk = (rng.r#gen::<f64>() - 0.5) * 2.0 * options.volatility * current;
        let drift = current * options.trend;
        let seasonal = (f64::from(day) / 10.0).sin() * options.seasonality;
        let noise = (rng.r#gen::<f64>() - 0.5) * options.volatility * 0.5;
        current = (current + random_walk + drift + seasonal + noise).max(0.0);
        out.push(DataPoint::new(date, (current * 100.0).round() / 100.0));
    }
    out
}

/// Generate `count` independent series named `Series 1..=count`.
///
/// Each series perturbs the starting value, volatility and trend of `base`.
pub fn generate_multiple_series<R: Rng + ?Sized>(
    count: usize,
    base: &GeneratorOptions,
    today: NaiveDate,
    rng: &mut R,
) -> Vec<DatedSeries> {
    (0..count)
        .map(|index| {
            let options = GeneratorOptions {
                initial_value: 100.0 + rng.r#gen::<f64>() * 50.0,
                volatility: 0.02 + rng.r#gen::<f64>() * 0.01,
                trend: 0.0002 + (rng.r#gen::<f64>() - 0.5) * 0.0004,
                ..base.clone()
            };
            DatedSeries {
                name: format!("Series {}", index + 1),
                color: SERIES_PALETTE[index % SERIES_PALETTE.len()],
                points: generate_financial_data(&options, today, rng),
            }
        })
        .collect()
}

/// The canned data sets used by the dated demos.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleData {
    /// Moderate growth.
    pub basic: Vec<DataPoint>,
    /// Strong upward trend.
    pub bullish: Vec<DataPoint>,
    /// Large swings without drift.
    pub volatile: Vec<DataPoint>,
    /// Three independent series.
    pub multiple: Vec<DatedSeries>,
}

impl ExampleData {
    /// Generate every data set from the same base options.
    pub fn generate<R: Rng + ?Sized>(base: &GeneratorOptions, today: NaiveDate, rng: &mut R) -> Self {
        let variant = |volatility: f64, trend: f64, seasonality: f64| GeneratorOptions {
            number_of_days: 90,
            initial_value: 100.0,
            volatility,
            trend,
            seasonality,
            ..base.clone()
        };
        Self {
            basic: generate_financial_data(&variant(0.015, 0.0003, 3.0), today, rng),
            bullish: generate_financial_data(&variant(0.02, 0.001, 2.0), today, rng),
            volatile: generate_financial_data(&variant(0.04, 0.0, 8.0), today, rng),
            multiple: generate_multiple_series(
                3,
                &GeneratorOptions {
                    number_of_days: 90,
                    has_weekends: false,
                    ..base.clone()
                },
                today,
                rng,
            ),
        }
    }
}

/// `count` points at `x = 0..count` with integer values in `[min, max]`.
pub fn random_integer_points<R: Rng + ?Sized>(
    count: usize,
    min: i64,
    max: i64,
    rng: &mut R,
) -> Vec<Point> {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    (0..count)
        .map(|index| Point::new(index as f64, rng.gen_range(lo..=hi) as f64))
        .collect()
}

/// `count` points at `x = 0..count` with values uniform in `[0, 100)`.
pub fn random_unit_points<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Point> {
    (0..count)
        .map(|index| Point::new(index as f64, rng.r#gen::<f64>() * 100.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date")
    }

    #[test]
    fn skips_weekends_by_default() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = GeneratorOptions {
            start_date: Some(monday()),
            number_of_days: 14,
            ..GeneratorOptions::default()
        };
        let data = generate_financial_data(&options, monday(), &mut rng);
        assert_eq!(data.len(), 10);
        assert!(
            data.iter()
                .all(|point| !matches!(point.date.weekday(), Weekday::Sat | Weekday::Sun))
        );
        assert!(data.windows(2).all(|pair| pair[0].date < pair[1].date));
    }

    #[test]
    fn keeps_weekends_when_asked() {
        let mut rng = StdRng::seed_from_u64(7);
        let options = GeneratorOptions {
            start_date: Some(monday()),
            number_of_days: 14,
            has_weekends: true,
            ..GeneratorOptions::default()
        };
        assert_eq!(generate_financial_data(&options, monday(), &mut rng).len(), 14);
    }

    #[test]
    fn default_start_is_before_today() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = GeneratorOptions {
            has_weekends: true,
            ..GeneratorOptions::default()
        };
        let data = generate_financial_data(&options, monday(), &mut rng);
        assert_eq!(data.first().map(|point| point.date), Some(monday() - Duration::days(90)));
        assert_eq!(data.last().map(|point| point.date), Some(monday() - Duration::days(1)));
    }

    #[test]
    fn stops_at_the_last_representable_date() {
        let mut rng = StdRng::seed_from_u64(2);
        let last = NaiveDate::MAX;
        let options = GeneratorOptions {
            start_date: Some(last - Duration::days(4)),
            number_of_days: 30,
            has_weekends: true,
            ..GeneratorOptions::default()
        };
        let data = generate_financial_data(&options, monday(), &mut rng);
        assert_eq!(data.len(), 5);
        assert_eq!(data.last().map(|point| point.date), Some(last));
    }

    #[test]
    fn huge_span_before_today_does_not_overflow() {
        let options = GeneratorOptions {
            number_of_days: u32::MAX,
            ..GeneratorOptions::default()
        };
        let early = NaiveDate::MIN + Duration::days(10);
        assert_eq!(options.start(early), NaiveDate::MIN);
    }

    #[test]
    fn values_are_rounded_and_non_negative() {
        let mut rng = StdRng::seed_from_u64(42);
        let options = GeneratorOptions {
            volatility: 0.5,
            seasonality: 40.0,
            has_weekends: true,
            ..GeneratorOptions::default()
        };
        for point in generate_financial_data(&options, monday(), &mut rng) {
            assert!(point.value >= 0.0);
            assert!(((point.value * 100.0).round() - point.value * 100.0).abs() < 1e-6);
        }
    }

    #[test]
    fn same_seed_same_data() {
        let options = GeneratorOptions::default();
        let a = generate_financial_data(&options, monday(), &mut StdRng::seed_from_u64(3));
        let b = generate_financial_data(&options, monday(), &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn multiple_series_are_named_and_colored() {
        let mut rng = StdRng::seed_from_u64(9);
        let series = generate_multiple_series(4, &GeneratorOptions::default(), monday(), &mut rng);
        let names: Vec<&str> = series.iter().map(|series| series.name.as_str()).collect();
        assert_eq!(names, vec!["Series 1", "Series 2", "Series 3", "Series 4"]);
        assert_eq!(series[1].color, SERIES_PALETTE[1]);
        assert!(series.iter().all(|series| !series.points.is_empty()));
    }

    #[test]
    fn example_data_has_three_multi_series() {
        let mut rng = StdRng::seed_from_u64(5);
        let data = ExampleData::generate(&GeneratorOptions::default(), monday(), &mut rng);
        assert_eq!(data.multiple.len(), 3);
        assert!(!data.basic.is_empty() && !data.bullish.is_empty() && !data.volatile.is_empty());
    }

    #[test]
    fn integer_points_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let points = random_integer_points(50, 0, 100, &mut rng);
        assert_eq!(points.len(), 50);
        for (index, point) in points.iter().enumerate() {
            assert_eq!(point.x, index as f64);
            assert!((0.0..=100.0).contains(&point.y));
            assert_eq!(point.y.fract(), 0.0);
        }
    }
}
