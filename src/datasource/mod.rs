//! Demo data: dated points, synthetic generators and a live sample stream.
//!
//! Dated values are placed on the x axis as Unix epoch milliseconds at UTC
//! midnight so that they share the linear scale used by index data.

mod generator;
mod stream;

use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::geom::Point;
use crate::render::Color;

pub use generator::{
    ExampleData, GeneratorOptions, generate_financial_data, generate_multiple_series,
    random_integer_points, random_unit_points,
};
pub use stream::{DataStream, StreamRange, StreamSample, Subscription};

/// A value observed on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DataPoint {
    /// Calendar day of the observation.
    pub date: NaiveDate,
    /// Observed value.
    pub value: f64,
}

impl DataPoint {
    /// Create a dated point.
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// Position on a date axis.
    pub fn to_point(&self) -> Point {
        Point::new(date_to_x(self.date), self.value)
    }
}

/// A named, colored sequence of dated points sorted by date.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedSeries {
    /// Display name.
    pub name: String,
    /// Line color.
    pub color: Color,
    /// Points sorted by date.
    pub points: Vec<DataPoint>,
}

impl DatedSeries {
    /// Convert the series into chart points.
    pub fn to_points(&self) -> Vec<Point> {
        self.points.iter().map(DataPoint::to_point).collect()
    }
}

/// Map a date onto the x axis (epoch milliseconds at UTC midnight).
pub fn date_to_x(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}

/// Map an x position back to the calendar day it falls on.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis(x.floor() as i64).map(|datetime| datetime.date_naive())
}
