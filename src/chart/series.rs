//! Activity series
//!
//! Daily message counts as served by the recent-activity endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire date format (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One day of activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub count: u64,
}

/// Point as it appears on the wire
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawPoint {
    pub date: String,
    pub count: i64,
}

/// Body of the chart data endpoint
#[derive(Debug, Deserialize)]
pub struct EvolutionResponse {
    #[serde(default)]
    pub evolution: Vec<RawPoint>,
}

/// Errors raised while validating a series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Negative count {count} on {date}")]
    NegativeCount { date: NaiveDate, count: i64 },

    #[error("Date {date} does not follow {previous}")]
    OutOfOrder { previous: NaiveDate, date: NaiveDate },
}

/// Chronologically ordered activity points.
///
/// Dates are strictly increasing and counts are non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChartSeries {
    points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn new(points: Vec<ChartPoint>) -> Result<Self, SeriesError> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(SeriesError::OutOfOrder {
                    previous: pair[0].date,
                    date: pair[1].date,
                });
            }
        }
        Ok(Self { points })
    }

    /// Parse wire points, converting date strings into dates
    pub fn from_raw(raw: &[RawPoint]) -> Result<Self, SeriesError> {
        let points = raw
            .iter()
            .map(|p| {
                let date = NaiveDate::parse_from_str(&p.date, DATE_FORMAT)
                    .map_err(|_| SeriesError::InvalidDate(p.date.clone()))?;
                let count = u64::try_from(p.count)
                    .map_err(|_| SeriesError::NegativeCount { date, count: p.count })?;
                Ok(ChartPoint { date, count })
            })
            .collect::<Result<Vec<_>, SeriesError>>()?;

        Self::new(points)
    }

    pub fn points(&self) -> &[ChartPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last date, if any
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    pub fn max_count(&self) -> u64 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }
}
