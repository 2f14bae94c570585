//! Bar chart geometry
//!
//! Maps an activity series onto a fixed-size drawing area: a time scale on
//! x, a linear scale anchored at zero on y, one bar per day.

use super::series::ChartSeries;
use chrono::NaiveDate;
use serde::Serialize;

/// Number of intervals for horizontal grid lines
pub const Y_GRID_INTERVALS: u32 = 5;

/// Size of the drawing area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartProps {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartProps {
    fn default() -> Self {
        Self {
            width: 250.0,
            height: 50.0,
        }
    }
}

impl ChartProps {
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }
}

/// One bar, in drawing coordinates (origin top-left)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub count: u64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Computed chart geometry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub x_domain: (NaiveDate, NaiveDate),
    pub y_domain: (u64, u64),
    pub bar_width: f64,
    pub bars: Vec<Bar>,
    /// x position of one vertical grid line per day
    pub x_grid: Vec<f64>,
    /// y position of each horizontal grid line
    pub y_grid: Vec<f64>,
}

impl ChartLayout {
    /// Lay out `series` in the area described by `props`.
    ///
    /// Returns `None` for an empty series.
    pub fn compute(series: &ChartSeries, props: ChartProps) -> Option<Self> {
        let (start, end) = series.date_extent()?;
        let max = series.max_count();
        let ChartProps { width, height } = props;

        let span_days = (end - start).num_days();
        let x = |date: NaiveDate| -> f64 {
            if span_days == 0 {
                0.0
            } else {
                (date - start).num_days() as f64 / span_days as f64 * width
            }
        };
        let y = |count: u64| -> f64 {
            if max == 0 {
                height
            } else {
                height - (count as f64 / max as f64) * height
            }
        };

        let bar_width = (width / series.len() as f64).floor();

        let bars = series
            .points()
            .iter()
            .map(|p| {
                let top = y(p.count);
                Bar {
                    date: p.date,
                    count: p.count,
                    x: x(p.date),
                    y: top,
                    width: bar_width,
                    height: height - top,
                }
            })
            .collect();

        let x_grid = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(x)
            .collect();

        let y_grid = (0..=Y_GRID_INTERVALS)
            .map(|i| height - (i as f64 / Y_GRID_INTERVALS as f64) * height)
            .collect();

        Some(Self {
            width,
            height,
            x_domain: (start, end),
            y_domain: (0, max),
            bar_width,
            bars,
            x_grid,
            y_grid,
        })
    }
}
