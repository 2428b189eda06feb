//! Windowed trend series and the hydration gauge.
//!
//! A [`TrendSeries`] is the chart data for one [`TrendWindow`]: one
//! [`AggregatePoint`] per day (7 and 30 day windows) or per month (1 year),
//! chronologically ascending with unique bucket labels.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Hydration shown when no trend data is available.
pub const DEFAULT_HYDRATION: u8 = 70;

/// Time span selector for trend aggregation.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum TrendWindow {
    #[default]
    #[serde(rename = "7days")]
    SevenDays,
    #[serde(rename = "30days")]
    ThirtyDays,
    #[serde(rename = "1year")]
    OneYear,
}

/// Bucket size of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Month,
}

impl TrendWindow {
    pub const ALL: [TrendWindow; 3] =
        [TrendWindow::SevenDays, TrendWindow::ThirtyDays, TrendWindow::OneYear];

    /// Stable key used in config, data files and the CLI.
    pub fn key(&self) -> &'static str {
        match self {
            TrendWindow::SevenDays => "7days",
            TrendWindow::ThirtyDays => "30days",
            TrendWindow::OneYear => "1year",
        }
    }

    /// Returns the display label for this window.
    pub fn label(&self) -> &'static str {
        match self {
            TrendWindow::SevenDays => "7 Days",
            TrendWindow::ThirtyDays => "30 Days",
            TrendWindow::OneYear => "1 Year",
        }
    }

    pub fn bucket_count(&self) -> usize {
        match self {
            TrendWindow::SevenDays => 7,
            TrendWindow::ThirtyDays => 30,
            TrendWindow::OneYear => 12,
        }
    }

    pub fn granularity(&self) -> Granularity {
        match self {
            TrendWindow::SevenDays | TrendWindow::ThirtyDays => Granularity::Day,
            TrendWindow::OneYear => Granularity::Month,
        }
    }

    /// Cycle to the next window.
    pub fn next(self) -> Self {
        match self {
            TrendWindow::SevenDays => TrendWindow::ThirtyDays,
            TrendWindow::ThirtyDays => TrendWindow::OneYear,
            TrendWindow::OneYear => TrendWindow::SevenDays,
        }
    }

    /// Cycle to the previous window.
    pub fn prev(self) -> Self {
        match self {
            TrendWindow::SevenDays => TrendWindow::OneYear,
            TrendWindow::ThirtyDays => TrendWindow::SevenDays,
            TrendWindow::OneYear => TrendWindow::ThirtyDays,
        }
    }

    /// Bucket labels for this window, oldest first, ending at `today`.
    ///
    /// Daily buckets are `YYYY-MM-DD`; monthly buckets are `YYYY-MM` counted
    /// back from the first day of the current month.
    pub fn bucket_labels(&self, today: NaiveDate) -> Vec<String> {
        let count = self.bucket_count() as u32;
        match self.granularity() {
            Granularity::Day => (0..count)
                .rev()
                .filter_map(|back| today.checked_sub_days(Days::new(back as u64)))
                .map(|d| d.format("%Y-%m-%d").to_string())
                .collect(),
            Granularity::Month => {
                let Some(first) = NaiveDate::from_ymd_opt(today.year(), today.month(), 1) else {
                    return Vec::new();
                };
                (0..count)
                    .rev()
                    .filter_map(|back| first.checked_sub_months(Months::new(back)))
                    .map(|d| d.format("%Y-%m").to_string())
                    .collect()
            }
        }
    }
}

impl fmt::Display for TrendWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TrendWindow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TrendWindow::ALL
            .into_iter()
            .find(|w| w.key() == s.trim())
            .ok_or_else(|| Error::UnknownWindow(s.to_string()))
    }
}

/// One bucket of the four correlated metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatePoint {
    pub bucket_label: String,
    pub heart_rate: f64,
    pub spo2: f64,
    pub temperature: f64,
    pub hydration_pct: u8,
}

/// Charted metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    HeartRate,
    SpO2,
    Temperature,
    Hydration,
}

impl Metric {
    /// The three line-chart metrics; hydration is shown on the gauge.
    pub const CHARTED: [Metric; 3] = [Metric::HeartRate, Metric::SpO2, Metric::Temperature];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::HeartRate => "Heart Rate (bpm)",
            Metric::SpO2 => "SpO₂ (%)",
            Metric::Temperature => "Temperature (°C)",
            Metric::Hydration => "Hydration (%)",
        }
    }

    pub fn value(&self, point: &AggregatePoint) -> f64 {
        match self {
            Metric::HeartRate => point.heart_rate,
            Metric::SpO2 => point.spo2,
            Metric::Temperature => point.temperature,
            Metric::Hydration => point.hydration_pct as f64,
        }
    }
}

/// Chart data for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    window: TrendWindow,
    points: Vec<AggregatePoint>,
}

impl TrendSeries {
    /// Build a series, restoring its invariants.
    ///
    /// Points are sorted by bucket label (ISO labels sort chronologically),
    /// duplicate labels keep the last occurrence, and hydration is capped at 100.
    pub fn new(window: TrendWindow, mut points: Vec<AggregatePoint>) -> Self {
        let original_len = points.len();

        // Stable sort keeps source order among duplicates; reverse so dedup keeps the last one.
        points.reverse();
        points.sort_by(|a, b| a.bucket_label.cmp(&b.bucket_label));
        points.dedup_by(|dup, kept| dup.bucket_label == kept.bucket_label);
        for point in &mut points {
            point.hydration_pct = point.hydration_pct.min(100);
        }

        if points.len() != original_len {
            debug!(
                window = %window,
                dropped = original_len - points.len(),
                "dropped duplicate trend buckets"
            );
        }

        Self { window, points }
    }

    /// Build the series for `window` ending at `today`.
    ///
    /// Points whose bucket label is not one of the window's buckets are
    /// dropped, so the result never has more than `bucket_count()` points
    /// and never reaches past `today`.
    pub fn for_window(window: TrendWindow, today: NaiveDate, points: Vec<AggregatePoint>) -> Self {
        let buckets: HashSet<String> = window.bucket_labels(today).into_iter().collect();
        let original_len = points.len();
        let points: Vec<AggregatePoint> =
            points.into_iter().filter(|p| buckets.contains(&p.bucket_label)).collect();

        if points.len() != original_len {
            debug!(
                window = %window,
                %today,
                dropped = original_len - points.len(),
                "dropped trend points outside the window"
            );
        }

        Self::new(window, points)
    }

    pub fn empty(window: TrendWindow) -> Self {
        Self {
            window,
            points: Vec::new(),
        }
    }

    pub fn window(&self) -> TrendWindow {
        self.window
    }

    pub fn points(&self) -> &[AggregatePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent bucket, or [`Error::EmptySeries`].
    pub fn latest(&self) -> Result<&AggregatePoint> {
        self.points.last().ok_or(Error::EmptySeries(self.window.key()))
    }

    /// `(index, value)` pairs for charting one metric.
    pub fn metric_points(&self, metric: Metric) -> Vec<(f64, f64)> {
        self.points.iter().enumerate().map(|(i, p)| (i as f64, metric.value(p))).collect()
    }

    /// Min and max of one metric across the series.
    pub fn metric_bounds(&self, metric: Metric) -> Option<(f64, f64)> {
        self.points.iter().map(|p| metric.value(p)).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
    }

    pub fn current_hydration(&self, default: u8) -> u8 {
        current_hydration(&self.points, default)
    }
}

/// Hydration of the last point, or `default` for an empty series.
pub fn current_hydration(points: &[AggregatePoint], default: u8) -> u8 {
    points.last().map_or(default, |p| p.hydration_pct).min(100)
}

/// Two-slice gauge: hydrated and dehydrated percentages summing to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HydrationSplit {
    pub hydrated: u8,
    pub dehydrated: u8,
}

/// Split a hydration percentage for the gauge. Inputs above 100 are capped.
pub fn hydration_gauge_split(hydration_pct: u8) -> HydrationSplit {
    let hydrated = hydration_pct.min(100);
    HydrationSplit {
        hydrated,
        dehydrated: 100 - hydrated,
    }
}
