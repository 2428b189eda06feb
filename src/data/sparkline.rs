//! Sparkline geometry and rolling history buffers.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Number of readings kept in a vital's history.
pub const HISTORY_LEN: usize = 7;

/// Drawing area for a sparkline, in output units (pixels, cells).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SparklineFrame {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for SparklineFrame {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 20.0,
            padding: 2.0,
        }
    }
}

impl SparklineFrame {
    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self {
            width,
            height,
            padding,
        }
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
        (min.min(v), max.max(v))
    })
}

/// Map `history` onto polyline coordinates inside `frame`.
///
/// Points are evenly spaced across `[padding, width - padding]`. Values are
/// normalized into `[padding, height - padding]` with larger values drawn
/// higher (smaller y). A flat history uses a range of 1 and sits on the
/// baseline. A single reading is placed at the horizontal midpoint.
pub fn sparkline_coordinates(history: &[f64], frame: &SparklineFrame) -> Vec<(f64, f64)> {
    if history.is_empty() {
        return Vec::new();
    }

    let (min, max) = min_max(history);
    let range = if max == min { 1.0 } else { max - min };
    let available_width = frame.width - frame.padding * 2.0;
    let available_height = frame.height - frame.padding * 2.0;
    let y_for = |value: f64| frame.height - frame.padding - (value - min) / range * available_height;

    if history.len() == 1 {
        return vec![(frame.width / 2.0, y_for(history[0]))];
    }

    let step = available_width / (history.len() - 1) as f64;
    history
        .iter()
        .enumerate()
        .map(|(i, &value)| (frame.padding + i as f64 * step, y_for(value)))
        .collect()
}

/// Normalize values to 0-7 for 8-level bar characters.
pub fn bar_levels(history: &[f64]) -> Vec<u8> {
    if history.is_empty() {
        return Vec::new();
    }

    let (min, max) = min_max(history);
    let range = if max == min { 1.0 } else { max - min };

    history
        .iter()
        .map(|&v| {
            let normalized = ((v - min) / range * 7.0).round() as u8;
            normalized.min(7)
        })
        .collect()
}

/// Fixed-capacity history, most-recent-last.
#[derive(Debug, Clone)]
pub struct RollingHistory {
    values: VecDeque<f64>,
    capacity: usize,
}

impl Default for RollingHistory {
    fn default() -> Self {
        Self::new(HISTORY_LEN)
    }
}

impl RollingHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            values: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    /// Seed from existing readings, keeping only the most recent `capacity`.
    pub fn from_values(values: &[f64], capacity: usize) -> Self {
        let mut history = Self::new(capacity);
        for &v in values {
            history.push(v);
        }
        history
    }

    /// Append a reading, dropping the oldest when full.
    pub fn push(&mut self, value: f64) {
        self.values.push_back(value);
        if self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }
}
