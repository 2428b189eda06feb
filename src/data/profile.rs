//! Static per-vital configuration: display metadata and classification ranges.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A closed interval `[low, high]` used for status classification.
///
/// Serialized as a two-element array (`[60, 100]`) so range tables read the
/// same in JSON datasets and TOML config files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct VitalRange {
    low: f64,
    high: f64,
}

impl VitalRange {
    /// Create a range, rejecting `low > high` and non-finite bounds.
    pub fn new(low: f64, high: f64) -> Result<Self> {
        if !low.is_finite() || !high.is_finite() || low > high {
            return Err(Error::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// A single-point range (`low == high`).
    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }
}

impl TryFrom<[f64; 2]> for VitalRange {
    type Error = Error;

    fn try_from([low, high]: [f64; 2]) -> Result<Self> {
        Self::new(low, high)
    }
}

impl From<VitalRange> for [f64; 2] {
    fn from(range: VitalRange) -> Self {
        [range.low, range.high]
    }
}

impl fmt::Display for VitalRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Display metadata and ranges for one kind of vital.
///
/// This is the range table entry keyed by `id`; every [`VitalSample`]
/// carries the profile it was measured against.
///
/// [`VitalSample`]: super::VitalSample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalProfile {
    pub id: String,
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub icon: String,
    pub normal_range: VitalRange,
    pub warning_range: VitalRange,
}

impl VitalProfile {
    pub fn new(
        id: &str,
        name: &str,
        unit: &str,
        icon: &str,
        normal_range: VitalRange,
        warning_range: VitalRange,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
            icon: icon.to_string(),
            normal_range,
            warning_range,
        }
    }
}

/// The built-in range table: heart rate, SpO₂, body temperature and blood pressure.
pub fn default_profiles() -> Vec<VitalProfile> {
    // Bounds are literals known to be ordered.
    let range = |low: f64, high: f64| VitalRange { low, high };

    vec![
        VitalProfile::new(
            "heart-rate",
            "Heart Rate",
            "bpm",
            "heart",
            range(60.0, 100.0),
            range(50.0, 120.0),
        ),
        VitalProfile::new(
            "spo2",
            "SpO₂",
            "%",
            "droplet",
            range(95.0, 100.0),
            range(90.0, 94.0),
        ),
        VitalProfile::new(
            "temperature",
            "Body Temperature",
            "°C",
            "thermometer",
            range(36.5, 37.5),
            range(35.9, 38.0),
        ),
        VitalProfile::new(
            "blood-pressure",
            "Blood Pressure",
            "mmHg",
            "heart",
            range(90.0, 120.0),
            range(80.0, 140.0),
        ),
    ]
}
