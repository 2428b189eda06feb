//! Vital samples and status classification.
//!
//! This module turns raw readings into display-ready cards. A sample's
//! status is never stored: it is derived from the value and the ranges of
//! its [`VitalProfile`] every time it is read.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::elapsed::elapsed_label;
use super::profile::{VitalProfile, VitalRange};
use super::sparkline::{bar_levels, sparkline_coordinates, SparklineFrame};
use crate::error::{Error, Result};

/// Shown in place of a value or status that cannot be computed.
pub const PLACEHOLDER: &str = "—";

/// Classification of a reading against its ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VitalStatus {
    Normal,
    Warning,
    Critical,
}

impl VitalStatus {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            VitalStatus::Normal => "OK",
            VitalStatus::Warning => "WARN",
            VitalStatus::Critical => "CRIT",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VitalStatus::Normal => "normal",
            VitalStatus::Warning => "warning",
            VitalStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for VitalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a scalar: normal range first, then warning range, else critical.
///
/// Both ranges are inclusive. A degenerate normal range (`low == high`)
/// only matches its exact value.
pub fn classify_scalar(value: f64, normal: &VitalRange, warning: &VitalRange) -> VitalStatus {
    if normal.contains(value) {
        VitalStatus::Normal
    } else if warning.contains(value) {
        VitalStatus::Warning
    } else {
        VitalStatus::Critical
    }
}

/// A reading: a plain number, or a composite such as blood pressure `"120/80"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VitalValue {
    Scalar(f64),
    Composite(String),
}

impl VitalValue {
    /// The comparable scalar: the value itself, or the first component of a composite.
    pub fn primary(&self) -> Result<f64> {
        match self {
            VitalValue::Scalar(v) if v.is_finite() => Ok(*v),
            VitalValue::Scalar(v) => Err(Error::InvalidSampleFormat(v.to_string())),
            VitalValue::Composite(s) => s
                .split('/')
                .next()
                .map(str::trim)
                .and_then(|first| first.parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::InvalidSampleFormat(s.clone())),
        }
    }
}

impl fmt::Display for VitalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VitalValue::Scalar(v) => write!(f, "{}", v),
            VitalValue::Composite(s) => f.write_str(s),
        }
    }
}

impl From<f64> for VitalValue {
    fn from(value: f64) -> Self {
        VitalValue::Scalar(value)
    }
}

impl From<&str> for VitalValue {
    fn from(value: &str) -> Self {
        VitalValue::Composite(value.to_string())
    }
}

/// A read-only snapshot of one vital.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalSample {
    profile: VitalProfile,
    value: VitalValue,
    captured_at: DateTime<Utc>,
    history: Vec<f64>,
}

impl VitalSample {
    /// Create a sample. `history` is most-recent-last and must not be empty.
    pub fn new(
        profile: VitalProfile,
        value: impl Into<VitalValue>,
        captured_at: DateTime<Utc>,
        history: Vec<f64>,
    ) -> Result<Self> {
        if history.is_empty() {
            return Err(Error::EmptyHistory(profile.id));
        }
        Ok(Self {
            profile,
            value: value.into(),
            captured_at,
            history,
        })
    }

    pub fn id(&self) -> &str {
        &self.profile.id
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn unit(&self) -> &str {
        &self.profile.unit
    }

    pub fn icon(&self) -> &str {
        &self.profile.icon
    }

    pub fn value(&self) -> &VitalValue {
        &self.value
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    pub fn normal_range(&self) -> &VitalRange {
        &self.profile.normal_range
    }

    pub fn warning_range(&self) -> &VitalRange {
        &self.profile.warning_range
    }

    pub fn profile(&self) -> &VitalProfile {
        &self.profile
    }

    /// Derive the status from the current value and ranges.
    ///
    /// Fails with [`Error::InvalidSampleFormat`] when a composite value has a
    /// non-numeric first component.
    pub fn classify(&self) -> Result<VitalStatus> {
        let scalar = self.value.primary()?;
        if self.normal_range().is_degenerate() {
            debug!(vital = %self.id(), range = %self.normal_range(), "degenerate normal range");
        }
        Ok(classify_scalar(scalar, self.normal_range(), self.warning_range()))
    }

    /// Status for display; `None` when the value cannot be classified.
    pub fn status(&self) -> Option<VitalStatus> {
        match self.classify() {
            Ok(status) => Some(status),
            Err(e) => {
                warn!(vital = %self.id(), error = %e, "cannot classify vital");
                None
            }
        }
    }

    /// Whether the value falls outside the normal range (ring highlight on cards).
    pub fn is_outside_normal(&self) -> bool {
        self.value.primary().is_ok_and(|v| !self.normal_range().contains(v))
    }
}

/// Everything a renderer needs for one vital, with fallbacks already applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VitalCard {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub value_text: String,
    pub unit: String,
    pub status: Option<VitalStatus>,
    pub outside_normal: bool,
    pub updated: String,
    pub normal_range: VitalRange,
    pub warning_range: VitalRange,
    pub history: Vec<f64>,
    pub sparkline: Vec<(f64, f64)>,
    pub levels: Vec<u8>,
}

impl VitalCard {
    pub fn from_sample(sample: &VitalSample, now: DateTime<Utc>, frame: &SparklineFrame) -> Self {
        let status = sample.status();
        let value_text = match status {
            Some(_) => sample.value().to_string(),
            None => PLACEHOLDER.to_string(),
        };

        Self {
            id: sample.id().to_string(),
            name: sample.name().to_string(),
            icon: sample.icon().to_string(),
            value_text,
            unit: sample.unit().to_string(),
            status,
            outside_normal: sample.is_outside_normal(),
            updated: elapsed_label(sample.captured_at(), now),
            normal_range: *sample.normal_range(),
            warning_range: *sample.warning_range(),
            history: sample.history().to_vec(),
            sparkline: sparkline_coordinates(sample.history(), frame),
            levels: bar_levels(sample.history()),
        }
    }

    /// Status symbol, or the placeholder when unclassifiable.
    pub fn status_symbol(&self) -> &'static str {
        self.status.map_or(PLACEHOLDER, |s| s.symbol())
    }
}

/// A vital that is not in its normal range.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub vital_id: String,
    pub name: String,
    pub status: VitalStatus,
    pub message: String,
}

/// Number of vitals in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub normal: usize,
    pub warning: usize,
    pub critical: usize,
    /// Vitals whose value could not be classified.
    pub unknown: usize,
}

impl StatusCounts {
    /// The worst known status, if any vital was classified.
    pub fn worst(&self) -> Option<VitalStatus> {
        if self.critical > 0 {
            Some(VitalStatus::Critical)
        } else if self.warning > 0 {
            Some(VitalStatus::Warning)
        } else if self.normal > 0 {
            Some(VitalStatus::Normal)
        } else {
            None
        }
    }
}

/// One refresh cycle's worth of vitals.
#[derive(Debug, Clone)]
pub struct VitalsData {
    pub samples: Vec<VitalSample>,
    pub refreshed_at: DateTime<Utc>,
}

impl VitalsData {
    pub fn new(samples: Vec<VitalSample>, refreshed_at: DateTime<Utc>) -> Self {
        Self {
            samples,
            refreshed_at,
        }
    }

    pub fn get(&self, id: &str) -> Option<&VitalSample> {
        self.samples.iter().find(|s| s.id() == id)
    }

    /// Display cards in source order.
    pub fn cards(&self, now: DateTime<Utc>, frame: &SparklineFrame) -> Vec<VitalCard> {
        self.samples.iter().map(|s| VitalCard::from_sample(s, now, frame)).collect()
    }

    pub fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for sample in &self.samples {
            match sample.status() {
                Some(VitalStatus::Normal) => counts.normal += 1,
                Some(VitalStatus::Warning) => counts.warning += 1,
                Some(VitalStatus::Critical) => counts.critical += 1,
                None => counts.unknown += 1,
            }
        }
        counts
    }

    /// Alerts for every vital outside its normal range, critical first then by name.
    pub fn alerts(&self) -> Vec<Alert> {
        let mut alerts: Vec<Alert> = self
            .samples
            .iter()
            .filter_map(|sample| {
                let status = sample.status()?;
                if status == VitalStatus::Normal {
                    return None;
                }
                let message = format!(
                    "{} is {}: {} {} (normal {} {})",
                    sample.name(),
                    status,
                    sample.value(),
                    sample.unit(),
                    sample.normal_range(),
                    sample.unit(),
                );
                Some(Alert {
                    vital_id: sample.id().to_string(),
                    name: sample.name().to_string(),
                    status,
                    message,
                })
            })
            .collect();

        alerts.sort_by(|a, b| b.status.cmp(&a.status).then_with(|| a.name.cmp(&b.name)));
        alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::profile::default_profiles;

    fn profile(normal: (f64, f64), warning: (f64, f64)) -> VitalProfile {
        VitalProfile::new(
            "test",
            "Test",
            "u",
            "heart",
            VitalRange::new(normal.0, normal.1).unwrap(),
            VitalRange::new(warning.0, warning.1).unwrap(),
        )
    }

    fn sample(value: impl Into<VitalValue>, normal: (f64, f64), warning: (f64, f64)) -> VitalSample {
        VitalSample::new(profile(normal, warning), value, Utc::now(), vec![1.0]).unwrap()
    }

    #[test]
    fn test_scalar_inside_normal_is_normal() {
        let s = sample(72.0, (60.0, 100.0), (50.0, 120.0));
        assert_eq!(s.classify().unwrap(), VitalStatus::Normal);
    }

    #[test]
    fn test_composite_boundary_is_normal() {
        let s = sample("120/80", (90.0, 120.0), (80.0, 140.0));
        assert_eq!(s.value().primary().unwrap(), 120.0);
        assert_eq!(s.classify().unwrap(), VitalStatus::Normal);
    }

    #[test]
    fn test_warning_band_and_critical() {
        let normal = (60.0, 100.0);
        let warning = (50.0, 120.0);
        assert_eq!(sample(55.0, normal, warning).classify().unwrap(), VitalStatus::Warning);
        assert_eq!(sample(120.0, normal, warning).classify().unwrap(), VitalStatus::Warning);
        assert_eq!(sample(49.9, normal, warning).classify().unwrap(), VitalStatus::Critical);
        assert_eq!(sample(121.0, normal, warning).classify().unwrap(), VitalStatus::Critical);
    }

    #[test]
    fn test_normal_iff_inside_normal_range() {
        let normal = (36.5, 37.5);
        let warning = (35.9, 38.0);
        for tenths in 340..400 {
            let value = tenths as f64 / 10.0;
            let status = sample(value, normal, warning).classify().unwrap();
            let inside = (36.5..=37.5).contains(&value);
            assert_eq!(status == VitalStatus::Normal, inside, "value {}", value);
            if !(35.9..=38.0).contains(&value) {
                assert_eq!(status, VitalStatus::Critical, "value {}", value);
            }
        }
    }

    #[test]
    fn test_warning_range_disjoint_from_normal() {
        // SpO₂: warning [90, 94] sits entirely below normal [95, 100].
        let normal = (95.0, 100.0);
        let warning = (90.0, 94.0);
        assert_eq!(sample(98.0, normal, warning).classify().unwrap(), VitalStatus::Normal);
        assert_eq!(sample(92.0, normal, warning).classify().unwrap(), VitalStatus::Warning);
        assert_eq!(sample(94.5, normal, warning).classify().unwrap(), VitalStatus::Critical);
        assert_eq!(sample(89.0, normal, warning).classify().unwrap(), VitalStatus::Critical);
    }

    #[test]
    fn test_degenerate_normal_range() {
        let normal = (37.0, 37.0);
        let warning = (36.0, 38.0);
        assert_eq!(sample(37.0, normal, warning).classify().unwrap(), VitalStatus::Normal);
        assert_eq!(sample(37.1, normal, warning).classify().unwrap(), VitalStatus::Warning);
        assert_eq!(sample(38.5, normal, warning).classify().unwrap(), VitalStatus::Critical);
    }

    #[test]
    fn test_malformed_composite() {
        let s = sample("abc/80", (90.0, 120.0), (80.0, 140.0));
        assert!(matches!(s.classify(), Err(Error::InvalidSampleFormat(_))));
        assert_eq!(s.status(), None);
        assert!(!s.is_outside_normal());

        let empty = sample("/80", (90.0, 120.0), (80.0, 140.0));
        assert!(empty.classify().is_err());
    }

    #[test]
    fn test_composite_without_separator() {
        let s = sample(" 95 ", (90.0, 120.0), (80.0, 140.0));
        assert_eq!(s.classify().unwrap(), VitalStatus::Normal);
    }

    #[test]
    fn test_empty_history_rejected() {
        let result = VitalSample::new(profile((1.0, 2.0), (0.0, 3.0)), 1.5, Utc::now(), vec![]);
        assert!(matches!(result, Err(Error::EmptyHistory(_))));
    }

    #[test]
    fn test_card_substitutes_placeholder() {
        let s = sample("n/a", (90.0, 120.0), (80.0, 140.0));
        let card = VitalCard::from_sample(&s, Utc::now(), &SparklineFrame::default());
        assert_eq!(card.value_text, PLACEHOLDER);
        assert_eq!(card.status, None);
        assert_eq!(card.status_symbol(), PLACEHOLDER);
    }

    #[test]
    fn test_card_from_sample() {
        let now = Utc::now();
        let profile = default_profiles().remove(0);
        let history = vec![68.0, 70.0, 67.0, 72.0, 70.0, 69.0, 72.0];
        let s = VitalSample::new(profile, 72.0, now - chrono::Duration::minutes(3), history).unwrap();
        let card = VitalCard::from_sample(&s, now, &SparklineFrame::default());

        assert_eq!(card.name, "Heart Rate");
        assert_eq!(card.value_text, "72");
        assert_eq!(card.status, Some(VitalStatus::Normal));
        assert!(!card.outside_normal);
        assert_eq!(card.updated, "3 mins ago");
        assert_eq!(card.sparkline.len(), 7);
        assert_eq!(card.levels.len(), 7);
    }

    #[test]
    fn test_alerts_sorted_critical_first() {
        let now = Utc::now();
        let mut profiles = default_profiles().into_iter();
        let heart = profiles.next().unwrap();
        let spo2 = profiles.next().unwrap();
        let temp = profiles.next().unwrap();

        let data = VitalsData::new(
            vec![
                VitalSample::new(heart, 110.0, now, vec![110.0]).unwrap(),
                VitalSample::new(spo2, 85.0, now, vec![85.0]).unwrap(),
                VitalSample::new(temp, 37.0, now, vec![37.0]).unwrap(),
            ],
            now,
        );

        let alerts = data.alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].vital_id, "spo2");
        assert_eq!(alerts[0].status, VitalStatus::Critical);
        assert_eq!(alerts[1].vital_id, "heart-rate");
        assert_eq!(alerts[1].message, "Heart Rate is warning: 110 bpm (normal 60-100 bpm)");

        let counts = data.status_counts();
        assert_eq!((counts.normal, counts.warning, counts.critical), (1, 1, 1));
        assert_eq!(counts.worst(), Some(VitalStatus::Critical));
    }
}
