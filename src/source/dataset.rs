//! Serialization format for JSON datasets.
//!
//! A dataset file carries vitals in the same shape the web dashboard used
//! (`timestamp`, `sparkline`, `ranges.normal`/`ranges.warning`), optional
//! per-window trend series, and the care and recommendation lists.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::data::{
    AggregatePoint, Appointment, CareData, Consultation, TrendWindow, VitalProfile, VitalRange,
    VitalSample, VitalStatus, VitalValue,
};
use crate::error::Result;

/// Top-level dataset document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Records that fail to deserialize (bad range, wrong type) are skipped
    /// individually rather than failing the document.
    #[serde(default, deserialize_with = "skip_malformed_records")]
    pub vitals: Vec<VitalRecord>,

    /// Trend points keyed by window (`"7days"`, `"30days"`, `"1year"`).
    #[serde(default)]
    pub series: BTreeMap<TrendWindow, Vec<AggregatePoint>>,

    #[serde(default)]
    pub appointments: Vec<Appointment>,

    #[serde(default)]
    pub consultations: Vec<Consultation>,

    #[serde(default)]
    pub recommendations: Vec<String>,
}

fn skip_malformed_records<'de, D>(deserializer: D) -> std::result::Result<Vec<VitalRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<serde_json::Value>::deserialize(deserializer)?;
    let records = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let id = value.get("id").and_then(|v| v.as_str()).unwrap_or("?").to_string();
            match serde_json::from_value::<VitalRecord>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(index, vital = %id, error = %e, "skipping malformed vital record");
                    None
                }
            }
        })
        .collect();
    Ok(records)
}

impl Dataset {
    pub fn care(&self) -> CareData {
        CareData {
            appointments: self.appointments.clone(),
            consultations: self.consultations.clone(),
        }
    }
}

/// Classification ranges of a record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RecordRanges {
    pub normal: VitalRange,
    pub warning: VitalRange,
}

/// One vital as stored in a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalRecord {
    pub id: String,
    pub name: String,
    pub value: VitalValue,
    pub unit: String,

    #[serde(alias = "timestamp")]
    pub captured_at: DateTime<Utc>,

    /// Recent readings, most-recent-last.
    #[serde(alias = "sparkline")]
    pub history: Vec<f64>,

    #[serde(default)]
    pub icon: String,

    pub ranges: RecordRanges,

    /// Status written by the producer. Never used for display: the status
    /// is always re-derived from value and ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<VitalStatus>,
}

impl VitalRecord {
    /// Convert into a validated sample, dropping the stored status.
    pub fn into_sample(self) -> Result<VitalSample> {
        let profile = VitalProfile {
            id: self.id,
            name: self.name,
            unit: self.unit,
            icon: self.icon,
            normal_range: self.ranges.normal,
            warning_range: self.ranges.warning,
        };
        let reported = self.status;
        let sample = VitalSample::new(profile, self.value, self.captured_at, self.history)?;

        if let (Some(reported), Ok(derived)) = (reported, sample.classify()) {
            if reported != derived {
                warn!(
                    vital = %sample.id(),
                    %reported,
                    %derived,
                    "stored status disagrees with ranges; using derived status"
                );
            }
        }

        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_dataset() {
        let json = r#"{
            "vitals": [
                {
                    "id": "blood-pressure",
                    "name": "Blood Pressure",
                    "value": "120/80",
                    "unit": "mmHg",
                    "timestamp": "2026-10-16T09:00:00Z",
                    "sparkline": [120, 118, 122, 119, 120, 121, 120],
                    "status": "critical",
                    "icon": "heart",
                    "ranges": { "normal": [90, 120], "warning": [80, 140] }
                }
            ],
            "series": {
                "7days": [
                    {
                        "bucket_label": "2026-10-16",
                        "heart_rate": 72,
                        "spo2": 98,
                        "temperature": 36.9,
                        "hydration_pct": 64
                    }
                ]
            }
        }"#;

        let dataset: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(dataset.vitals.len(), 1);
        assert_eq!(dataset.series[&TrendWindow::SevenDays].len(), 1);
        assert!(!dataset.series.contains_key(&TrendWindow::OneYear));
        assert!(dataset.care().appointments.is_empty());

        let record = dataset.vitals[0].clone();
        assert_eq!(record.status, Some(VitalStatus::Critical));
        assert_eq!(record.value, VitalValue::Composite("120/80".to_string()));

        // The stored "critical" is ignored in favour of the derived status.
        let sample = record.into_sample().unwrap();
        assert_eq!(sample.status(), Some(VitalStatus::Normal));
        assert_eq!(sample.history().len(), 7);
    }

    #[test]
    fn test_numeric_value_and_invalid_range() {
        let json = r#"{
            "id": "heart-rate",
            "name": "Heart Rate",
            "value": 72,
            "unit": "bpm",
            "captured_at": "2026-10-16T09:00:00Z",
            "history": [72],
            "ranges": { "normal": [100, 60], "warning": [50, 120] }
        }"#;
        assert!(serde_json::from_str::<VitalRecord>(json).is_err());

        let fixed = json.replace("[100, 60]", "[60, 100]");
        let record: VitalRecord = serde_json::from_str(&fixed).unwrap();
        assert_eq!(record.value, VitalValue::Scalar(72.0));
        assert!(record.status.is_none());
    }

    #[test]
    fn test_malformed_record_skipped_in_dataset() {
        let json = r#"{
            "vitals": [
                {
                    "id": "heart-rate", "name": "Heart Rate", "value": 72, "unit": "bpm",
                    "captured_at": "2026-10-16T09:00:00Z", "history": [72],
                    "ranges": { "normal": [100, 60], "warning": [50, 120] }
                },
                {
                    "id": "spo2", "name": "SpO2", "value": 98, "unit": "%",
                    "captured_at": "2026-10-16T09:00:00Z", "history": [98],
                    "ranges": { "normal": [95, 100], "warning": [90, 94] }
                },
                { "id": "temperature", "value": "warm" }
            ]
        }"#;

        let dataset: Dataset = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = dataset.vitals.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["spo2"]);

        assert!(serde_json::from_str::<Dataset>(r#"{ "vitals": 3 }"#).is_err());
    }

    #[test]
    fn test_empty_history_rejected() {
        let json = r#"{
            "id": "spo2",
            "name": "SpO2",
            "value": 98,
            "unit": "%",
            "captured_at": "2026-10-16T09:00:00Z",
            "history": [],
            "ranges": { "normal": [95, 100], "warning": [90, 94] }
        }"#;
        let record: VitalRecord = serde_json::from_str(json).unwrap();
        assert!(record.into_sample().is_err());
    }
}
