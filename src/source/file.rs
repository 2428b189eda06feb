//! File-based data source.
//!
//! Reads a JSON [`Dataset`] from disk. The parsed document is cached and
//! only re-read when the file's modification time changes.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

use super::{Dataset, VitalsRepository};
use crate::data::{AggregatePoint, CareData, TrendWindow, VitalSample};
use crate::error::Result;

#[derive(Debug)]
struct Cached {
    modified: Option<SystemTime>,
    dataset: Arc<Dataset>,
}

/// A repository that reads dashboard data from a JSON file.
///
/// Vital records that fail to parse (an inverted range, a wrong type) or
/// fail validation (an empty history) are skipped with a warning. The rest
/// of the document still loads.
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
    description: String,
    cache: Mutex<Option<Cached>>,
}

impl FileRepository {
    /// Create a repository for the given path. Nothing is read until the
    /// first fetch.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self {
            path,
            description,
            cache: Mutex::new(None),
        }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn modified_time(&self) -> Option<SystemTime> {
        fs::metadata(&self.path).ok()?.modified().ok()
    }

    /// The current dataset, re-read if the file changed since the last call.
    fn dataset(&self) -> Result<Arc<Dataset>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        let modified = self.modified_time();

        if let Some(cached) = cache.as_ref() {
            let stale = match (cached.modified, modified) {
                (Some(last), Some(current)) => current > last,
                _ => true,
            };
            if !stale {
                return Ok(Arc::clone(&cached.dataset));
            }
        }

        let content = fs::read_to_string(&self.path)?;
        let dataset: Arc<Dataset> = Arc::new(serde_json::from_str(&content)?);
        debug!(
            path = %self.path.display(),
            vitals = dataset.vitals.len(),
            windows = dataset.series.len(),
            "loaded dataset"
        );

        *cache = Some(Cached {
            modified,
            dataset: Arc::clone(&dataset),
        });
        Ok(dataset)
    }
}

impl VitalsRepository for FileRepository {
    fn fetch_vitals(&self, _now: DateTime<Utc>) -> Result<Vec<VitalSample>> {
        let dataset = self.dataset()?;
        let samples = dataset
            .vitals
            .iter()
            .cloned()
            .filter_map(|record| {
                let id = record.id.clone();
                match record.into_sample() {
                    Ok(sample) => Some(sample),
                    Err(e) => {
                        warn!(vital = %id, error = %e, "skipping invalid vital record");
                        None
                    }
                }
            })
            .collect();
        Ok(samples)
    }

    fn fetch_series(&self, window: TrendWindow, _today: NaiveDate) -> Result<Vec<AggregatePoint>> {
        let dataset = self.dataset()?;
        Ok(dataset.series.get(&window).cloned().unwrap_or_default())
    }

    fn fetch_care(&self, _now: DateTime<Utc>) -> Result<CareData> {
        Ok(self.dataset()?.care())
    }

    fn fetch_recommendations(&self) -> Result<Vec<String>> {
        Ok(self.dataset()?.recommendations.clone())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_json() -> &'static str {
        r#"{
            "vitals": [
                {
                    "id": "heart-rate",
                    "name": "Heart Rate",
                    "value": 130,
                    "unit": "bpm",
                    "captured_at": "2026-10-16T09:00:00Z",
                    "history": [70, 90, 130],
                    "ranges": { "normal": [60, 100], "warning": [50, 120] }
                },
                {
                    "id": "spo2",
                    "name": "SpO2",
                    "value": 98,
                    "unit": "%",
                    "captured_at": "2026-10-16T09:00:00Z",
                    "history": [],
                    "ranges": { "normal": [95, 100], "warning": [90, 94] }
                }
            ],
            "series": {
                "30days": [
                    { "bucket_label": "2026-10-15", "heart_rate": 70, "spo2": 97,
                      "temperature": 36.8, "hydration_pct": 55 },
                    { "bucket_label": "2026-10-16", "heart_rate": 72, "spo2": 98,
                      "temperature": 36.9, "hydration_pct": 61 }
                ]
            },
            "recommendations": ["Drink water."]
        }"#
    }

    fn write_dataset(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", json).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_file_repository_new() {
        let repo = FileRepository::new("/tmp/vitals.json");
        assert_eq!(repo.path(), Path::new("/tmp/vitals.json"));
        assert_eq!(repo.description(), "file: /tmp/vitals.json");
    }

    #[test]
    fn test_invalid_record_skipped() {
        let file = write_dataset(sample_json());
        let repo = FileRepository::new(file.path());

        let vitals = repo.fetch_vitals(Utc::now()).unwrap();
        assert_eq!(vitals.len(), 1);
        assert_eq!(vitals[0].id(), "heart-rate");
        assert_eq!(vitals[0].status(), Some(crate::data::VitalStatus::Critical));
    }

    #[test]
    fn test_inverted_range_skips_only_that_record() {
        let json = sample_json().replace(
            r#""normal": [60, 100], "warning": [50, 120]"#,
            r#""normal": [100, 60], "warning": [50, 120]"#,
        );
        let json = json.replace(r#""history": [],"#, r#""history": [98],"#);
        let file = write_dataset(&json);
        let repo = FileRepository::new(file.path());

        let vitals = repo.fetch_vitals(Utc::now()).unwrap();
        assert_eq!(vitals.len(), 1);
        assert_eq!(vitals[0].id(), "spo2");
        assert_eq!(repo.fetch_recommendations().unwrap(), ["Drink water."]);
    }

    #[test]
    fn test_series_by_window() {
        let file = write_dataset(sample_json());
        let repo = FileRepository::new(file.path());
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        assert_eq!(repo.fetch_series(TrendWindow::ThirtyDays, today).unwrap().len(), 2);
        assert!(repo.fetch_series(TrendWindow::SevenDays, today).unwrap().is_empty());
        assert_eq!(repo.fetch_recommendations().unwrap(), ["Drink water."]);
        assert!(repo.fetch_care(Utc::now()).unwrap().appointments.is_empty());
    }

    #[test]
    fn test_cached_between_fetches() {
        let file = write_dataset(sample_json());
        let repo = FileRepository::new(file.path());

        let first = repo.dataset().unwrap();
        let second = repo.dataset().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_file() {
        let repo = FileRepository::new("/nonexistent/path/vitals.json");
        let err = repo.fetch_vitals(Utc::now()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_dataset("not valid json");
        let repo = FileRepository::new(file.path());
        let err = repo.fetch_care(Utc::now()).unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
