//! Data source abstraction for vitals, trend series and care lists.
//!
//! The dashboard never reads global data directly: it is handed a
//! [`VitalsRepository`] and asks it for read-only snapshots. The trend
//! aggregator calls the repository from spawned tasks, so implementations
//! must be `Send + Sync`.

mod dataset;
mod file;
mod mock;

pub use dataset::{Dataset, RecordRanges, VitalRecord};
pub use file::FileRepository;
pub use mock::{generate_series, MockRepository};

use std::fmt::Debug;

use chrono::{DateTime, NaiveDate, Utc};

use crate::data::{AggregatePoint, CareData, TrendWindow, VitalSample};
use crate::error::Result;

/// Read-only provider of dashboard data.
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use vitalwatch::{MockRepository, VitalsRepository, TrendWindow};
///
/// let repo = MockRepository::seeded(7);
/// let vitals = repo.fetch_vitals(Utc::now()).unwrap();
/// assert_eq!(vitals.len(), 4);
///
/// let week = repo.fetch_series(TrendWindow::SevenDays, Utc::now().date_naive()).unwrap();
/// assert_eq!(week.len(), 7);
/// ```
pub trait VitalsRepository: Send + Sync + Debug {
    /// The current vitals snapshot. Each call replaces the previous one.
    fn fetch_vitals(&self, now: DateTime<Utc>) -> Result<Vec<VitalSample>>;

    /// Aggregate points for `window`, ending at `today`.
    ///
    /// An empty result is valid and is rendered as an empty chart. Points
    /// outside the window's buckets are dropped by the aggregator.
    fn fetch_series(&self, window: TrendWindow, today: NaiveDate) -> Result<Vec<AggregatePoint>>;

    /// Appointments and consultations as of `now`.
    fn fetch_care(&self, now: DateTime<Utc>) -> Result<CareData>;

    /// Recommendation texts, in rotation order.
    fn fetch_recommendations(&self) -> Result<Vec<String>>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;
}
