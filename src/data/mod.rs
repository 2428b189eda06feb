//! Data models and derivations for the dashboard.
//!
//! This module turns raw vitals and trend points into status-annotated,
//! display-ready values. Nothing here performs I/O or waits on timers.
//!
//! ## Submodules
//!
//! - [`profile`]: Range table entries ([`VitalProfile`], [`VitalRange`])
//! - [`vitals`]: Samples, status classification, cards and alerts
//! - [`sparkline`]: Sparkline coordinates and rolling history buffers
//! - [`trend`]: Trend windows, aggregate series and the hydration gauge
//! - [`elapsed`]: Duration parsing and "N mins ago" / date formatting
//! - [`care`]: Appointment and consultation lists
//! - [`recommendations`]: Rotating recommendation text
//!
//! ## Data Flow
//!
//! ```text
//! VitalsRepository::fetch_vitals()
//!        │
//!        ▼
//! VitalsData { samples }
//!        │
//!        ├──▶ VitalCard (status derived from VitalProfile ranges)
//!        │
//!        └──▶ Alert (every vital outside its normal range)
//!
//! VitalsRepository::fetch_series(window)
//!        │
//!        ▼
//! TrendSeries ──▶ current_hydration() ──▶ HydrationSplit
//! ```

pub mod care;
pub mod elapsed;
pub mod profile;
pub mod recommendations;
pub mod sparkline;
pub mod trend;
pub mod vitals;

pub use care::{Appointment, CareData, Consultation};
pub use profile::{default_profiles, VitalProfile, VitalRange};
pub use recommendations::Recommendations;
pub use sparkline::{sparkline_coordinates, RollingHistory, SparklineFrame};
pub use trend::{
    current_hydration, hydration_gauge_split, AggregatePoint, HydrationSplit, Metric,
    TrendSeries, TrendWindow, DEFAULT_HYDRATION,
};
pub use vitals::{
    Alert, StatusCounts, VitalCard, VitalSample, VitalStatus, VitalValue, VitalsData,
    PLACEHOLDER,
};
