//! # vitalwatch
//!
//! A terminal dashboard and library for personal vital signs.
//!
//! The crate classifies vital readings against per-vital reference ranges,
//! turns short reading histories into sparkline geometry, and aggregates
//! heart rate, SpO₂, temperature and hydration into windowed trend series.
//! Data comes from an injected [`VitalsRepository`]: built-in demo data
//! ([`MockRepository`]) or a JSON dataset ([`FileRepository`]).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         Application                          │
//! │  ┌─────────┐    ┌───────────┐    ┌─────────┐    ┌──────────┐ │
//! │  │  app    │───▶│ dashboard │───▶│   ui    │───▶│ Terminal │ │
//! │  │ (state) │    │ (facade)  │    │(render) │    │          │ │
//! │  └─────────┘    └─────┬─────┘    └─────────┘    └──────────┘ │
//! │                       │                                      │
//! │          ┌────────────┼─────────────┐                        │
//! │          ▼            ▼             ▼                        │
//! │     ┌────────┐  ┌────────────┐  ┌───────┐                    │
//! │     │  data  │  │ aggregator │─▶│ source│◀── Mock | File     │
//! │     │(models)│  │  (tokio)   │  │(input)│                    │
//! │     └────────┘  └────────────┘  └───────┘                    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`data`]**: Pure models: status classification, sparkline
//!   coordinates, trend windows, hydration split, care lists
//! - **[`source`]**: The [`VitalsRepository`] trait and its implementations
//! - **[`aggregator`]**: Window selection with background loads; stale
//!   results are discarded by generation
//! - **[`dashboard`]**: Snapshot owner used by the TUI and by export
//! - **[`config`]**: Layered configuration (defaults, TOML, environment)
//! - **[`app`]**, **[`events`]**, **[`ui`]**: The terminal front end
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Demo data
//! vitalwatch
//!
//! # A JSON dataset, starting on the 30 day window
//! vitalwatch --data vitals.json --window 30days
//!
//! # Write a snapshot and exit
//! vitalwatch --seed 42 --export snapshot.json
//! ```
//!
//! ### Classifying a sample
//!
//! ```
//! use chrono::Utc;
//! use vitalwatch::{default_profiles, VitalSample, VitalStatus};
//!
//! let profile = default_profiles()
//!     .into_iter()
//!     .find(|p| p.id == "blood-pressure")
//!     .unwrap();
//! let sample = VitalSample::new(profile, "120/80", Utc::now(), vec![118.0, 120.0]).unwrap();
//! assert_eq!(sample.classify().unwrap(), VitalStatus::Normal);
//! ```
//!
//! ### Loading a trend window
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use vitalwatch::{MockRepository, SystemClock, TrendAggregator, TrendWindow};
//!
//! # tokio_test::block_on(async {
//! let repository = Arc::new(MockRepository::seeded(1));
//! let mut trends =
//!     TrendAggregator::new(repository, Arc::new(SystemClock)).with_latency(Duration::ZERO);
//! let series = trends.series_for(TrendWindow::OneYear).await;
//! assert_eq!(series.len(), 12);
//! let split = trends.hydration_split();
//! assert_eq!(split.hydrated + split.dehydrated, 100);
//! # });
//! ```

pub mod aggregator;
pub mod app;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod events;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use aggregator::{TrendAggregator, TrendState};
pub use app::App;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardSnapshot};
pub use data::{
    default_profiles, hydration_gauge_split, sparkline_coordinates, AggregatePoint, Alert,
    HydrationSplit, SparklineFrame, TrendSeries, TrendWindow, VitalCard, VitalProfile, VitalRange,
    VitalSample, VitalStatus, VitalValue,
};
pub use error::{Error, Result};
pub use source::{Dataset, FileRepository, MockRepository, VitalsRepository};
