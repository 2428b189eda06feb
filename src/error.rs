//! Error types for the vitals model and its sources.

use thiserror::Error;

/// Errors raised while building, classifying or loading vitals data.
///
/// Every variant is recoverable: display code substitutes a placeholder
/// (see [`crate::data::PLACEHOLDER`]) or a configured default instead of
/// propagating the error to the renderer.
#[derive(Debug, Error)]
pub enum Error {
    /// A composite value such as `"120/80"` has a non-numeric first component.
    #[error("invalid sample format: {0:?}")]
    InvalidSampleFormat(String),

    /// No aggregate points are available for the requested window.
    #[error("no trend data for window {0}")]
    EmptySeries(&'static str),

    /// A range whose low bound is above its high bound.
    #[error("invalid range [{low}, {high}]")]
    InvalidRange { low: f64, high: f64 },

    /// A sample was constructed without any history readings.
    #[error("vital {0:?} has an empty history")]
    EmptyHistory(String),

    /// A trend window name that is not one of `7days`, `30days`, `1year`.
    #[error("unknown trend window {0:?}")]
    UnknownWindow(String),

    /// Reading a data file failed.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    /// A data file could not be parsed.
    #[error("parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Layered configuration could not be built or deserialized.
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;
