//! Layered dashboard configuration.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `VITALWATCH_*` environment variables. Nested keys use `__`, so
//! `VITALWATCH_SPARKLINE__WIDTH=120` overrides `sparkline.width`.
//!
//! ```toml
//! default_hydration = 65
//! load_latency_ms = 300
//!
//! [sparkline]
//! width = 120.0
//!
//! [[profiles]]
//! id = "heart-rate"
//! name = "Heart Rate"
//! unit = "bpm"
//! normal_range = [55.0, 95.0]
//! warning_range = [45.0, 115.0]
//! ```

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::data::{default_profiles, SparklineFrame, VitalProfile, DEFAULT_HYDRATION};
use crate::error::Result;

const ENV_PREFIX: &str = "VITALWATCH";

/// Static dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Hydration percentage shown when a window has no data.
    pub default_hydration: u8,
    /// Simulated latency of a trend window load.
    pub load_latency_ms: u64,
    /// How often vitals are re-fetched.
    pub refresh_secs: u64,
    /// How often the recommendation text rotates.
    pub rotation_secs: u64,
    pub sparkline: SparklineFrame,
    /// The range table. Replaces the built-in table entirely when set.
    pub profiles: Vec<VitalProfile>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_hydration: DEFAULT_HYDRATION,
            load_latency_ms: 800,
            refresh_secs: 5,
            rotation_secs: 10,
            sparkline: SparklineFrame::default(),
            profiles: default_profiles(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the optional file and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::build(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn build(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                env.prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut loaded: DashboardConfig = config.try_deserialize()?;
        if loaded.default_hydration > 100 {
            warn!(
                configured = loaded.default_hydration,
                "default_hydration above 100, capping"
            );
            loaded.default_hydration = 100;
        }
        if loaded.refresh_secs == 0 {
            warn!("refresh_secs of 0 would refresh on every frame, using 1");
            loaded.refresh_secs = 1;
        }
        Ok(loaded)
    }

    pub fn load_latency(&self) -> Duration {
        Duration::from_millis(self.load_latency_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    pub fn rotation_interval(&self) -> Duration {
        Duration::from_secs(self.rotation_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn empty_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::build(None, empty_env()).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.default_hydration, 70);
        assert_eq!(config.load_latency(), Duration::from_millis(800));
        assert_eq!(config.profiles.len(), 4);
    }

    #[test]
    fn test_file_overrides() {
        let file = toml_file(
            r#"
default_hydration = 65
load_latency_ms = 300

[sparkline]
width = 120.0

[[profiles]]
id = "heart-rate"
name = "Heart Rate"
unit = "bpm"
normal_range = [55.0, 95.0]
warning_range = [45.0, 115.0]
"#,
        );

        let config = DashboardConfig::build(Some(file.path()), empty_env()).unwrap();
        assert_eq!(config.default_hydration, 65);
        assert_eq!(config.load_latency_ms, 300);
        assert_eq!(config.refresh_secs, 5);
        assert_eq!(config.sparkline.width, 120.0);
        assert_eq!(config.sparkline.height, 20.0);
        assert_eq!(config.profiles.len(), 1);
        assert_eq!(config.profiles[0].normal_range.high(), 95.0);
        assert_eq!(config.profiles[0].icon, "");
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file("rotation_secs = 30\n");
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([
            ("VITALWATCH_ROTATION_SECS".to_string(), "3".to_string()),
            ("VITALWATCH_SPARKLINE__PADDING".to_string(), "4".to_string()),
        ])));

        let config = DashboardConfig::build(Some(file.path()), env).unwrap();
        assert_eq!(config.rotation_interval(), Duration::from_secs(3));
        assert_eq!(config.sparkline.padding, 4.0);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let file = toml_file(
            r#"
[[profiles]]
id = "spo2"
name = "SpO2"
unit = "%"
normal_range = [100.0, 95.0]
warning_range = [90.0, 94.0]
"#,
        );
        assert!(DashboardConfig::build(Some(file.path()), empty_env()).is_err());
    }

    #[test]
    fn test_hydration_capped() {
        let file = toml_file("default_hydration = 150\n");
        let config = DashboardConfig::build(Some(file.path()), empty_env()).unwrap();
        assert_eq!(config.default_hydration, 100);
    }

    #[test]
    fn test_zero_refresh_clamped() {
        let file = toml_file("refresh_secs = 0\n");
        let config = DashboardConfig::build(Some(file.path()), empty_env()).unwrap();
        assert_eq!(config.refresh_interval(), Duration::from_secs(1));

        let env = Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([(
            "VITALWATCH_REFRESH_SECS".to_string(),
            "0".to_string(),
        )])));
        let config = DashboardConfig::build(None, env).unwrap();
        assert_eq!(config.refresh_secs, 1);
    }

    #[test]
    fn test_missing_file_is_error() {
        let missing = Path::new("/nonexistent/vitalwatch.toml");
        assert!(DashboardConfig::build(Some(missing), empty_env()).is_err());
    }
}
