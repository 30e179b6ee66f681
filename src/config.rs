//! Tracker configuration
//!
//! Loaded from an optional JSON file; every field has a default so a partial
//! file (or none at all) is valid. Command-line flags override file values.

use crate::error::{TrackerError, TrackerResult};
use crate::view::{ViewOptions, DEFAULT_MARKER_SIZE, DEFAULT_TRANSITION};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default live poll interval (120Hz)
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_micros(8_333);

/// Where rendered frames are written
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    /// Live pointer poll interval in milliseconds
    pub poll_interval_ms: f64,
    /// Marker transition duration in milliseconds
    pub transition_ms: u64,
    /// Marker edge length in pixels
    pub marker_size: f64,
    pub output: OutputFormat,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_secs_f64() * 1000.0,
            transition_ms: DEFAULT_TRANSITION.as_millis() as u64,
            marker_size: DEFAULT_MARKER_SIZE,
            output: OutputFormat::default(),
        }
    }
}

impl TrackerConfig {
    /// Load from a JSON file
    pub fn load(path: &Path) -> TrackerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TrackerConfig = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> TrackerResult<()> {
        if !self.poll_interval_ms.is_finite() || self.poll_interval_ms <= 0.0 {
            return Err(TrackerError::Configuration(format!(
                "pollIntervalMs must be positive, got {}",
                self.poll_interval_ms
            )));
        }
        self.poll_interval()?;
        if !self.marker_size.is_finite() || self.marker_size <= 0.0 {
            return Err(TrackerError::Configuration(format!(
                "markerSize must be positive, got {}",
                self.marker_size
            )));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> TrackerResult<Duration> {
        Duration::try_from_secs_f64(self.poll_interval_ms / 1000.0).map_err(|e| {
            TrackerError::Configuration(format!(
                "pollIntervalMs out of range ({}): {}",
                self.poll_interval_ms, e
            ))
        })
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            transition: Duration::from_millis(self.transition_ms),
            marker_size: self.marker_size,
        }
    }
}
