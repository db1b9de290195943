//! Runtime settings.
//!
//! Settings are layered: compiled-in defaults, then an optional TOML file,
//! then `VITALWATCH_*` environment variables. Command-line flags are applied
//! on top by the binary.
//!
//! ```toml
//! sensor_url = "http://192.168.1.3:5000"
//! poll_interval_secs = 5
//!
//! [ranges]
//! heart_rate = { min = 50, max = 110 }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use vitalwatch_adapters::{gemini, sensor};
use vitalwatch_types::NormalRanges;

/// Prefix of the environment variables read by [`Settings::load`].
pub const ENV_PREFIX: &str = "VITALWATCH";

/// Everything the dashboard needs to start.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the sensor; `/sensor-data` is appended.
    pub sensor_url: String,
    /// Full `generateContent` URL of the analysis service.
    pub ai_url: String,
    /// Sent as the `key` query parameter when set.
    pub ai_api_key: Option<String>,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub analysis_timeout_secs: u64,
    /// Figure file to load; the built-in figure is used when unset.
    pub model_path: Option<PathBuf>,
    pub log_file: PathBuf,
    pub ranges: NormalRanges,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sensor_url: sensor::DEFAULT_ENDPOINT.to_string(),
            ai_url: gemini::DEFAULT_ENDPOINT.to_string(),
            ai_api_key: None,
            poll_interval_secs: 5,
            request_timeout_secs: 10,
            analysis_timeout_secs: 60,
            model_path: None,
            log_file: PathBuf::from("vitalwatch.log"),
            ranges: NormalRanges::default(),
        }
    }
}

impl Settings {
    /// Load settings from the optional file and the environment.
    ///
    /// The result is not validated; call [`Settings::validate`] once
    /// command-line overrides have been applied.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let settings: Settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("loading configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        Ok(settings)
    }

    /// Reject settings the dashboard cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be greater than zero");
        }
        if self.request_timeout_secs == 0 || self.analysis_timeout_secs == 0 {
            bail!("timeouts must be greater than zero");
        }
        self.ranges.validate()?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }
}
