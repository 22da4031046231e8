//! Animation configuration.
//!
//! [`AnimationConfig`] carries the tick cadence and the defaults applied by
//! [`AnimationRunner::color_to`](crate::AnimationRunner::color_to). It can be
//! built in code or loaded from TOML:
//!
//! ```toml
//! tick_interval_ms = 16
//! default_duration_ms = 250
//! default_easing = "cubic_out"
//! clamp_channels = true
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::{ConfigError, ConfigResult};
use crate::logging::targets;

/// Default tick cadence, roughly 60 updates per second.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Default length of a color animation.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(250);

/// Configuration for an [`AnimationRunner`](crate::AnimationRunner).
#[derive(Debug, Clone, Copy)]
pub struct AnimationConfig {
    /// Time between two ticks of a run.
    pub tick_interval: Duration,
    /// Duration used by `color_to`.
    pub default_duration: Duration,
    /// Easing used by `color_to`.
    pub default_easing: Easing,
    /// Clamp interpolated colors into range before writing them to a target.
    pub clamp_channels: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            default_duration: DEFAULT_DURATION,
            default_easing: Easing::Linear,
            clamp_channels: true,
        }
    }
}

/// On-disk form of the configuration. Durations are in milliseconds.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    tick_interval_ms: Option<u64>,
    default_duration_ms: Option<u64>,
    default_easing: Option<Easing>,
    clamp_channels: Option<bool>,
}

impl AnimationConfig {
    /// Set the tick interval.
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Set the duration used by `color_to`.
    pub fn with_default_duration(mut self, duration: Duration) -> Self {
        self.default_duration = duration;
        self
    }

    /// Set the easing used by `color_to`.
    pub fn with_default_easing(mut self, easing: Easing) -> Self {
        self.default_easing = easing;
        self
    }

    /// Enable or disable clamping of interpolated colors.
    pub fn with_clamp_channels(mut self, clamp: bool) -> Self {
        self.clamp_channels = clamp;
        self
    }

    /// Check that the configuration can drive a runner.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let file: ConfigFile = toml::from_str(text)?;
        let defaults = Self::default();

        let config = Self {
            tick_interval: file
                .tick_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.tick_interval),
            default_duration: file
                .default_duration_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.default_duration),
            default_easing: file.default_easing.unwrap_or(defaults.default_easing),
            clamp_channels: file.clamp_channels.unwrap_or(defaults.clamp_channels),
        };
        config.validate()?;

        tracing::debug!(target: targets::CONFIG, ?config, "loaded animation config");
        Ok(config)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }
}
