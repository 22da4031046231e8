//! Error types for Color Rating core.

use thiserror::Error;

/// Errors returned by the animation runner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimationError {
    /// The animation target is missing: it has been dropped or has no id.
    #[error("invalid animation target: {reason}")]
    InvalidTarget {
        /// Why the target was rejected.
        reason: String,
    },

    /// The runner was created outside of a Tokio runtime.
    #[error("no tokio runtime available to drive animation ticks")]
    NoRuntime,
}

impl AnimationError {
    pub(crate) fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            reason: reason.into(),
        }
    }
}

/// Errors that can occur while loading an [`AnimationConfig`](crate::AnimationConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration text is not valid TOML for this schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// A specialized Result type for animation operations.
pub type Result<T> = std::result::Result<T, AnimationError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
