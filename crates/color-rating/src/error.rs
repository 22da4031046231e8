//! Error types for the rating widget.

use color_rating_core::AnimationError;
use thiserror::Error;

/// Errors raised by the rating selector.
#[derive(Debug, Error)]
pub enum RatingError {
    /// The rating is outside `1..=5`.
    #[error("invalid rating {0}, expected 1 to 5")]
    InvalidRating(u8),

    /// No swatch carries this automation id.
    #[error("no swatch with automation id {0:?}")]
    UnknownSwatch(String),

    /// A swatch animation could not be started.
    #[error("animation error: {0}")]
    Animation(#[from] AnimationError),
}

/// Result type for rating widget operations.
pub type Result<T> = std::result::Result<T, RatingError>;
