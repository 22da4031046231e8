//! A five-level color-coded rating selector.
//!
//! Five stacked swatches represent the ratings 1 to 5. Tapping one animates
//! it and every swatch below it to the rating's color, returns the others to
//! the empty gray, updates the caption and enables the submit button.
//! Submitting yields a short confirmation prompt.
//!
//! Layout and platform input are left to the host: the selector exposes its
//! swatches as observable [`ColorTarget`](color_rating_core::ColorTarget)s
//! and its text state as properties with change signals.

mod error;
pub mod policy;
pub mod rating;
pub mod selector;
pub mod swatch;

pub use error::{RatingError, Result};
pub use policy::{GroupCompletion, GroupOutcome, RatingColorPolicy};
pub use rating::{LEVELS, MAX_RATING, MIN_RATING, RatingLevel};
pub use selector::{RatingSelector, SubmitPrompt};
pub use swatch::Swatch;
