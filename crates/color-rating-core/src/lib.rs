//! Core systems for Color Rating.
//!
//! This crate provides the building blocks the rating widget is made of:
//!
//! - **Color**: RGBA values and per-channel interpolation
//! - **Easing**: curves that shape animation progress
//! - **Property/Signal**: observable values with change notification
//! - **Animation runner**: time-driven color animations keyed by
//!   `(target, handle)`, with awaitable completion and cancellation
//! - **Configuration**: tick cadence and animation defaults, loadable from TOML
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use color_rating_core::{AnimationConfig, AnimationRunner, Color, ColorTarget, Property};
//!
//! struct Frame {
//!     background: Property<Color>,
//! }
//!
//! impl ColorTarget for Frame {
//!     fn target_id(&self) -> &str {
//!         "frame"
//!     }
//!     fn color(&self) -> Color {
//!         self.background.get()
//!     }
//!     fn set_color(&self, color: Color) {
//!         self.background.set(color);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let runner = AnimationRunner::new(AnimationConfig::default())?;
//!     let frame = Arc::new(Frame { background: Property::new(Color::EMPTY_SWATCH) });
//!
//!     let finished = runner.color_to(&frame, Color::from_rgb8(27, 125, 185))?.await;
//!     assert!(finished);
//!     Ok(())
//! }
//! ```

pub mod animation;
mod cancel;
pub mod color;
pub mod config;
pub mod easing;
mod error;
pub mod logging;
pub mod property;
pub mod signal;
pub mod target;

pub use animation::{AnimationCompletion, AnimationRequest, AnimationRunner};
pub use color::{Color, interpolate};
pub use config::AnimationConfig;
pub use easing::Easing;
pub use error::{AnimationError, ConfigError, ConfigResult, Result};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use target::{AnimationHandle, ColorTarget};
