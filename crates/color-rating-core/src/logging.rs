//! Logging facilities for Color Rating.
//!
//! Color Rating uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("color_rating_core::animation=debug")
//!     .init();
//! ```

/// Span names used throughout Color Rating for tracing.
pub mod span_names {
    /// One animation run, from registration to completion or cancellation.
    pub const ANIMATION_RUN: &str = "color_rating::animation_run";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Animation runner target.
    pub const ANIMATION: &str = "color_rating_core::animation";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "color_rating_core::signal";
    /// Configuration loading target.
    pub const CONFIG: &str = "color_rating_core::config";
    /// Rating widget target.
    pub const WIDGET: &str = "color_rating::widget";
}

/// Create the span that wraps every tick of one animation run.
pub(crate) fn run_span(target_id: &str, handle: &str, run: u64) -> tracing::Span {
    tracing::debug_span!(
        target: targets::ANIMATION,
        "animation_run",
        name = span_names::ANIMATION_RUN,
        target_id,
        handle,
        run
    )
}
