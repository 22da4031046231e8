//! The rating selector controller.
//!
//! [`RatingSelector`] owns the five swatches and the state around them: the
//! selected rating, the caption under the column and whether the submit
//! button is enabled. Tapping a swatch updates that state at once and starts
//! the swatch color transition; submitting produces the confirmation prompt.
//!
//! # Example
//!
//! ```no_run
//! use color_rating::RatingSelector;
//! use color_rating_core::{AnimationConfig, AnimationRunner};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let selector = RatingSelector::new(AnimationRunner::new(AnimationConfig::default())?);
//! selector.caption_changed.connect(|caption| println!("{caption}"));
//!
//! let outcome = selector.tap(4)?.await;
//! assert!(outcome.all_completed());
//!
//! if let Some(prompt) = selector.submit() {
//!     println!("{}: {}", prompt.title, prompt.message);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use color_rating_core::logging::targets;
use color_rating_core::{AnimationRunner, Color, Property, Signal};

use crate::error::{RatingError, Result};
use crate::policy::{GroupCompletion, RatingColorPolicy};
use crate::rating::{self, PAGE_BACKGROUND, PAGE_TITLE, PROMPT, SUBMIT_TEXT, SWATCH_COUNT};
use crate::swatch::{Swatch, swatch_column};

/// The alert shown after submitting a rating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPrompt {
    pub title: String,
    pub message: String,
    pub dismiss: String,
}

impl SubmitPrompt {
    fn for_rating(rating: u8) -> Self {
        Self {
            title: "Thanks!".to_string(),
            message: format!("You rated this {rating}/5"),
            dismiss: "OK".to_string(),
        }
    }
}

/// A five-level color rating selector.
pub struct RatingSelector {
    runner: AnimationRunner,
    policy: RatingColorPolicy,
    swatches: [Arc<Swatch>; SWATCH_COUNT],
    selected: Property<Option<u8>>,
    caption: Property<String>,
    submit_enabled: Property<bool>,

    /// Emitted with the new caption text.
    pub caption_changed: Signal<String>,
    /// Emitted when the submit button becomes enabled or disabled.
    pub submit_enabled_changed: Signal<bool>,
    /// Emitted with the rating on every accepted tap.
    pub rated: Signal<u8>,
    /// Emitted with the rating when it is submitted.
    pub submitted: Signal<u8>,
}

impl RatingSelector {
    /// Create a selector with no rating, driving its swatches with `runner`.
    pub fn new(runner: AnimationRunner) -> Self {
        Self::with_policy(runner, RatingColorPolicy::default())
    }

    /// Create a selector with a custom color policy.
    pub fn with_policy(runner: AnimationRunner, policy: RatingColorPolicy) -> Self {
        Self {
            runner,
            policy,
            swatches: swatch_column(),
            selected: Property::new(None),
            caption: Property::new(PROMPT.to_string()),
            submit_enabled: Property::new(false),
            caption_changed: Signal::new(),
            submit_enabled_changed: Signal::new(),
            rated: Signal::new(),
            submitted: Signal::new(),
        }
    }

    /// Select `rating` and animate the swatches to match.
    ///
    /// The caption, selection and submit state are updated before this
    /// returns. The returned future resolves when the color transition ends;
    /// a later tap cancels it, resolving every entry `false`.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::InvalidRating`] outside `1..=5`; the selector is
    /// left unchanged.
    pub fn tap(&self, rating: u8) -> Result<GroupCompletion> {
        let level = rating::level(rating).ok_or(RatingError::InvalidRating(rating))?;
        tracing::debug!(target: targets::WIDGET, rating, "swatch tapped");

        self.selected.set(Some(rating));
        if self.caption.set(level.caption.to_string()) {
            self.caption_changed.emit(level.caption.to_string());
        }
        if self.submit_enabled.set(true) {
            self.submit_enabled_changed.emit(true);
        }
        self.rated.emit(rating);

        self.policy.apply(&self.runner, &self.swatches, rating)
    }

    /// Tap the swatch whose automation id is `automation_id`.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::UnknownSwatch`] if no swatch has that id.
    pub fn tap_automation_id(&self, automation_id: &str) -> Result<GroupCompletion> {
        let swatch = self
            .swatches
            .iter()
            .find(|swatch| swatch.automation_id() == automation_id)
            .ok_or_else(|| RatingError::UnknownSwatch(automation_id.to_string()))?;
        self.tap(swatch.position())
    }

    /// Submit the current rating.
    ///
    /// Returns `None` while the submit button is disabled.
    pub fn submit(&self) -> Option<SubmitPrompt> {
        if !self.submit_enabled.get() {
            tracing::debug!(target: targets::WIDGET, "submit ignored, no rating selected");
            return None;
        }
        let rating = self.selected.get()?;
        tracing::debug!(target: targets::WIDGET, rating, "rating submitted");
        self.submitted.emit(rating);
        Some(SubmitPrompt::for_rating(rating))
    }

    /// The swatches, bottom (rating 1) first.
    pub fn swatches(&self) -> &[Arc<Swatch>; SWATCH_COUNT] {
        &self.swatches
    }

    /// The swatch for `position`, if it is in `1..=5`.
    pub fn swatch(&self, position: u8) -> Option<&Arc<Swatch>> {
        self.swatches
            .get(usize::from(position.checked_sub(1)?))
    }

    /// The selected rating, `None` before the first tap.
    pub fn selected_rating(&self) -> Option<u8> {
        self.selected.get()
    }

    /// Caption under the swatch column.
    pub fn caption(&self) -> String {
        self.caption.get()
    }

    /// Whether the submit button is enabled.
    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled.get()
    }

    /// Label of the submit button.
    pub fn submit_text(&self) -> &'static str {
        SUBMIT_TEXT
    }

    /// Title of the page hosting the selector.
    pub fn title(&self) -> &'static str {
        PAGE_TITLE
    }

    /// Background color of the page hosting the selector.
    pub fn background_color(&self) -> Color {
        PAGE_BACKGROUND
    }

    /// The runner driving the swatches.
    pub fn runner(&self) -> &AnimationRunner {
        &self.runner
    }

    /// The color policy.
    pub fn policy(&self) -> &RatingColorPolicy {
        &self.policy
    }
}

impl fmt::Debug for RatingSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingSelector")
            .field("selected", &self.selected.get())
            .field("caption", &self.caption.get())
            .field("submit_enabled", &self.submit_enabled.get())
            .field("swatches", &self.swatches)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_rating_core::{AnimationConfig, ColorTarget};
    use parking_lot::Mutex;

    fn selector() -> RatingSelector {
        RatingSelector::new(AnimationRunner::new(AnimationConfig::default()).unwrap())
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_state() {
        let selector = selector();
        assert_eq!(selector.selected_rating(), None);
        assert_eq!(selector.caption(), "Please give a rating");
        assert!(!selector.is_submit_enabled());
        assert_eq!(selector.submit_text(), "Submit");
        assert_eq!(selector.title(), "Color Rating");
        assert_eq!(selector.background_color(), Color::from_rgb8(85, 85, 85));
        assert!(selector.submit().is_none());
        assert!(
            selector
                .swatches()
                .iter()
                .all(|s| s.color() == Color::EMPTY_SWATCH)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_tap_updates_state_before_animation_ends() {
        let selector = selector();
        let captions = Arc::new(Mutex::new(Vec::new()));
        let c = captions.clone();
        selector.caption_changed.connect(move |text| c.lock().push(text.clone()));

        let group = selector.tap(2).unwrap();
        assert_eq!(selector.selected_rating(), Some(2));
        assert_eq!(selector.caption(), "Nothing too new or interesting");
        assert!(selector.is_submit_enabled());
        assert_eq!(*captions.lock(), ["Nothing too new or interesting"]);

        assert!(group.await.all_completed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_tap_leaves_state() {
        let selector = selector();
        assert!(matches!(selector.tap(0), Err(RatingError::InvalidRating(0))));
        assert!(matches!(
            selector.tap_automation_id("7"),
            Err(RatingError::UnknownSwatch(id)) if id == "7"
        ));
        assert_eq!(selector.selected_rating(), None);
        assert!(!selector.is_submit_enabled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_swatch_lookup() {
        let selector = selector();
        assert!(selector.swatch(0).is_none());
        assert!(selector.swatch(6).is_none());
        assert_eq!(selector.swatch(5).map(|s| s.position()), Some(5));
    }

    #[test]
    fn test_submit_prompt_text() {
        let prompt = SubmitPrompt::for_rating(4);
        assert_eq!(prompt.title, "Thanks!");
        assert_eq!(prompt.message, "You rated this 4/5");
        assert_eq!(prompt.dismiss, "OK");
    }
}
