//! Mapping from a rating to swatch colors, and the grouped swatch animation.
//!
//! Swatches at or below the selected rating take the rating's color; the rest
//! return to the empty gray. All five swatches animate concurrently and the
//! caller gets one future for the whole transition.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use color_rating_core::logging::targets;
use color_rating_core::{AnimationCompletion, AnimationHandle, AnimationRunner, Color};
use futures_util::future::{JoinAll, join_all};
use pin_project_lite::pin_project;

use crate::error::{RatingError, Result};
use crate::rating::{self, SWATCH_COUNT};
use crate::swatch::Swatch;

/// Decides the target color of each swatch for a rating.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingColorPolicy {
    empty: Option<Color>,
}

impl RatingColorPolicy {
    /// Policy using [`Color::EMPTY_SWATCH`] for unselected swatches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different color for unselected swatches.
    pub fn with_empty_color(mut self, color: Color) -> Self {
        self.empty = Some(color);
        self
    }

    /// Color of swatches above the selected rating.
    pub fn empty_color(&self) -> Color {
        self.empty.unwrap_or(Color::EMPTY_SWATCH)
    }

    /// Target color for each swatch position, bottom first.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::InvalidRating`] outside `1..=5`.
    pub fn target_colors(&self, rating: u8) -> Result<[Color; SWATCH_COUNT]> {
        let level = rating::level(rating).ok_or(RatingError::InvalidRating(rating))?;
        let empty = self.empty_color();
        Ok(std::array::from_fn(|i| {
            if i < usize::from(level.value) {
                level.color
            } else {
                empty
            }
        }))
    }

    /// Animate every swatch toward its color for `rating`.
    ///
    /// The previous group is canceled for all swatches before any new run
    /// starts, so its completion resolves with every entry `false`.
    ///
    /// # Errors
    ///
    /// Returns [`RatingError::InvalidRating`] outside `1..=5`, or
    /// [`RatingError::Animation`] if a run could not be started.
    pub fn apply(
        &self,
        runner: &AnimationRunner,
        swatches: &[Arc<Swatch>; SWATCH_COUNT],
        rating: u8,
    ) -> Result<GroupCompletion> {
        let colors = self.target_colors(rating)?;

        let canceled = swatches
            .iter()
            .filter(|swatch| runner.cancel(swatch.as_ref(), &AnimationHandle::COLOR))
            .count();
        tracing::debug!(target: targets::WIDGET, rating, canceled, "applying rating colors");

        let completions = swatches
            .iter()
            .zip(colors)
            .map(|(swatch, color)| runner.color_to(swatch, color))
            .collect::<std::result::Result<Vec<AnimationCompletion>, _>>()?;

        Ok(GroupCompletion {
            inner: join_all(completions),
        })
    }
}

/// Results of one grouped swatch animation, bottom swatch first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupOutcome {
    pub results: Vec<bool>,
}

impl GroupOutcome {
    /// Whether every swatch reached its target color.
    pub fn all_completed(&self) -> bool {
        self.results.iter().all(|&completed| completed)
    }

    /// Number of swatch runs that were canceled or superseded.
    pub fn canceled(&self) -> usize {
        self.results.iter().filter(|&&completed| !completed).count()
    }
}

pin_project! {
    /// Resolves once all five swatch runs of a group have ended.
    #[must_use = "futures do nothing unless polled"]
    pub struct GroupCompletion {
        #[pin]
        inner: JoinAll<AnimationCompletion>,
    }
}

impl Future for GroupCompletion {
    type Output = GroupOutcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<GroupOutcome> {
        self.project()
            .inner
            .poll(cx)
            .map(|results| GroupOutcome { results })
    }
}

impl std::fmt::Debug for GroupCompletion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupCompletion").finish_non_exhaustive()
    }
}
