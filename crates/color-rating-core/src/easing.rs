//! Easing functions for smooth animations.
//!
//! Easing functions map a linear progress value (0.0 to 1.0) to a transformed
//! value that creates smoother, more natural-looking animations.
//!
//! The input is always clamped to `0.0..=1.0`. The output is not: the spring
//! curves deliberately overshoot, and a [`Easing::Custom`] curve may return
//! anything.

use std::f32::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Overshoot constant shared by the spring curves.
const SPRING_OVERSHOOT: f32 = 1.70158;

/// Available easing functions.
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Linear interpolation (identity).
    #[default]
    Linear,
    /// Sinusoidal ease-in.
    SinIn,
    /// Sinusoidal ease-out.
    SinOut,
    /// Sinusoidal ease-in-out.
    SinInOut,
    /// Cubic ease-in (starts slow, accelerates).
    CubicIn,
    /// Cubic ease-out (starts fast, decelerates).
    CubicOut,
    /// Cubic ease-in-out.
    CubicInOut,
    /// Bounces at the start.
    BounceIn,
    /// Bounces at the end.
    BounceOut,
    /// Pulls back below zero before accelerating.
    SpringIn,
    /// Overshoots past one before settling.
    SpringOut,
    /// A caller-supplied curve.
    #[serde(skip)]
    Custom(fn(f32) -> f32),
}

impl Easing {
    /// Apply the easing function to a progress value.
    ///
    /// # Example
    ///
    /// ```
    /// use color_rating_core::Easing;
    ///
    /// assert_eq!(Easing::Linear.apply(0.5), 0.5);
    /// assert!(Easing::CubicIn.apply(0.5) < 0.5);
    /// assert!(Easing::CubicOut.apply(0.5) > 0.5);
    /// ```
    #[inline]
    pub fn apply(&self, t: f32) -> f32 {
        // Clamp input to valid range
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::SinIn => ease_in_sine(t),
            Easing::SinOut => ease_out_sine(t),
            Easing::SinInOut => ease_in_out_sine(t),
            Easing::CubicIn => ease_in_cubic(t),
            Easing::CubicOut => ease_out_cubic(t),
            Easing::CubicInOut => ease_in_out_cubic(t),
            Easing::BounceIn => 1.0 - bounce_out(1.0 - t),
            Easing::BounceOut => bounce_out(t),
            Easing::SpringIn => spring_in(t),
            Easing::SpringOut => spring_out(t),
            Easing::Custom(f) => f(t),
        }
    }

    /// Short name used in logs and configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::SinIn => "sin_in",
            Easing::SinOut => "sin_out",
            Easing::SinInOut => "sin_in_out",
            Easing::CubicIn => "cubic_in",
            Easing::CubicOut => "cubic_out",
            Easing::CubicInOut => "cubic_in_out",
            Easing::BounceIn => "bounce_in",
            Easing::BounceOut => "bounce_out",
            Easing::SpringIn => "spring_in",
            Easing::SpringOut => "spring_out",
            Easing::Custom(_) => "custom",
        }
    }
}

impl fmt::Debug for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<fn(f32) -> f32> for Easing {
    fn from(f: fn(f32) -> f32) -> Self {
        Easing::Custom(f)
    }
}

// =============================================================================
// Cubic Easing
// =============================================================================

#[inline]
fn ease_in_cubic(t: f32) -> f32 {
    t * t * t
}

#[inline]
fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

#[inline]
fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

// =============================================================================
// Sinusoidal Easing
// =============================================================================

#[inline]
fn ease_in_sine(t: f32) -> f32 {
    1.0 - ((t * PI) / 2.0).cos()
}

#[inline]
fn ease_out_sine(t: f32) -> f32 {
    ((t * PI) / 2.0).sin()
}

#[inline]
fn ease_in_out_sine(t: f32) -> f32 {
    -((PI * t).cos() - 1.0) / 2.0
}

// =============================================================================
// Bounce / Spring
// =============================================================================

fn bounce_out(t: f32) -> f32 {
    let n1 = 7.5625;
    let d1 = 2.75;

    if t < 1.0 / d1 {
        n1 * t * t
    } else if t < 2.0 / d1 {
        let t = t - 1.5 / d1;
        n1 * t * t + 0.75
    } else if t < 2.5 / d1 {
        let t = t - 2.25 / d1;
        n1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / d1;
        n1 * t * t + 0.984375
    }
}

#[inline]
fn spring_in(t: f32) -> f32 {
    t * t * ((SPRING_OVERSHOOT + 1.0) * t - SPRING_OVERSHOOT)
}

#[inline]
fn spring_out(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * ((SPRING_OVERSHOOT + 1.0) * t + SPRING_OVERSHOOT) + 1.0
}
