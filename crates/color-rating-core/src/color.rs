//! Color type and channel interpolation.
//!
//! All four channels are stored as `f32` normalized to the `0.0..=1.0` range,
//! including alpha. Use [`Color::from_rgb8`] / [`Color::from_hex`] to build
//! colors from the familiar 0-255 notation and [`Color::to_rgba8`] to read
//! them back.
//!
//! # Interpolation
//!
//! [`interpolate`] lerps each channel independently and never clamps, so
//! progress values outside `0.0..=1.0` extrapolate. Callers that need a
//! representable color afterwards should use [`Color::clamped`].
//!
//! ```
//! use color_rating_core::color::{interpolate, Color};
//!
//! let gray = Color::from_rgb8(51, 51, 51);
//! let red = Color::from_rgb8(189, 44, 51);
//!
//! assert_eq!(interpolate(gray, red, 0.0), gray);
//! assert_eq!(interpolate(gray, red, 1.0).to_rgba8(), red.to_rgba8());
//! ```

use std::fmt;

/// An RGBA color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create a new color from RGBA components (0.0-1.0 range).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB components.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from 8-bit RGBA components (0-255 range).
    #[inline]
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create an opaque color from 8-bit RGB components.
    #[inline]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Create a color from a hex string (e.g., "bd2c33", "#bd2c33" or "#bd2c33ff").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let len = hex.len();

        if (len != 6 && len != 8) || !hex.is_ascii() {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        let a = if len == 8 {
            u8::from_str_radix(&hex[6..8], 16).ok()?
        } else {
            255
        };

        Some(Self::from_rgba8(r, g, b, a))
    }

    /// Linear interpolation between two colors.
    ///
    /// Equivalent to [`interpolate(self, other, t)`](interpolate).
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        interpolate(self, other, t)
    }

    /// Clamp every channel into the `0.0..=1.0` range.
    ///
    /// NaN channels become `0.0`.
    #[inline]
    pub fn clamped(self) -> Self {
        fn clamp(v: f32) -> f32 {
            if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
        }
        Self {
            r: clamp(self.r),
            g: clamp(self.g),
            b: clamp(self.b),
            a: clamp(self.a),
        }
    }

    /// Whether every channel already lies in `0.0..=1.0`.
    #[inline]
    pub fn is_in_range(&self) -> bool {
        self.to_array().iter().all(|c| (0.0..=1.0).contains(c))
    }

    /// Convert to 8-bit RGBA components, rounding and clamping each channel.
    pub fn to_rgba8(self) -> [u8; 4] {
        let c = self.clamped();
        [
            (c.r * 255.0).round() as u8,
            (c.g * 255.0).round() as u8,
            (c.b * 255.0).round() as u8,
            (c.a * 255.0).round() as u8,
        ]
    }

    /// Convert to an array [r, g, b, a].
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    // Common colors
    pub const BLACK: Self = Self::from_rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::from_rgb(1.0, 1.0, 1.0);
    /// Neutral gray of an unselected rating swatch.
    pub const EMPTY_SWATCH: Self = Self::from_rgb8(51, 51, 51);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            write!(f, "#{r:02x}{g:02x}{b:02x}")
        } else {
            write!(f, "#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

/// Interpolate each channel of `start` towards `end` by `progress`.
///
/// `result = start + (end - start) * progress` for R, G, B and A. The
/// progress is not clamped, so overshooting easings extrapolate past `end`.
#[inline]
pub fn interpolate(start: Color, end: Color, progress: f32) -> Color {
    Color {
        r: start.r + (end.r - start.r) * progress,
        g: start.g + (end.g - start.g) * progress,
        b: start.b + (end.b - start.b) * progress,
        a: start.a + (end.a - start.a) * progress,
    }
}
