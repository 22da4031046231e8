//! Swatches, the five tappable color cells.

use std::fmt;
use std::sync::Arc;

use color_rating_core::{Color, ColorTarget, Property, Signal};

use crate::rating::{SWATCH_COUNT, SWATCH_OUTLINE};

/// One rating cell.
///
/// A swatch is an animation target: the runner writes its color, and every
/// change is announced on [`color_changed`](Self::color_changed).
pub struct Swatch {
    position: u8,
    automation_id: String,
    color: Property<Color>,
    /// Emitted with the new color whenever it changes.
    pub color_changed: Signal<Color>,
}

impl Swatch {
    /// Create an empty swatch at `position` (1 is the bottom cell).
    pub fn new(position: u8) -> Self {
        Self {
            position,
            automation_id: position.to_string(),
            color: Property::new(Color::EMPTY_SWATCH),
            color_changed: Signal::new(),
        }
    }

    /// Rating this swatch stands for.
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Identifier UI tests use to tap this swatch.
    pub fn automation_id(&self) -> &str {
        &self.automation_id
    }

    /// Color of the outline around the cell. It does not animate.
    pub fn outline_color(&self) -> Color {
        SWATCH_OUTLINE
    }
}

impl ColorTarget for Swatch {
    fn target_id(&self) -> &str {
        &self.automation_id
    }

    fn color(&self) -> Color {
        self.color.get()
    }

    fn set_color(&self, color: Color) {
        if self.color.set(color) {
            self.color_changed.emit(color);
        }
    }
}

impl fmt::Debug for Swatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Swatch")
            .field("position", &self.position)
            .field("color", &self.color.get())
            .finish()
    }
}

/// Build the full column of swatches, positions `1..=5`.
pub(crate) fn swatch_column() -> [Arc<Swatch>; SWATCH_COUNT] {
    std::array::from_fn(|i| Arc::new(Swatch::new(i as u8 + 1)))
}
