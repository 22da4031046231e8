//! The five rating levels and the widget's fixed texts.

use color_rating_core::Color;

/// Lowest selectable rating.
pub const MIN_RATING: u8 = 1;

/// Highest selectable rating, also the number of swatches.
pub const MAX_RATING: u8 = 5;

/// Number of swatches in the selector.
pub const SWATCH_COUNT: usize = MAX_RATING as usize;

/// Caption shown before the first tap.
pub const PROMPT: &str = "Please give a rating";

/// Label of the submit button.
pub const SUBMIT_TEXT: &str = "Submit";

/// Title of the page hosting the selector.
pub const PAGE_TITLE: &str = "Color Rating";

/// Background of the page hosting the selector.
pub const PAGE_BACKGROUND: Color = Color::from_rgb8(85, 85, 85);

/// Outline drawn around every swatch.
pub const SWATCH_OUTLINE: Color = Color::from_rgb8(136, 136, 136);

/// One rating level: its value, swatch color and caption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingLevel {
    pub value: u8,
    pub color: Color,
    pub caption: &'static str,
}

/// All levels, lowest first.
pub const LEVELS: [RatingLevel; SWATCH_COUNT] = [
    RatingLevel {
        value: 1,
        color: Color::from_rgb8(0xbd, 0x2c, 0x33),
        caption: "This is just a piece of crap...",
    },
    RatingLevel {
        value: 2,
        color: Color::from_rgb8(0xe4, 0x94, 0x20),
        caption: "Nothing too new or interesting",
    },
    RatingLevel {
        value: 3,
        color: Color::from_rgb8(0xec, 0xdb, 0x00),
        caption: "Not bad, I like it",
    },
    RatingLevel {
        value: 4,
        color: Color::from_rgb8(0x3b, 0xad, 0x54),
        caption: "I would like to see more of this",
    },
    RatingLevel {
        value: 5,
        color: Color::from_rgb8(0x1b, 0x7d, 0xb9),
        caption: "This is the best thing I've seen!",
    },
];

/// Look up a level by value. Returns `None` outside `1..=5`.
pub fn level(value: u8) -> Option<&'static RatingLevel> {
    if (MIN_RATING..=MAX_RATING).contains(&value) {
        LEVELS.get(usize::from(value - MIN_RATING))
    } else {
        None
    }
}
