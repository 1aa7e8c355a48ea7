//! Font sizing and horizontal placement. No drawing happens here.

use crate::error::BadgeError;
use crate::fonts::{Font, FontSource};

/// Largest size tried when shrinking text to fit
pub const MAX_FONT_SIZE: u32 = 32;
/// Floor for shrinking; text at this size may still overflow
pub const MIN_FONT_SIZE: u32 = 8;

/// Total advance of `text` in pixels
pub fn text_width(font: &dyn Font, text: &str) -> i32 {
    text.chars().map(|ch| font.advance_width(ch) as i32).sum()
}

/// Largest size in `(min_size, max_size]` whose rendering of `text` is
/// strictly narrower than `target_width`, or `min_size` when nothing fits.
pub fn scaled_font_within(
    fonts: &dyn FontSource,
    text: &str,
    target_width: i32,
    max_size: u32,
    min_size: u32,
) -> Result<Box<dyn Font>, BadgeError> {
    for size in (min_size + 1..=max_size).rev() {
        let font = fonts.load(size)?;
        if text_width(font.as_ref(), text) < target_width {
            return Ok(font);
        }
    }
    fonts.load(min_size)
}

pub fn scaled_font(
    fonts: &dyn FontSource,
    text: &str,
    target_width: i32,
) -> Result<Box<dyn Font>, BadgeError> {
    scaled_font_within(fonts, text, target_width, MAX_FONT_SIZE, MIN_FONT_SIZE)
}

/// Start x that centers `text` on a panel `display_width` wide.
/// Goes negative for text wider than the panel.
pub fn centered_x(display_width: u32, font: &dyn Font, text: &str) -> i32 {
    display_width as i32 / 2 - text_width(font, text) / 2
}
