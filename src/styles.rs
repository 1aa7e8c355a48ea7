/*
 *  styles.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Bordered slogan, greeting card and image compositions
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::geometry::Size;
use log::debug;
use std::path::Path;

use crate::display::{
    draw_filled_rectangle, draw_rectangle, draw_string_at, Frame, COLORED, UNCOLORED,
};
use crate::error::BadgeError;
use crate::fonts::{Font, FontSource};
use crate::imaging::ImageConverter;
use crate::layout::{centered_x, scaled_font};

/// Size used whenever a slogan is not scaled to fit
pub const FIXED_FONT_SIZE: u32 = 32;

/// Nested 1px rectangles making up the border, as insets from the edge
pub const BORDER_INSETS: std::ops::RangeInclusive<i32> = 4..=8;
/// x for a "centered" bordered slogan, just inside the border
pub const BORDER_TEXT_MARGIN: i32 = 12;
/// Nudge applied to the computed x of a bordered slogan
pub const BORDER_TEXT_NUDGE: i32 = 4;
/// Glyph whose height positions the bordered slogan vertically
pub const REFERENCE_GLYPH: char = 'a';

pub const GREETING_CAPTION: &str = "Hello My Name Is";
pub const GREETING_CAPTION_SIZE: u32 = 24;
pub const GREETING_CAPTION_ORIGIN: (i32, i32) = (12, 12);
/// x for a "centered" greeting body
pub const GREETING_TEXT_MARGIN: i32 = 8;
/// Body baseline as a percentage of panel height
pub const GREETING_TEXT_Y_PERCENT: i32 = 66;

/// The two text layouts a slogan can be drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Bordered,
    Greeting,
}

impl Style {
    pub const ALL: [Style; 2] = [Style::Bordered, Style::Greeting];
}

fn body_font(
    fonts: &dyn FontSource,
    size: Size,
    text: &str,
    scale: bool,
) -> Result<Box<dyn Font>, BadgeError> {
    if scale {
        scaled_font(fonts, text, size.width as i32)
    } else {
        fonts.load(FIXED_FONT_SIZE)
    }
}

/// Black paper, a red five pixel border and the slogan in red.
///
/// Note `centered` picks the fixed margin; the computed (centered) x is
/// used otherwise. Slogan files in the wild are written against this.
pub fn render_bordered(
    fonts: &dyn FontSource,
    size: Size,
    text: &str,
    scale: bool,
    centered: bool,
) -> Result<Frame, BadgeError> {
    let (w, h) = (size.width as i32, size.height as i32);
    let mut frame = Frame::blank(size);

    draw_filled_rectangle(&mut frame.background, 0, 0, w, h, COLORED);
    for inset in BORDER_INSETS {
        draw_rectangle(&mut frame.foreground, inset, inset, w - inset, h - inset, COLORED);
    }

    let font = body_font(fonts, size, text, scale)?;
    let x = if centered {
        BORDER_TEXT_MARGIN
    } else {
        centered_x(size.width, font.as_ref(), text) + BORDER_TEXT_NUDGE
    };
    let y = h / 2 - font.line_height(REFERENCE_GLYPH) as i32 / 2;
    debug!("bordered '{}' size {} at ({}, {})", text, font.size(), x, y);
    draw_string_at(&mut frame.foreground, x, y, text, font.as_ref(), COLORED);

    Ok(frame)
}

/// Red top half carrying a knocked-out caption, slogan in black below.
pub fn render_greeting(
    fonts: &dyn FontSource,
    size: Size,
    text: &str,
    scale: bool,
    centered: bool,
) -> Result<Frame, BadgeError> {
    let (w, h) = (size.width as i32, size.height as i32);
    let mut frame = Frame::blank(size);

    let caption_font = fonts.load(GREETING_CAPTION_SIZE)?;
    draw_filled_rectangle(&mut frame.foreground, 0, 0, w, h / 2, COLORED);
    let (cx, cy) = GREETING_CAPTION_ORIGIN;
    draw_string_at(&mut frame.foreground, cx, cy, GREETING_CAPTION, caption_font.as_ref(), UNCOLORED);

    let font = body_font(fonts, size, text, scale)?;
    let x = if centered { GREETING_TEXT_MARGIN } else { centered_x(size.width, font.as_ref(), text) };
    let y = h * GREETING_TEXT_Y_PERCENT / 100;
    debug!("greeting '{}' size {} at ({}, {})", text, font.size(), x, y);
    draw_string_at(&mut frame.background, x, y, text, font.as_ref(), COLORED);

    Ok(frame)
}

/// Full-panel artwork on the black plane; the red plane stays blank.
pub fn render_image(
    images: &dyn ImageConverter,
    size: Size,
    path: &Path,
) -> Result<Frame, BadgeError> {
    let (w, h) = (size.width as i32, size.height as i32);
    let mut frame = Frame::blank(size);

    // The converted image replaces this fill wholesale, so it never shows.
    // Kept until the intended look is confirmed on a real panel.
    draw_filled_rectangle(&mut frame.background, 0, 0, w, h, COLORED);
    frame.background = images.frame_buffer_from_image(path, size)?;

    Ok(frame)
}
