/*
 *  display/draw.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Drawing primitives over a single bitmap layer
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

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};

use crate::display::layer::BitmapLayer;
use crate::fonts::Font;

/// Ink the pixel on its plane
pub const COLORED: BinaryColor = BinaryColor::On;
/// Leave (or knock out) the pixel on its plane
pub const UNCOLORED: BinaryColor = BinaryColor::Off;

/// Filled rectangle between two inclusive corners; off-panel parts are clipped.
pub fn draw_filled_rectangle(
    layer: &mut BitmapLayer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: BinaryColor,
) {
    Rectangle::with_corners(Point::new(x0, y0), Point::new(x1, y1))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(layer)
        .unwrap_or_else(|never| match never {});
}

/// 1px rectangle outline between two inclusive corners.
pub fn draw_rectangle(
    layer: &mut BitmapLayer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: BinaryColor,
) {
    Rectangle::with_corners(Point::new(x0, y0), Point::new(x1, y1))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(layer)
        .unwrap_or_else(|never| match never {});
}

/// Text with its top-left corner at (x, y).
pub fn draw_string_at(
    layer: &mut BitmapLayer,
    x: i32,
    y: i32,
    text: &str,
    font: &dyn Font,
    color: BinaryColor,
) {
    font.draw_string(layer, Point::new(x, y), text, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_rectangle_corners_are_inclusive() {
        let mut layer = BitmapLayer::new(16, 16);
        draw_filled_rectangle(&mut layer, 2, 2, 5, 5, COLORED);
        assert_eq!(layer.count_colored(), 16);
        assert!(layer.is_colored(5, 5));
        assert!(!layer.is_colored(6, 5));
    }

    #[test]
    fn test_filled_rectangle_clips_past_the_edge() {
        let mut layer = BitmapLayer::new(8, 8);
        draw_filled_rectangle(&mut layer, 0, 0, 8, 8, COLORED);
        assert_eq!(layer.count_colored(), 64);
    }

    #[test]
    fn test_outline_only_touches_the_edge() {
        let mut layer = BitmapLayer::new(16, 16);
        draw_rectangle(&mut layer, 4, 4, 11, 11, COLORED);
        assert!(layer.is_colored(4, 4));
        assert!(layer.is_colored(11, 7));
        assert!(!layer.is_colored(7, 7));
        assert_eq!(layer.count_colored(), 28);
    }

    #[test]
    fn test_uncolored_knocks_out_pixels() {
        let mut layer = BitmapLayer::new(8, 8);
        draw_filled_rectangle(&mut layer, 0, 0, 7, 7, COLORED);
        draw_filled_rectangle(&mut layer, 0, 0, 1, 1, UNCOLORED);
        assert_eq!(layer.count_colored(), 60);
    }
}
