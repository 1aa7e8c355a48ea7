/*
 *  fonts.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Sized fonts built from the embedded-graphics mono faces
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
    mono_font::{
        ascii::{
            FONT_4X6, FONT_5X7, FONT_5X8, FONT_6X9, FONT_6X10, FONT_6X12, FONT_6X13,
            FONT_7X13, FONT_7X14, FONT_8X13, FONT_9X15, FONT_9X18, FONT_10X20,
        },
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Rectangle,
    text::{Baseline, Text},
};
use core::convert::Infallible;
use std::cmp::Reverse;

use crate::display::BitmapLayer;
use crate::error::BadgeError;

/// A font loaded at one pixel size
pub trait Font {
    /// Nominal pixel size the font was loaded at
    fn size(&self) -> u32;

    /// Horizontal advance of `ch` in pixels
    fn advance_width(&self, ch: char) -> u32;

    /// Rendered height of `reference` in pixels
    fn line_height(&self, reference: char) -> u32;

    /// Draw `text` with its top-left corner at `origin`
    fn draw_string(&self, layer: &mut BitmapLayer, origin: Point, text: &str, color: BinaryColor);
}

/// Where sized fonts come from
pub trait FontSource: Send {
    fn load(&self, size: u32) -> Result<Box<dyn Font>, BadgeError>;
}

/// Largest integer blow-up applied to a bitmap face
const MAX_MAGNIFY: u32 = 4;

// ordered by height; on a tie the later (wider) face wins
static FACES: [&MonoFont<'static>; 13] = [
    &FONT_4X6, &FONT_5X7, &FONT_5X8, &FONT_6X9, &FONT_6X10, &FONT_6X12,
    &FONT_6X13, &FONT_7X13, &FONT_8X13, &FONT_7X14, &FONT_9X15, &FONT_9X18,
    &FONT_10X20,
];

/// Serves every size by picking the bitmap face and integer magnification
/// whose rendered height comes closest to the request without exceeding it.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonoFontSource;

impl FontSource for MonoFontSource {
    fn load(&self, size: u32) -> Result<Box<dyn Font>, BadgeError> {
        let best = FACES
            .iter()
            .flat_map(|&face| {
                let h = face.character_size.height;
                (1..=MAX_MAGNIFY)
                    .filter(move |k| h * k <= size)
                    .map(move |k| (face, k))
            })
            .max_by_key(|&(face, k)| (face.character_size.height * k, Reverse(k)));

        match best {
            Some((face, factor)) => Ok(Box::new(MagnifiedFont { face, factor, size })),
            None => Err(BadgeError::Font { size }),
        }
    }
}

/// A mono face drawn at an integer scale
#[derive(Clone, Copy)]
pub struct MagnifiedFont {
    face: &'static MonoFont<'static>,
    factor: u32,
    size: u32,
}

impl MagnifiedFont {
    pub fn factor(&self) -> u32 { self.factor }
}

impl Font for MagnifiedFont {
    fn size(&self) -> u32 {
        self.size
    }

    fn advance_width(&self, _ch: char) -> u32 {
        (self.face.character_size.width + self.face.character_spacing) * self.factor
    }

    fn line_height(&self, _reference: char) -> u32 {
        self.face.character_size.height * self.factor
    }

    fn draw_string(&self, layer: &mut BitmapLayer, origin: Point, text: &str, color: BinaryColor) {
        let style = MonoTextStyle::new(self.face, color);
        let mut canvas = Magnified { layer, origin, factor: self.factor as i32 };
        Text::with_baseline(text, Point::zero(), style, Baseline::Top)
            .draw(&mut canvas)
            .unwrap_or_else(|never| match never {});
    }
}

/// Draw target that blows every pixel up into a `factor` x `factor` block,
/// anchored at `origin` on the underlying layer.
struct Magnified<'a> {
    layer: &'a mut BitmapLayer,
    origin: Point,
    factor: i32,
}

impl Dimensions for Magnified<'_> {
    fn bounding_box(&self) -> Rectangle {
        let k = self.factor;
        let size = self.layer.size();
        let top_left = Point::new(
            (-self.origin.x).div_euclid(k),
            (-self.origin.y).div_euclid(k),
        );
        Rectangle::new(top_left, Size::new(size.width / k as u32 + 2, size.height / k as u32 + 2))
    }
}

impl DrawTarget for Magnified<'_> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let k = self.factor;
        for Pixel(p, color) in pixels {
            let corner = self.origin + Point::new(p.x * k, p.y * k);
            for dy in 0..k {
                for dx in 0..k {
                    self.layer.set_pixel(corner + Point::new(dx, dy), color);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_sizes() {
        let fonts = MonoFontSource;
        assert_eq!(fonts.load(8).unwrap().line_height('a'), 8);
        assert_eq!(fonts.load(20).unwrap().line_height('a'), 20);
        assert_eq!(fonts.load(24).unwrap().line_height('a'), 24);
        assert_eq!(fonts.load(32).unwrap().line_height('a'), 32);
    }

    #[test]
    fn test_height_never_exceeds_request() {
        let fonts = MonoFontSource;
        for size in 6..=40 {
            let font = fonts.load(size).unwrap();
            assert!(font.line_height('a') <= size, "size {}", size);
            assert_eq!(font.size(), size);
        }
    }

    #[test]
    fn test_too_small() {
        assert!(matches!(MonoFontSource.load(5), Err(BadgeError::Font { size: 5 })));
        assert!(MonoFontSource.load(0).is_err());
    }

    #[test]
    fn test_advance_is_uniform() {
        let font = MonoFontSource.load(20).unwrap();
        assert_eq!(font.advance_width('i'), font.advance_width('W'));
        assert_eq!(font.advance_width('a'), 10);
    }

    #[test]
    fn test_draw_string_magnifies() {
        let plain = MonoFontSource.load(10).unwrap();
        let mut small = BitmapLayer::new(64, 32);
        plain.draw_string(&mut small, Point::new(0, 0), "H", BinaryColor::On);

        let mut big = BitmapLayer::new(64, 32);
        let magnified = MagnifiedFont { face: &FONT_6X10, factor: 2, size: 20 };
        magnified.draw_string(&mut big, Point::new(0, 0), "H", BinaryColor::On);

        assert!(small.count_colored() > 0);
        assert_eq!(big.count_colored(), 4 * small.count_colored());
    }

    #[test]
    fn test_draw_string_at_origin() {
        let font = MonoFontSource.load(10).unwrap();
        let mut layer = BitmapLayer::new(64, 32);
        font.draw_string(&mut layer, Point::new(20, 10), "H", BinaryColor::On);
        for y in 0..10 {
            assert_eq!(layer.count_colored_in_row(y, 0, 64), 0);
        }
        for y in 0..32 {
            assert_eq!(layer.count_colored_in_row(y, 0, 20), 0);
        }
    }
}
