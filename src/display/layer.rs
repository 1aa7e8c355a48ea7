/*
 *  display/layer.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Packed 1-bit planes for the bicolor e-paper panel
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use std::fmt::Write;

/// One display-sized monochrome plane, 8 pixels per byte, MSB first.
///
/// A set bit is a *colored* (inked) pixel. The panel itself wants the
/// opposite polarity, see [`BitmapLayer::to_panel_bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapLayer {
    bits: Vec<u8>,
    w: usize,
    h: usize,
}

impl BitmapLayer {
    /// Create a blank (all uncolored) layer
    pub fn new(width: u32, height: u32) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { bits: vec![0; (w * h).div_ceil(8)], w, h }
    }

    pub fn width(&self) -> u32 { self.w as u32 }
    pub fn height(&self) -> u32 { self.h as u32 }

    /// Map (x,y) to (byte index, bit mask); None if out of bounds
    #[inline]
    fn locate(&self, p: Point) -> Option<(usize, u8)> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                let i = y * self.w + x;
                return Some((i / 8, 0x80 >> (i % 8)));
            }
        }
        None
    }

    /// Set a single pixel, silently clipping anything off-panel
    #[inline]
    pub fn set_pixel(&mut self, p: Point, color: BinaryColor) {
        if let Some((byte, mask)) = self.locate(p) {
            match color {
                BinaryColor::On => self.bits[byte] |= mask,
                BinaryColor::Off => self.bits[byte] &= !mask,
            }
        }
    }

    pub fn is_colored(&self, x: u32, y: u32) -> bool {
        self.locate(Point::new(x as i32, y as i32))
            .map(|(byte, mask)| self.bits[byte] & mask != 0)
            .unwrap_or(false)
    }

    pub fn fill(&mut self, color: BinaryColor) {
        self.bits.fill(if color.is_on() { 0xFF } else { 0x00 });
    }

    pub fn count_colored(&self) -> usize {
        (0..self.h)
            .flat_map(|y| (0..self.w).map(move |x| (x as u32, y as u32)))
            .filter(|&(x, y)| self.is_colored(x, y))
            .count()
    }

    /// Number of colored pixels in row `y`, from `x0` (inclusive) to `x1` (exclusive)
    pub fn count_colored_in_row(&self, y: u32, x0: u32, x1: u32) -> usize {
        (x0..x1.min(self.w as u32)).filter(|&x| self.is_colored(x, y)).count()
    }

    /// Logical packed bits (set = colored)
    pub fn as_bytes(&self) -> &[u8] { &self.bits }

    /// Packed bits in panel polarity: a cleared bit inks the pixel, so a
    /// blank layer is all 0xFF.
    pub fn to_panel_bytes(&self) -> Vec<u8> {
        self.bits.iter().map(|b| !b).collect()
    }

    /// Plain (P1) portable bitmap, 1 = colored
    pub fn to_pbm(&self) -> String {
        let mut out = String::with_capacity(self.w * self.h * 2 + 16);
        let _ = writeln!(out, "P1");
        let _ = writeln!(out, "{} {}", self.w, self.h);
        for y in 0..self.h {
            let row: Vec<&str> = (0..self.w)
                .map(|x| if self.is_colored(x as u32, y as u32) { "1" } else { "0" })
                .collect();
            let _ = writeln!(out, "{}", row.join(" "));
        }
        out
    }
}

impl OriginDimensions for BitmapLayer {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl DrawTarget for BitmapLayer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            self.set_pixel(p, c);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

/// The two planes handed to the panel per draw.
///
/// `background` is the black plane, `foreground` the red one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub background: BitmapLayer,
    pub foreground: BitmapLayer,
}

impl Frame {
    pub fn blank(size: Size) -> Self {
        Self {
            background: BitmapLayer::new(size.width, size.height),
            foreground: BitmapLayer::new(size.width, size.height),
        }
    }

    pub fn size(&self) -> Size {
        self.background.size()
    }
}
