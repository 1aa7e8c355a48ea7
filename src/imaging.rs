/*
 *  imaging.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Converts PNG and SVG artwork into a panel plane
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
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::Point;
use log::debug;
use std::fs;
use std::path::Path;
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

use crate::display::BitmapLayer;
use crate::error::BadgeError;

/// Turns an image file into a panel-sized plane
pub trait ImageConverter: Send {
    fn frame_buffer_from_image(&self, path: &Path, size: Size) -> Result<BitmapLayer, BadgeError>;
}

/// Rasterizes with tiny-skia / resvg, scales the artwork to fit the panel
/// keeping its aspect ratio, centers it on white paper and thresholds the
/// luminance: anything darker than `threshold` is inked.
#[derive(Debug, Clone, Copy)]
pub struct PixmapConverter {
    threshold: u8,
}

impl Default for PixmapConverter {
    fn default() -> Self {
        Self { threshold: 128 }
    }
}

impl PixmapConverter {
    pub fn with_threshold(threshold: u8) -> Self {
        Self { threshold }
    }

    fn image_error(path: &Path, reason: impl ToString) -> BadgeError {
        BadgeError::Image { path: path.to_path_buf(), reason: reason.to_string() }
    }

    /// Scale + translation placing a `src_w` x `src_h` image centered in `size`
    fn letterbox(src_w: f32, src_h: f32, size: Size) -> Transform {
        let (w, h) = (size.width as f32, size.height as f32);
        let scale = (w / src_w).min(h / src_h);
        let tx = (w - src_w * scale) / 2.0;
        let ty = (h - src_h * scale) / 2.0;
        Transform::from_translate(tx, ty).pre_scale(scale, scale)
    }

    fn paper(path: &Path, size: Size) -> Result<Pixmap, BadgeError> {
        let mut paper = Pixmap::new(size.width, size.height)
            .ok_or_else(|| Self::image_error(path, "cannot allocate pixmap"))?;
        paper.fill(Color::WHITE);
        Ok(paper)
    }

    fn render_svg(path: &Path, size: Size) -> Result<Pixmap, BadgeError> {
        let data = fs::read(path).map_err(|e| BadgeError::io(path, e))?;
        let tree = usvg::Tree::from_data(&data, &usvg::Options::default())
            .map_err(|e| Self::image_error(path, e))?;

        let svg_size = tree.size();
        let transform = Self::letterbox(svg_size.width(), svg_size.height(), size);
        let mut paper = Self::paper(path, size)?;
        resvg::render(&tree, transform, &mut paper.as_mut());
        Ok(paper)
    }

    fn render_png(path: &Path, size: Size) -> Result<Pixmap, BadgeError> {
        let source = Pixmap::load_png(path).map_err(|e| Self::image_error(path, e))?;
        let transform = Self::letterbox(source.width() as f32, source.height() as f32, size);
        let paint = PixmapPaint { quality: FilterQuality::Bilinear, ..PixmapPaint::default() };

        let mut paper = Self::paper(path, size)?;
        paper.draw_pixmap(0, 0, source.as_ref(), &paint, transform, None);
        Ok(paper)
    }

    fn threshold(&self, pixmap: &Pixmap) -> BitmapLayer {
        let (w, h) = (pixmap.width(), pixmap.height());
        let mut layer = BitmapLayer::new(w, h);
        for (i, p) in pixmap.pixels().iter().enumerate() {
            // composited onto opaque white, so premultiplied == straight
            let luminance = 0.299 * p.red() as f32 + 0.587 * p.green() as f32 + 0.114 * p.blue() as f32;
            if luminance < self.threshold as f32 {
                let (x, y) = (i as u32 % w, i as u32 / w);
                layer.set_pixel(Point::new(x as i32, y as i32), BinaryColor::On);
            }
        }
        layer
    }
}

impl ImageConverter for PixmapConverter {
    fn frame_buffer_from_image(&self, path: &Path, size: Size) -> Result<BitmapLayer, BadgeError> {
        let is_svg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

        let pixmap = if is_svg {
            Self::render_svg(path, size)?
        } else {
            Self::render_png(path, size)?
        };
        let layer = self.threshold(&pixmap);
        debug!("{} -> {} inked pixels", path.display(), layer.count_colored());
        Ok(layer)
    }
}
