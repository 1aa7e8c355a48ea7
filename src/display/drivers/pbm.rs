/*
 *  display/drivers/pbm.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Desktop stand-in panel that writes frames to disk
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

use log::{debug, info};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::display::error::DisplayError;
use crate::display::layer::Frame;
use crate::display::traits::{PanelCapabilities, PanelDriver};

/// Writes each frame as `background.pbm`, `foreground.pbm` and a composited
/// `frame.ppm` (white paper, black ink, red ink on top) into `output_dir`.
#[derive(Debug)]
pub struct PbmPanel {
    capabilities: PanelCapabilities,
    output_dir: PathBuf,
    initialized: bool,
    frames: u64,
}

impl PbmPanel {
    pub fn new(width: u32, height: u32, output_dir: impl Into<PathBuf>) -> Result<Self, DisplayError> {
        Ok(Self {
            capabilities: PanelCapabilities::new(width, height, "pbm")?,
            output_dir: output_dir.into(),
            initialized: false,
            frames: 0,
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn frames_written(&self) -> u64 {
        self.frames
    }

    fn composite(frame: &Frame) -> String {
        let (w, h) = (frame.background.width(), frame.background.height());
        let mut out = String::with_capacity((w * h * 12) as usize);
        let _ = writeln!(out, "P3\n{} {}\n255", w, h);
        for y in 0..h {
            for x in 0..w {
                let rgb = if frame.foreground.is_colored(x, y) {
                    "255 0 0"
                } else if frame.background.is_colored(x, y) {
                    "0 0 0"
                } else {
                    "255 255 255"
                };
                let _ = writeln!(out, "{}", rgb);
            }
        }
        out
    }
}

impl PanelDriver for PbmPanel {
    fn capabilities(&self) -> &PanelCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        fs::create_dir_all(&self.output_dir)?;
        self.initialized = true;
        info!("PBM panel {}x{} writing to {}",
            self.capabilities.width, self.capabilities.height, self.output_dir.display());
        Ok(())
    }

    fn display_frame(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.check_frame(frame)?;

        fs::write(self.output_dir.join("background.pbm"), frame.background.to_pbm())?;
        fs::write(self.output_dir.join("foreground.pbm"), frame.foreground.to_pbm())?;
        fs::write(self.output_dir.join("frame.ppm"), Self::composite(frame))?;

        self.frames += 1;
        debug!("frame {} written", self.frames);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::BinaryColor;
    use embedded_graphics::prelude::Point;

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("badgy-pbm-{}-{}", tag, std::process::id()))
    }

    #[test]
    fn test_pbm_panel_writes_planes() {
        let dir = scratch_dir("planes");
        let mut panel = PbmPanel::new(8, 2, &dir).unwrap();
        panel.init().unwrap();

        let mut frame = Frame::blank(panel.size());
        frame.foreground.set_pixel(Point::new(0, 0), BinaryColor::On);
        frame.background.set_pixel(Point::new(1, 0), BinaryColor::On);
        panel.display_frame(&frame).unwrap();

        let fg = fs::read_to_string(dir.join("foreground.pbm")).unwrap();
        assert!(fg.starts_with("P1\n8 2\n1 0"));
        let ppm = fs::read_to_string(dir.join("frame.ppm")).unwrap();
        let pixels: Vec<&str> = ppm.lines().skip(3).collect();
        assert_eq!(pixels[0], "255 0 0");
        assert_eq!(pixels[1], "0 0 0");
        assert_eq!(pixels[2], "255 255 255");
        assert_eq!(panel.frames_written(), 1);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_pbm_panel_requires_init() {
        let mut panel = PbmPanel::new(8, 2, scratch_dir("uninit")).unwrap();
        let frame = Frame::blank(panel.size());
        assert!(matches!(panel.display_frame(&frame), Err(DisplayError::NotInitialized)));
    }
}
