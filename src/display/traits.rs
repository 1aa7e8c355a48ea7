/*
 *  display/traits.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Trait definitions for the e-paper panel abstraction
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

use crate::display::error::DisplayError;
use crate::display::layer::Frame;

/// Panel capabilities and metadata
#[derive(Debug, Clone)]
pub struct PanelCapabilities {
    /// Panel width in pixels (a multiple of 8)
    pub width: u32,

    /// Panel height in pixels
    pub height: u32,

    /// Human readable model, for logging
    pub model: &'static str,
}

impl PanelCapabilities {
    pub fn new(width: u32, height: u32, model: &'static str) -> Result<Self, DisplayError> {
        if width == 0 || width % 8 != 0 {
            return Err(DisplayError::InvalidWidth(width));
        }
        Ok(Self { width, height, model })
    }
}

/// Minimal hardware abstraction - every panel driver implements this trait
///
/// Rendering happens entirely off-panel into a [`Frame`]; the driver only
/// needs to bring the hardware up and push two packed planes across.
pub trait PanelDriver: Send {
    /// Returns the capabilities of this panel
    fn capabilities(&self) -> &PanelCapabilities;

    /// Returns the panel dimensions as (width, height)
    fn dimensions(&self) -> (u32, u32) {
        let caps = self.capabilities();
        (caps.width, caps.height)
    }

    fn size(&self) -> Size {
        let (w, h) = self.dimensions();
        Size::new(w, h)
    }

    /// Initialize the panel hardware
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Blocking transfer of both planes to the panel
    fn display_frame(&mut self, frame: &Frame) -> Result<(), DisplayError>;

    /// Reject frames rendered for a different geometry
    fn check_frame(&self, frame: &Frame) -> Result<(), DisplayError> {
        let expected = self.dimensions();
        for layer in [&frame.background, &frame.foreground] {
            let actual = (layer.width(), layer.height());
            if actual != expected {
                return Err(DisplayError::FrameSizeMismatch { expected, actual });
            }
        }
        Ok(())
    }
}

/// Type alias for a boxed panel driver
pub type BoxedPanel = Box<dyn PanelDriver>;
