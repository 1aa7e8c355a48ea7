/*
 *  display/mod.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Panel subsystem - layers, primitives and drivers
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

pub mod traits;
pub mod error;
pub mod layer;
pub mod draw;
pub mod drivers;

// Re-exports for convenience
pub use traits::{PanelDriver, PanelCapabilities, BoxedPanel};
pub use error::DisplayError;
pub use layer::{BitmapLayer, Frame};
pub use draw::{COLORED, UNCOLORED, draw_filled_rectangle, draw_rectangle, draw_string_at};
pub use drivers::mock::{MockPanel, MockPanelState};
pub use drivers::pbm::PbmPanel;
