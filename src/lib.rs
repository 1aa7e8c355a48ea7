/*
 *  lib.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Library root for the badge firmware
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

pub mod badge;
pub mod buttons;
pub mod config;
pub mod constants;
pub mod content;
pub mod display;
pub mod error;
pub mod event_loop;
pub mod fonts;
pub mod imaging;
pub mod indicator;
pub mod layout;
pub mod picker;
pub mod styles;

pub use badge::{Badge, BadgeState, Collaborators, Mode};
pub use buttons::{BadgeAction, ButtonEvent, ButtonId, ButtonSource};
pub use content::{AlignMode, ContentStore, ScaleMode, Slogan, SloganRecord};
pub use error::{BadgeError, SourceKind};
pub use event_loop::EventLoop;
