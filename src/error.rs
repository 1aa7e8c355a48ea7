/*
 *  error.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Badge-level error taxonomy
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

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::display::DisplayError;

/// Which content source came up empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Slogans,
    Images,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::Slogans => write!(f, "slogans"),
            SourceKind::Images => write!(f, "images"),
        }
    }
}

/// Errors raised while picking, rendering or showing content.
///
/// `EmptySource` and `MalformedRecord` only cost the current draw; the
/// controller absorbs them. Everything else reaches the process boundary.
#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("no eligible {kind} in {}", path.display())]
    EmptySource { kind: SourceKind, path: PathBuf },

    #[error("malformed slogan record: expected 3 fields, found {found}")]
    MalformedRecord { found: usize },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("panel error: {0}")]
    Display(#[from] DisplayError),

    #[error("no font face available for size {size}")]
    Font { size: u32 },

    #[error("image {}: {reason}", path.display())]
    Image { path: PathBuf, reason: String },
}

impl BadgeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BadgeError::Io { path: path.into(), source }
    }

    /// True for errors that skip a single draw rather than stop the badge
    pub fn is_skippable(&self) -> bool {
        matches!(self, BadgeError::EmptySource { .. } | BadgeError::MalformedRecord { .. })
    }
}
