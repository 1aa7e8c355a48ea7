/*
 *  display/error.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Error types for the panel subsystem
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

use std::error::Error;
use std::fmt;

/// Unified error type for all panel operations
#[derive(Debug)]
pub enum DisplayError {
    /// Panel initialization failed
    InitializationFailed(String),

    /// A frame was handed over before `init()` succeeded
    NotInitialized,

    /// Layer dimensions do not match the panel
    FrameSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Panel width must be a whole number of bytes
    InvalidWidth(u32),

    /// Transfer to the panel (or its stand-in sink) failed
    TransferFailed(String),

    /// Underlying I/O failure
    Io(std::io::Error),
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::InitializationFailed(msg) =>
                write!(f, "Panel initialization failed: {}", msg),
            DisplayError::NotInitialized =>
                write!(f, "Panel used before initialization"),
            DisplayError::FrameSizeMismatch { expected, actual } =>
                write!(f, "Frame size mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1),
            DisplayError::InvalidWidth(width) =>
                write!(f, "Invalid panel width {} (must be divisible by 8)", width),
            DisplayError::TransferFailed(msg) =>
                write!(f, "Frame transfer failed: {}", msg),
            DisplayError::Io(err) =>
                write!(f, "Panel I/O error: {}", err),
        }
    }
}

impl Error for DisplayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DisplayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DisplayError {
    fn from(err: std::io::Error) -> Self {
        DisplayError::Io(err)
    }
}
