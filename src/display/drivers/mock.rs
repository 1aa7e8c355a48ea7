/*
 *  display/drivers/mock.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock panel driver for testing without hardware
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

use std::sync::{Arc, Mutex, MutexGuard};

use crate::display::error::DisplayError;
use crate::display::layer::Frame;
use crate::display::traits::{PanelCapabilities, PanelDriver};

/// Mock panel driver
///
/// Simulates the panel without requiring hardware. It's useful for:
/// - Unit and integration tests
/// - Running headless with `driver: mock`
///
/// The driver records every operation in a shared state so tests can keep
/// a handle after the driver has been boxed and moved into the badge.
#[derive(Debug, Clone)]
pub struct MockPanel {
    /// Panel capabilities
    capabilities: PanelCapabilities,

    /// Shared state for testing
    state: Arc<Mutex<MockPanelState>>,
}

/// Internal state for the mock panel (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockPanelState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of frames accepted
    pub frame_count: usize,

    /// Whether the panel is initialized
    pub is_initialized: bool,

    /// Most recent frame accepted
    pub last_frame: Option<Frame>,

    /// Total bytes that would have crossed the SPI bus
    pub bytes_transferred: usize,

    /// Simulate failures (for error testing)
    pub simulate_init_failure: bool,
    pub simulate_transfer_failure: bool,
}

impl MockPanel {
    /// Create a mock panel with specific dimensions
    pub fn new_with_size(width: u32, height: u32) -> Result<Self, DisplayError> {
        Ok(Self {
            capabilities: PanelCapabilities::new(width, height, "mock")?,
            state: Arc::new(Mutex::new(MockPanelState::default())),
        })
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockPanelState>> {
        Arc::clone(&self.state)
    }

    fn lock(&self) -> MutexGuard<'_, MockPanelState> {
        // a test that panicked while holding the lock must not wedge the rest
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PanelDriver for MockPanel {
    fn capabilities(&self) -> &PanelCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();

        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("Simulated init failure".to_string()));
        }

        state.init_count += 1;
        state.is_initialized = true;
        Ok(())
    }

    fn display_frame(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.check_frame(frame)?;
        let mut state = self.lock();

        if !state.is_initialized {
            return Err(DisplayError::NotInitialized);
        }
        if state.simulate_transfer_failure {
            return Err(DisplayError::TransferFailed("Simulated transfer failure".to_string()));
        }

        state.frame_count += 1;
        state.bytes_transferred += frame.background.to_panel_bytes().len()
            + frame.foreground.to_panel_bytes().len();
        state.last_frame = Some(frame.clone());
        Ok(())
    }
}
