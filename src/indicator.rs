//! Tri-color status LED.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use log::debug;
use std::sync::{Arc, Mutex};

/// LED dark: running normally
pub const INDICATOR_OFF: Rgb888 = Rgb888::BLACK;
/// Rotation paused
pub const INDICATOR_PAUSED: Rgb888 = Rgb888::RED;
/// Flash cue for a forced draw
pub const INDICATOR_FORCED: Rgb888 = Rgb888::GREEN;
/// Flash cue for an interval change
pub const INDICATOR_INTERVAL: Rgb888 = Rgb888::BLUE;

pub trait Indicator: Send {
    fn set(&mut self, color: Rgb888);
}

/// Logs color changes; stands in for the LED when running off-badge.
#[derive(Debug, Default)]
pub struct LogIndicator {
    last: Option<Rgb888>,
}

impl Indicator for LogIndicator {
    fn set(&mut self, color: Rgb888) {
        if self.last != Some(color) {
            debug!("indicator -> ({}, {}, {})", color.r(), color.g(), color.b());
            self.last = Some(color);
        }
    }
}

/// Keeps every color it was asked to show; clones share the history.
#[derive(Debug, Clone, Default)]
pub struct RecordingIndicator {
    history: Arc<Mutex<Vec<Rgb888>>>,
}

impl RecordingIndicator {
    pub fn history(&self) -> Vec<Rgb888> {
        self.history.lock().map(|h| h.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Rgb888> {
        self.history().last().copied()
    }
}

impl Indicator for RecordingIndicator {
    fn set(&mut self, color: Rgb888) {
        if let Ok(mut history) = self.history.lock() {
            history.push(color);
        }
    }
}
