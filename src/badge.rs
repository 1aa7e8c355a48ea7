/*
 *  badge.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Badge controller - session state, content selection and button actions
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

use embedded_graphics::pixelcolor::Rgb888;
use log::{debug, info, warn};

use crate::buttons::{BadgeAction, ButtonEvent};
use crate::content::ContentStore;
use crate::display::{BoxedPanel, Frame};
use crate::error::BadgeError;
use crate::fonts::FontSource;
use crate::imaging::ImageConverter;
use crate::indicator::{
    Indicator, INDICATOR_FORCED, INDICATOR_INTERVAL, INDICATOR_OFF, INDICATOR_PAUSED,
};
use crate::picker::{choose, Picker};
use crate::styles::{render_bordered, render_greeting, render_image, Style};

pub const MIN_INTERVAL_SECS: u64 = 5;
pub const MAX_INTERVAL_SECS: u64 = 30;
pub const INTERVAL_STEP_SECS: u64 = 5;

/// What the rotation draws on a timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    Image,
    Text,
}

/// Six-way wheel; repetition weights it to 2/6 image, 4/6 text.
pub const CONTENT_WHEEL: [Content; 6] = [
    Content::Image,
    Content::Text,
    Content::Text,
    Content::Text,
    Content::Image,
    Content::Text,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Active,
    Paused,
}

/// The badge's whole mutable session.
///
/// `indicator` is the resting LED color and follows `paused` alone; the
/// green and blue cues are flashes that the next loop tick paints over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeState {
    pub paused: bool,
    pub interval_secs: u64,
    pub indicator: Rgb888,
}

impl Default for BadgeState {
    fn default() -> Self {
        Self::new(MIN_INTERVAL_SECS)
    }
}

impl BadgeState {
    pub fn new(interval_secs: u64) -> Self {
        Self {
            paused: false,
            interval_secs: interval_secs.clamp(MIN_INTERVAL_SECS, MAX_INTERVAL_SECS),
            indicator: INDICATOR_OFF,
        }
    }

    pub fn mode(&self) -> Mode {
        if self.paused { Mode::Paused } else { Mode::Active }
    }

    /// Flip between active and paused; returns the new `paused`
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.indicator = if self.paused { INDICATOR_PAUSED } else { INDICATOR_OFF };
        self.paused
    }

    pub fn increase_interval(&mut self) -> u64 {
        self.interval_secs = (self.interval_secs + INTERVAL_STEP_SECS).min(MAX_INTERVAL_SECS);
        self.interval_secs
    }

    pub fn decrease_interval(&mut self) -> u64 {
        self.interval_secs = self
            .interval_secs
            .saturating_sub(INTERVAL_STEP_SECS)
            .max(MIN_INTERVAL_SECS);
        self.interval_secs
    }
}

/// Everything outside the core the badge talks to
pub struct Collaborators {
    pub panel: BoxedPanel,
    pub indicator: Box<dyn Indicator>,
    pub fonts: Box<dyn FontSource>,
    pub images: Box<dyn ImageConverter>,
    pub picker: Box<dyn Picker>,
}

/// Owns the session state and turns ticks and button actions into frames.
pub struct Badge {
    state: BadgeState,
    content: ContentStore,
    panel: BoxedPanel,
    indicator: Box<dyn Indicator>,
    fonts: Box<dyn FontSource>,
    images: Box<dyn ImageConverter>,
    picker: Box<dyn Picker>,
}

impl Badge {
    pub fn new(state: BadgeState, content: ContentStore, parts: Collaborators) -> Self {
        Self {
            state,
            content,
            panel: parts.panel,
            indicator: parts.indicator,
            fonts: parts.fonts,
            images: parts.images,
            picker: parts.picker,
        }
    }

    pub fn state(&self) -> &BadgeState {
        &self.state
    }

    pub fn init(&mut self) -> Result<(), BadgeError> {
        let caps = self.panel.capabilities();
        info!("panel {} {}x{}", caps.model, caps.width, caps.height);
        self.panel.init()?;
        Ok(())
    }

    /// Paint the resting LED color
    pub fn apply_indicator(&mut self) {
        self.indicator.set(self.state.indicator);
    }

    pub fn on_button(&mut self, event: ButtonEvent) -> Result<(), BadgeError> {
        match event.action() {
            Some(action) => {
                debug!("button {:?} -> {:?}", event.button, action);
                self.handle(action)
            }
            None => Ok(()),
        }
    }

    pub fn handle(&mut self, action: BadgeAction) -> Result<(), BadgeError> {
        match action {
            BadgeAction::TogglePause => {
                let paused = self.state.toggle_pause();
                info!("rotation {}", if paused { "paused" } else { "resumed" });
                self.indicator.set(self.state.indicator);
            }
            BadgeAction::ForceRandomText => {
                self.indicator.set(INDICATOR_FORCED);
                self.draw_random_text()?;
            }
            BadgeAction::ForceRandomImage => {
                self.indicator.set(INDICATOR_FORCED);
                self.draw_random_image()?;
            }
            BadgeAction::IncreaseInterval => {
                self.indicator.set(INDICATOR_INTERVAL);
                let secs = self.state.increase_interval();
                info!("interval {}s", secs);
            }
            BadgeAction::DecreaseInterval => {
                self.indicator.set(INDICATOR_INTERVAL);
                let secs = self.state.decrease_interval();
                info!("interval {}s", secs);
            }
        }
        Ok(())
    }

    /// One timer-driven draw: spin the content wheel and draw what it lands on.
    pub fn draw_tick(&mut self) -> Result<(), BadgeError> {
        match choose(self.picker.as_mut(), &CONTENT_WHEEL) {
            Some(Content::Image) => self.draw_random_image(),
            _ => self.draw_random_text(),
        }
    }

    pub fn draw_random_text(&mut self) -> Result<(), BadgeError> {
        let style = choose(self.picker.as_mut(), &Style::ALL).copied().unwrap_or(Style::Bordered);
        let Some(record) = skip_on_soft_error(self.content.pick_slogan(self.picker.as_mut()))? else {
            return Ok(());
        };
        let Some(slogan) = skip_on_soft_error(record.slogan())? else {
            return Ok(());
        };

        let scale = slogan.scale.resolve(self.picker.as_mut());
        let centered = slogan.align.resolve(self.picker.as_mut());
        let size = self.panel.size();
        let frame = match style {
            Style::Bordered => render_bordered(self.fonts.as_ref(), size, &slogan.text, scale, centered)?,
            Style::Greeting => render_greeting(self.fonts.as_ref(), size, &slogan.text, scale, centered)?,
        };
        debug!("{:?} '{}' scale={} centered={}", style, slogan.text, scale, centered);
        self.show(&frame)
    }

    pub fn draw_random_image(&mut self) -> Result<(), BadgeError> {
        let Some(path) = skip_on_soft_error(self.content.pick_image_path(self.picker.as_mut()))? else {
            return Ok(());
        };
        let frame = render_image(self.images.as_ref(), self.panel.size(), &path)?;
        debug!("image {}", path.display());
        self.show(&frame)
    }

    fn show(&mut self, frame: &Frame) -> Result<(), BadgeError> {
        self.panel.display_frame(frame)?;
        Ok(())
    }
}

/// Turn a draw-skipping error into `None`, pass everything else through
fn skip_on_soft_error<T>(result: Result<T, BadgeError>) -> Result<Option<T>, BadgeError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_skippable() => {
            warn!("skipping draw: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buttons::ButtonId;
    use crate::display::{MockPanel, MockPanelState, PanelDriver};
    use crate::fonts::MonoFontSource;
    use crate::imaging::PixmapConverter;
    use crate::indicator::RecordingIndicator;
    use crate::picker::SequencePicker;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn scratch(tag: &str, slogans: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("badgy-badge-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(dir.join("images")).unwrap();
        fs::write(dir.join("slogans.txt"), slogans).unwrap();
        dir
    }

    fn badge(
        dir: &PathBuf,
        script: Vec<usize>,
    ) -> (Badge, Arc<Mutex<MockPanelState>>, RecordingIndicator) {
        let mut panel = MockPanel::new_with_size(104, 212).unwrap();
        panel.init().unwrap();
        let state = panel.state();
        let led = RecordingIndicator::default();
        let parts = Collaborators {
            panel: Box::new(panel),
            indicator: Box::new(led.clone()),
            fonts: Box::new(MonoFontSource),
            images: Box::new(PixmapConverter::default()),
            picker: Box::new(SequencePicker::new(script)),
        };
        let content = ContentStore::new(dir.join("images"), dir.join("slogans.txt"));
        (Badge::new(BadgeState::default(), content, parts), state, led)
    }

    #[test]
    fn test_interval_clamps() {
        let mut state = BadgeState::new(30);
        assert_eq!(state.increase_interval(), 30);
        let mut state = BadgeState::new(5);
        assert_eq!(state.decrease_interval(), 5);
        assert_eq!(BadgeState::new(100).interval_secs, 30);
        assert_eq!(BadgeState::new(0).interval_secs, 5);
    }

    #[test]
    fn test_interval_round_trips_away_from_bounds() {
        for start in [5, 10, 15, 20, 25, 30] {
            let mut state = BadgeState::new(start);
            state.increase_interval();
            state.decrease_interval();
            if start == 30 {
                assert_eq!(state.interval_secs, 25);
            } else {
                assert_eq!(state.interval_secs, start);
            }

            let mut state = BadgeState::new(start);
            state.decrease_interval();
            state.increase_interval();
            if start == 5 {
                assert_eq!(state.interval_secs, 10);
            } else {
                assert_eq!(state.interval_secs, start);
            }
        }
    }

    #[test]
    fn test_toggle_pause_is_its_own_inverse() {
        let mut state = BadgeState::new(15);
        let before = state.clone();
        assert!(state.toggle_pause());
        assert_eq!(state.indicator, INDICATOR_PAUSED);
        assert_eq!(state.mode(), Mode::Paused);
        assert!(!state.toggle_pause());
        assert_eq!(state, before);
    }

    #[test]
    fn test_pause_button_drives_led() {
        let dir = scratch("pause", "Hi\tscale\tcenter\n");
        let (mut badge, panel, led) = badge(&dir, vec![]);

        badge.on_button(ButtonEvent::press(ButtonId::A)).unwrap();
        assert!(badge.state().paused);
        assert_eq!(led.last(), Some(INDICATOR_PAUSED));

        // releases are ignored
        badge.on_button(ButtonEvent::release(ButtonId::A)).unwrap();
        assert!(badge.state().paused);

        badge.on_button(ButtonEvent::press(ButtonId::A)).unwrap();
        assert!(!badge.state().paused);
        assert_eq!(led.last(), Some(INDICATOR_OFF));
        assert_eq!(panel.lock().unwrap().frame_count, 0);
    }

    #[test]
    fn test_interval_buttons_flash_blue_and_keep_pause() {
        let dir = scratch("interval", "Hi\tscale\tcenter\n");
        let (mut badge, _panel, led) = badge(&dir, vec![]);
        badge.handle(BadgeAction::TogglePause).unwrap();

        badge.handle(BadgeAction::IncreaseInterval).unwrap();
        assert_eq!(badge.state().interval_secs, 10);
        assert_eq!(led.last(), Some(INDICATOR_INTERVAL));
        assert!(badge.state().paused);
        // resting color is untouched by the flash
        assert_eq!(badge.state().indicator, INDICATOR_PAUSED);

        badge.apply_indicator();
        assert_eq!(led.last(), Some(INDICATOR_PAUSED));

        badge.handle(BadgeAction::DecreaseInterval).unwrap();
        badge.handle(BadgeAction::DecreaseInterval).unwrap();
        assert_eq!(badge.state().interval_secs, 5);
    }

    #[test]
    fn test_force_text_while_paused() {
        let dir = scratch("force", "Hi\tscale\tcenter\n");
        // style: greeting
        let (mut badge, panel, led) = badge(&dir, vec![1]);
        badge.handle(BadgeAction::TogglePause).unwrap();

        badge.handle(BadgeAction::ForceRandomText).unwrap();

        assert!(badge.state().paused);
        assert_eq!(led.last(), Some(INDICATOR_FORCED));
        let state = panel.lock().unwrap();
        assert_eq!(state.frame_count, 1);
        let frame = state.last_frame.as_ref().unwrap();
        // greeting: red band across the top
        assert_eq!(frame.foreground.count_colored_in_row(0, 0, 104), 104);
    }

    #[test]
    fn test_malformed_record_skips_draw() {
        let dir = scratch("malformed", "just text\n");
        let (mut badge, panel, _led) = badge(&dir, vec![]);
        badge.draw_random_text().unwrap();
        assert_eq!(panel.lock().unwrap().frame_count, 0);
    }

    #[test]
    fn test_empty_sources_skip_draw() {
        let dir = scratch("empty", "# nothing\n");
        let (mut badge, panel, _led) = badge(&dir, vec![]);
        badge.handle(BadgeAction::ForceRandomText).unwrap();
        badge.handle(BadgeAction::ForceRandomImage).unwrap();
        assert_eq!(panel.lock().unwrap().frame_count, 0);
    }

    #[test]
    fn test_wheel_lands_on_text() {
        let dir = scratch("wheel-text", "Hi\tscale\tcenter\n");
        // wheel slot 1 (text), style 0 (bordered)
        let (mut badge, panel, _led) = badge(&dir, vec![1, 0]);
        badge.draw_tick().unwrap();
        let state = panel.lock().unwrap();
        let frame = state.last_frame.as_ref().unwrap();
        assert_eq!(frame.background.count_colored(), 104 * 212);
    }

    #[test]
    fn test_wheel_lands_on_image_with_no_images() {
        let dir = scratch("wheel-image", "Hi\tscale\tcenter\n");
        // wheel slot 4 (image); the image directory is empty
        let (mut badge, panel, _led) = badge(&dir, vec![4]);
        badge.draw_tick().unwrap();
        assert_eq!(panel.lock().unwrap().frame_count, 0);
    }

    #[test]
    fn test_random_modes_consume_picks_in_order() {
        let dir = scratch("any", "Hi\tany\tany\n");
        // style bordered, record 0, scale coin tails (1), align coin heads (0)
        let (mut badge, panel, _led) = badge(&dir, vec![0, 0, 1, 0]);
        badge.draw_random_text().unwrap();
        let state = panel.lock().unwrap();
        let frame = state.last_frame.as_ref().unwrap();
        // fixed 32px text at the 12px margin
        assert!(frame.foreground.count_colored_in_row(106, 12, 32) > 0);
    }

    #[test]
    fn test_panel_failure_propagates() {
        let dir = scratch("failure", "Hi\tscale\tcenter\n");
        let (mut badge, panel, _led) = badge(&dir, vec![]);
        panel.lock().unwrap().simulate_transfer_failure = true;
        assert!(matches!(
            badge.handle(BadgeAction::ForceRandomText),
            Err(BadgeError::Display(_))
        ));
    }

    #[test]
    fn test_interval_buttons_work_with_logging_off() {
        log::set_max_level(log::LevelFilter::Off);
        let dir = scratch("interval-quiet", "Hi\tscale\tcenter\n");
        let (mut badge, _panel, _led) = badge(&dir, vec![]);
        badge.handle(BadgeAction::IncreaseInterval).unwrap();
        badge.handle(BadgeAction::IncreaseInterval).unwrap();
        assert_eq!(badge.state().interval_secs, 15);

        badge.on_button(ButtonEvent::press(ButtonId::D)).unwrap();
        assert_eq!(badge.state().interval_secs, 20);
        badge.on_button(ButtonEvent::press(ButtonId::E)).unwrap();
        badge.on_button(ButtonEvent::press(ButtonId::E)).unwrap();
        assert_eq!(badge.state().interval_secs, 10);
    }

    #[test]
    fn test_wheel_is_two_images_to_four_texts() {
        let images = CONTENT_WHEEL.iter().filter(|c| **c == Content::Image).count();
        assert_eq!((images, CONTENT_WHEEL.len() - images), (2, 4));

        let dir = scratch("wheel-weights", "Hi\tscale\tcenter\n");
        fs::write(
            dir.join("images").join("dot.svg"),
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="5" height="5"/></svg>"#,
        )
        .unwrap();

        let (mut image_draws, mut text_draws) = (0, 0);
        for slot in 0..CONTENT_WHEEL.len() {
            // remaining picks default to 0: first image, bordered style, first record
            let (mut badge, panel, _led) = badge(&dir, vec![slot]);
            badge.draw_tick().unwrap();
            let state = panel.lock().unwrap();
            let frame = state.last_frame.as_ref().unwrap();
            if frame.foreground.count_colored() == 0 {
                image_draws += 1;
            } else {
                text_draws += 1;
            }
        }
        assert_eq!((image_draws, text_draws), (2, 4));
    }
}
