/*
 *  buttons.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  The five-button strip: ids, events, actions and input sources
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

use log::{info, warn};
use std::fmt;
use std::future::Future;
use std::io::BufRead;
use std::str::FromStr;
use std::thread;
use tokio::sync::mpsc::Sender;

/// Physical buttons, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonId {
    A,
    B,
    C,
    D,
    E,
}

impl ButtonId {
    pub const ALL: [ButtonId; 5] = [ButtonId::A, ButtonId::B, ButtonId::C, ButtonId::D, ButtonId::E];

    /// What a press of this button asks the badge to do
    pub fn action(self) -> BadgeAction {
        match self {
            ButtonId::A => BadgeAction::TogglePause,
            ButtonId::B => BadgeAction::ForceRandomText,
            ButtonId::C => BadgeAction::ForceRandomImage,
            ButtonId::D => BadgeAction::IncreaseInterval,
            ButtonId::E => BadgeAction::DecreaseInterval,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownButton(pub String);

impl fmt::Display for UnknownButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown button '{}' (expected a..e)", self.0)
    }
}

impl std::error::Error for UnknownButton {}

impl FromStr for ButtonId {
    type Err = UnknownButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(ButtonId::A),
            "b" => Ok(ButtonId::B),
            "c" => Ok(ButtonId::C),
            "d" => Ok(ButtonId::D),
            "e" => Ok(ButtonId::E),
            other => Err(UnknownButton(other.to_string())),
        }
    }
}

/// A button changed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    pub button: ButtonId,
    pub pressed: bool,
}

impl ButtonEvent {
    pub fn press(button: ButtonId) -> Self {
        Self { button, pressed: true }
    }

    pub fn release(button: ButtonId) -> Self {
        Self { button, pressed: false }
    }

    /// Only presses do anything
    pub fn action(&self) -> Option<BadgeAction> {
        self.pressed.then(|| self.button.action())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeAction {
    TogglePause,
    ForceRandomText,
    ForceRandomImage,
    IncreaseInterval,
    DecreaseInterval,
}

/// Something that notices button presses and queues them for the loop
pub trait ButtonSource: Send + 'static {
    /// Feed events into `events` until the source is exhausted or the
    /// receiving side goes away.
    fn run(self, events: Sender<ButtonEvent>) -> impl Future<Output = ()> + Send;
}

/// Reads button letters from stdin, one or more per line ("a", "d d e").
///
/// The read blocks, so it lives on its own plain thread rather than in the
/// runtime; shutdown never waits on it.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinButtons;

impl ButtonSource for StdinButtons {
    async fn run(self, events: Sender<ButtonEvent>) {
        let spawned = thread::Builder::new()
            .name("stdin-buttons".into())
            .spawn(move || {
                info!("stdin buttons ready (a=pause b=text c=image d=slower e=faster)");
                feed_lines(std::io::stdin().lock(), &events);
                info!("stdin closed, no more button input");
            });
        if let Err(e) = spawned {
            warn!("stdin buttons: {}", e);
        }
    }
}

/// Blocking pump: turn each whitespace separated letter into a press.
/// Stops at end of input, on a read error, or once the receiver is gone.
pub fn feed_lines<R: BufRead>(reader: R, events: &Sender<ButtonEvent>) {
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("stdin buttons: {}", e);
                return;
            }
        };
        for token in line.split_whitespace() {
            match token.parse::<ButtonId>() {
                Ok(button) => {
                    if events.blocking_send(ButtonEvent::press(button)).is_err() {
                        return;
                    }
                }
                Err(e) => warn!("{}", e),
            }
        }
    }
}

/// Replays a fixed list of events, then hangs up
#[derive(Debug, Clone, Default)]
pub struct ScriptedButtons {
    events: Vec<ButtonEvent>,
}

impl ScriptedButtons {
    pub fn new(events: impl IntoIterator<Item = ButtonEvent>) -> Self {
        Self { events: events.into_iter().collect() }
    }
}

impl ButtonSource for ScriptedButtons {
    async fn run(self, events: Sender<ButtonEvent>) {
        for event in self.events {
            if events.send(event).await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_button_mapping() {
        let actions: Vec<BadgeAction> = ButtonId::ALL.iter().map(|b| b.action()).collect();
        assert_eq!(actions, vec![
            BadgeAction::TogglePause,
            BadgeAction::ForceRandomText,
            BadgeAction::ForceRandomImage,
            BadgeAction::IncreaseInterval,
            BadgeAction::DecreaseInterval,
        ]);
    }

    #[test]
    fn test_release_does_nothing() {
        assert_eq!(ButtonEvent::press(ButtonId::A).action(), Some(BadgeAction::TogglePause));
        assert_eq!(ButtonEvent::release(ButtonId::A).action(), None);
    }

    #[test]
    fn test_parse_button() {
        assert_eq!("a".parse::<ButtonId>(), Ok(ButtonId::A));
        assert_eq!(" E ".parse::<ButtonId>(), Ok(ButtonId::E));
        assert!("f".parse::<ButtonId>().is_err());
    }

    #[tokio::test]
    async fn test_scripted_buttons_feed_channel() {
        let (tx, mut rx) = mpsc::channel(4);
        let script = ScriptedButtons::new([ButtonEvent::press(ButtonId::D), ButtonEvent::release(ButtonId::D)]);
        tokio::spawn(script.run(tx));

        assert_eq!(rx.recv().await, Some(ButtonEvent::press(ButtonId::D)));
        assert_eq!(rx.recv().await, Some(ButtonEvent::release(ButtonId::D)));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_feed_lines_from_blocking_thread() {
        let (tx, mut rx) = mpsc::channel(8);
        let input = std::io::Cursor::new("a\n\nd  x E\n");
        std::thread::spawn(move || feed_lines(input, &tx));

        assert_eq!(rx.recv().await, Some(ButtonEvent::press(ButtonId::A)));
        assert_eq!(rx.recv().await, Some(ButtonEvent::press(ButtonId::D)));
        assert_eq!(rx.recv().await, Some(ButtonEvent::press(ButtonId::E)));
        assert_eq!(rx.recv().await, None);
    }

    #[test]
    fn test_feed_lines_stops_when_receiver_gone() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        // would block forever on a full channel if it kept sending
        feed_lines(std::io::Cursor::new("a a a a\n"), &tx);
    }
}
