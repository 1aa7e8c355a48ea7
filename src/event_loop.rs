/*
 *  event_loop.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Cooperative render loop servicing button events while it waits
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
use std::time::Duration;
use tokio::sync::mpsc::Receiver;
use tokio::time::{sleep_until, Instant};

use crate::badge::Badge;
use crate::buttons::ButtonEvent;
use crate::error::BadgeError;

/// How long a paused badge idles between ticks
pub const PAUSED_POLL: Duration = Duration::from_millis(10);

/// Room for presses queued up behind a slow panel refresh
pub const BUTTON_QUEUE_DEPTH: usize = 16;

pub struct EventLoop {
    badge: Badge,
    events: Option<Receiver<ButtonEvent>>,
}

impl EventLoop {
    pub fn new(badge: Badge, events: Option<Receiver<ButtonEvent>>) -> Self {
        Self { badge, events }
    }

    pub fn badge(&self) -> &Badge {
        &self.badge
    }

    /// Tick forever; only a hard error gets out
    pub async fn run(&mut self) -> Result<(), BadgeError> {
        info!("rotation every {}s", self.badge.state().interval_secs);
        loop {
            self.tick().await?;
        }
    }

    /// Paint the resting LED, then either draw and wait out the interval
    /// (active) or wait a short poll (paused). Button events are handled as
    /// they arrive during the wait without moving its deadline.
    pub async fn tick(&mut self) -> Result<(), BadgeError> {
        self.badge.apply_indicator();

        let wait = if self.badge.state().paused {
            PAUSED_POLL
        } else {
            self.badge.draw_tick()?;
            Duration::from_secs(self.badge.state().interval_secs)
        };
        self.wait_until(Instant::now() + wait).await
    }

    async fn wait_until(&mut self, deadline: Instant) -> Result<(), BadgeError> {
        loop {
            let Some(events) = self.events.as_mut() else {
                sleep_until(deadline).await;
                return Ok(());
            };

            let event = tokio::select! {
                _ = sleep_until(deadline) => return Ok(()),
                event = events.recv() => event,
            };

            match event {
                Some(event) => self.badge.on_button(event)?,
                None => {
                    debug!("button source hung up");
                    self.events = None;
                }
            }
        }
    }
}
