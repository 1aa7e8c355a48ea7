/*
 *  main.rs
 *
 *  badgy - worth wearing
 *  (c) 2020-26 Stuart Hunter
 *
 *  Entry point: config, logging, collaborators, then the rotation loop
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

use log::{error, info, warn};
use env_logger::Env;
use tokio::sync::mpsc;

#[cfg(unix)] // Only compile this block on Unix-like systems
use tokio::signal::unix::{signal, SignalKind};

use badgy::config::{self, Config, DriverKind, InputKind};
use badgy::display::{BoxedPanel, MockPanel, PbmPanel};
use badgy::event_loop::BUTTON_QUEUE_DEPTH;
use badgy::fonts::MonoFontSource;
use badgy::imaging::PixmapConverter;
use badgy::indicator::LogIndicator;
use badgy::picker::{Picker, RngPicker};
use badgy::buttons::StdinButtons;
use badgy::{Badge, BadgeState, ButtonSource, Collaborators, ContentStore, EventLoop};

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Asynchronously waits for a SIGINT, SIGTERM, or SIGHUP signal.
///
/// Once a signal is caught it is logged and the function returns, which
/// lets the select in `main` fall through to shutdown.
#[cfg(unix)]
async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sighup = signal(SignalKind::hangup())?;

    tokio::select! {
        _ = sigint.recv() => {
            info!("SIGINT received. Initiating graceful shutdown.");
        }
        _ = sigterm.recv() => {
            info!("SIGTERM received. Initiating graceful shutdown.");
        }
        _ = sighup.recv() => {
            info!("SIGHUP received. Initiating graceful shutdown.");
        }
    }
    Ok(())
}

#[cfg(not(unix))]
async fn signal_handler() -> Result<(), Box<dyn std::error::Error>> {
    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received. Initiating graceful shutdown.");
    Ok(())
}

fn build_panel(cfg: &Config) -> anyhow::Result<BoxedPanel> {
    let (width, height) = cfg.display_size();
    let panel: BoxedPanel = match cfg.driver() {
        DriverKind::Pbm => {
            let dir = cfg.output_dir();
            info!("writing frames to {}", dir.display());
            Box::new(PbmPanel::new(width, height, dir)?)
        }
        DriverKind::Mock => Box::new(MockPanel::new_with_size(width, height)?),
    };
    Ok(panel)
}

fn build_picker(cfg: &Config) -> Box<dyn Picker> {
    match cfg.seed {
        Some(seed) => {
            info!("fixed seed {}", seed);
            Box::new(RngPicker::seeded(seed))
        }
        None => Box::new(RngPicker::from_entropy()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::load()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(cfg.log_level()))
        .format_timestamp_secs()
        .init();

    info!("This {} worth wearing", env!("CARGO_PKG_NAME"));
    info!("v.{} built {}", env!("CARGO_PKG_VERSION"), BUILD_DATE);

    let content = ContentStore::new(cfg.image_dir(), cfg.slogan_path());
    info!(
        "slogans {} images {}",
        content.slogan_path().display(),
        content.image_dir().display()
    );

    let parts = Collaborators {
        panel: build_panel(&cfg)?,
        indicator: Box::new(LogIndicator::default()),
        fonts: Box::new(MonoFontSource),
        images: Box::new(PixmapConverter::default()),
        picker: build_picker(&cfg),
    };

    let mut badge = Badge::new(BadgeState::new(cfg.interval_secs()), content, parts);
    badge.init()?;

    let events = match cfg.input() {
        InputKind::Stdin => {
            let (tx, rx) = mpsc::channel(BUTTON_QUEUE_DEPTH);
            tokio::spawn(StdinButtons.run(tx));
            Some(rx)
        }
        InputKind::None => None,
    };

    // Draws run on a worker of their own so a signal is seen mid-render.
    let mut rotation = tokio::spawn(async move {
        EventLoop::new(badge, events).run().await
    });

    tokio::select! {
        // Handle Unix signals for graceful shutdown
        res = signal_handler() => {
            if let Err(e) = res {
                warn!("signal handler failed: {}", e);
            }
            rotation.abort();
        }
        joined = &mut rotation => {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    error!("badge stopped: {}", e);
                    return Err(e.into());
                }
                Err(e) => {
                    error!("rotation task failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    info!("{} done", env!("CARGO_PKG_NAME"));
    Ok(())
}
