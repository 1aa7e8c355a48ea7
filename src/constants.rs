//! This module contains global defaults used across the config and the badge.

/// Where the artwork lives on the badge's SD card
pub const DEFAULT_IMAGE_DIR: &str = "/var/badge/images/";
/// Tab separated slogan list, `#` comments
pub const DEFAULT_SLOGAN_PATH: &str = "/var/badge/slogans.txt";

/// 2.13" bicolor (black/red) e-paper, portrait
pub const DISPLAY_WIDTH: u32 = 104;
pub const DISPLAY_HEIGHT: u32 = 212;

/// Frames land here when running with the PBM stand-in panel
pub const DEFAULT_PBM_OUTPUT_DIR: &str = "badgy-frames";

pub const DEFAULT_LOG_LEVEL: &str = "info";
