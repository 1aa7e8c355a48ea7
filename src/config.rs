use serde::{Deserialize, Serialize};
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::badge::{INTERVAL_STEP_SECS, MAX_INTERVAL_SECS, MIN_INTERVAL_SECS};
use crate::constants::{
    DEFAULT_IMAGE_DIR, DEFAULT_LOG_LEVEL, DEFAULT_PBM_OUTPUT_DIR, DEFAULT_SLOGAN_PATH,
    DISPLAY_HEIGHT, DISPLAY_WIDTH,
};

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level badge configuration. Every field is optional so layers can
/// be merged; the accessors below supply the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub log_level: Option<String>,     // e.g., "info" | "debug"
    pub image_dir: Option<PathBuf>,
    pub slogan_path: Option<PathBuf>,
    pub interval_secs: Option<u64>,    // 5..=30, steps of 5
    pub seed: Option<u64>,             // fixed seed replays the same rotation
    pub display: Option<DisplayConfig>,
    pub input: Option<InputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub driver: Option<DriverKind>,
    pub output_dir: Option<PathBuf>, // pbm driver only
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct InputConfig {
    pub source: Option<InputKind>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    Pbm,  // frames written to disk
    Mock, // headless, frames discarded
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Stdin,
    None,
}

impl Config {
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn image_dir(&self) -> PathBuf {
        self.image_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_IMAGE_DIR))
    }

    pub fn slogan_path(&self) -> PathBuf {
        self.slogan_path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_SLOGAN_PATH))
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs.unwrap_or(MIN_INTERVAL_SECS)
    }

    pub fn display_size(&self) -> (u32, u32) {
        let d = self.display.as_ref();
        (
            d.and_then(|d| d.width).unwrap_or(DISPLAY_WIDTH),
            d.and_then(|d| d.height).unwrap_or(DISPLAY_HEIGHT),
        )
    }

    pub fn driver(&self) -> DriverKind {
        self.display.as_ref().and_then(|d| d.driver).unwrap_or(DriverKind::Pbm)
    }

    pub fn output_dir(&self) -> PathBuf {
        self.display
            .as_ref()
            .and_then(|d| d.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PBM_OUTPUT_DIR))
    }

    pub fn input(&self) -> InputKind {
        self.input.as_ref().and_then(|i| i.source).unwrap_or(InputKind::Stdin)
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "badgy", about = "e-paper name badge", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Enable debug log level
    #[arg(short = 'v', long, alias = "verbose", action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub image_dir: Option<PathBuf>,
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub slogan_path: Option<PathBuf>,
    #[arg(long)]
    pub interval_secs: Option<u64>,
    #[arg(long)]
    pub seed: Option<u64>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long, value_enum)]
    pub driver: Option<DriverKind>,
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub input: Option<InputKind>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = resolve(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Defaults, then YAML, then CLI, then validation.
pub fn resolve(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/badgy/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/badgy/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/badgy.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["badgy.yaml", "config/badgy.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    let cfg: Config = serde_yaml::from_str(s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.log_level.is_some()      { dst.log_level = src.log_level; }
    if src.image_dir.is_some()      { dst.image_dir = src.image_dir; }
    if src.slogan_path.is_some()    { dst.slogan_path = src.slogan_path; }
    if src.interval_secs.is_some()  { dst.interval_secs = src.interval_secs; }
    if src.seed.is_some()           { dst.seed = src.seed; }
    // display
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
    // input
    match (&mut dst.input, src.input) {
        (None, Some(c)) => dst.input = Some(c),
        (Some(d), Some(s)) => if s.source.is_some() { d.source = s.source; },
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()       { dst.width = src.width; }
    if src.height.is_some()      { dst.height = src.height; }
    if src.driver.is_some()      { dst.driver = src.driver; }
    if src.output_dir.is_some()  { dst.output_dir = src.output_dir; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()      { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                    { cfg.log_level = Some("debug".to_string()); }
    if cli.image_dir.is_some()      { cfg.image_dir = cli.image_dir.clone(); }
    if cli.slogan_path.is_some()    { cfg.slogan_path = cli.slogan_path.clone(); }
    if cli.interval_secs.is_some()  { cfg.interval_secs = cli.interval_secs; }
    if cli.seed.is_some()           { cfg.seed = cli.seed; }

    let any_display = cli.display_width.is_some()
        || cli.display_height.is_some()
        || cli.driver.is_some()
        || cli.output_dir.is_some();

    if any_display && cfg.display.is_none() {
        cfg.display = Some(DisplayConfig::default());
    }
    if let Some(display) = cfg.display.as_mut() {
        if cli.display_width.is_some()   { display.width = cli.display_width; }
        if cli.display_height.is_some()  { display.height = cli.display_height; }
        if cli.driver.is_some()          { display.driver = cli.driver; }
        if cli.output_dir.is_some()      { display.output_dir = cli.output_dir.clone(); }
    }

    if let Some(source) = cli.input {
        cfg.input.get_or_insert_with(InputConfig::default).source = Some(source);
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(secs) = cfg.interval_secs {
        if !(MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&secs) || secs % INTERVAL_STEP_SECS != 0 {
            return Err(ConfigError::Validation(format!(
                "interval_secs must be {}..={} in steps of {}",
                MIN_INTERVAL_SECS, MAX_INTERVAL_SECS, INTERVAL_STEP_SECS
            )));
        }
    }
    let (w, h) = cfg.display_size();
    if w == 0 || h == 0 {
        return Err(ConfigError::Validation("display width/height must be > 0".into()));
    }
    if w % 8 != 0 {
        return Err(ConfigError::Validation("display width must be a multiple of 8".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.log_level(), "info");
        assert_eq!(cfg.image_dir(), PathBuf::from("/var/badge/images/"));
        assert_eq!(cfg.slogan_path(), PathBuf::from("/var/badge/slogans.txt"));
        assert_eq!(cfg.interval_secs(), 5);
        assert_eq!(cfg.display_size(), (104, 212));
        assert_eq!(cfg.driver(), DriverKind::Pbm);
        assert_eq!(cfg.input(), InputKind::Stdin);
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let cfg = parse_yaml(
            "log_level: debug\n\
             interval_secs: 15\n\
             seed: 42\n\
             display:\n  driver: mock\n  width: 128\n\
             input:\n  source: none\n",
        )
        .unwrap();
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.interval_secs(), 15);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.display_size(), (128, 212));
        assert_eq!(cfg.driver(), DriverKind::Mock);
        assert_eq!(cfg.input(), InputKind::None);
    }

    #[test]
    fn test_unknown_driver_is_yaml_error() {
        assert!(matches!(parse_yaml("display:\n  driver: ssd1306\n"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut dst = parse_yaml("interval_secs: 10\ndisplay:\n  width: 128\n  height: 296\n").unwrap();
        let src = parse_yaml("seed: 3\ndisplay:\n  height: 250\n").unwrap();
        merge(&mut dst, src);
        assert_eq!(dst.interval_secs(), 10);
        assert_eq!(dst.seed, Some(3));
        assert_eq!(dst.display_size(), (128, 250));
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut cfg = parse_yaml("interval_secs: 10\nlog_level: warn\n").unwrap();
        let cli = Cli {
            interval_secs: Some(20),
            debug: true,
            driver: Some(DriverKind::Mock),
            input: Some(InputKind::None),
            ..Cli::default()
        };
        apply_cli_overrides(&mut cfg, &cli);
        assert_eq!(cfg.interval_secs(), 20);
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.driver(), DriverKind::Mock);
        assert_eq!(cfg.input(), InputKind::None);
    }

    #[test]
    fn test_validation() {
        for bad in ["interval_secs: 7\n", "interval_secs: 35\n", "interval_secs: 0\n",
                    "display:\n  width: 100\n", "display:\n  height: 0\n"] {
            let cfg = parse_yaml(bad).unwrap();
            assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))), "{}", bad);
        }
        let cfg = parse_yaml("interval_secs: 30\n").unwrap();
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_missing_explicit_config() {
        let cli = Cli { config: Some(PathBuf::from("/definitely/not/here.yaml")), ..Cli::default() };
        assert!(matches!(resolve(&cli), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_dump_round_trips() {
        let cfg = parse_yaml("seed: 9\ndisplay:\n  driver: pbm\n  output_dir: /tmp/frames\n").unwrap();
        let dumped = serde_yaml::to_string(&cfg).unwrap();
        assert_eq!(parse_yaml(&dumped).unwrap(), cfg);
    }
}
