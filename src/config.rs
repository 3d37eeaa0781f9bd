/*
 *  config.rs
 *
 *  RigaClock - analog clock, weather and holidays
 *	(c) 2020-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

use clap::{ArgAction, Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::translate::Language;
use crate::weather::{DEFAULT_BASE_URL, DEFAULT_CITY};

pub const DEFAULT_WIDTH: u32 = 440;
pub const DEFAULT_HEIGHT: u32 = 640;
pub const DEFAULT_TRANSLATIONS_DIR: &str = "assets/lang";
pub const DEFAULT_WEATHER_INTERVAL_SECS: u64 = 600;
pub const HANDS_INTERVAL: Duration = Duration::from_millis(1000);

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

/// Top-level configuration as read from YAML. Every field is optional so
/// files and CLI flags layer over each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    pub log_level: Option<String>,      // e.g., "info" | "debug"
    pub language: Option<Language>,     // "en" | "ru"
    pub translations_dir: Option<PathBuf>,
    pub weather: Option<WeatherConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WeatherConfig {
    pub api_key: Option<String>,
    pub city: Option<String>,
    pub base_url: Option<String>,
    pub interval_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub scale: Option<u32>,
    pub headless: Option<bool>,
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(
    name = "rigaclock",
    version,
    about = "Analog clock with Riga weather and the month's holidays"
)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// OpenWeatherMap API key
    #[arg(short = 'k', long, env = "RIGACLOCK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
    /// City to fetch weather for
    #[arg(long)]
    pub city: Option<String>,
    /// Start-up language
    #[arg(short, long, value_enum)]
    pub lang: Option<Language>,
    /// Directory holding en.json / ru.json
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub translations: Option<PathBuf>,
    /// Weather endpoint
    #[arg(long)]
    pub weather_url: Option<String>,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    /// Integer window scale factor
    #[arg(long)]
    pub scale: Option<u32>,
    /// Render off-screen only
    #[arg(long, action = ArgAction::SetTrue)]
    pub headless: bool,
    /// Render one frame to a PPM file and exit (implies --headless)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub snapshot: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// Enable debug log level
    #[arg(short = 'v', long, alias = "verbose", action = ArgAction::SetTrue)]
    pub debug: bool,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Effective settings with every default filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub log_level: String,
    pub language: Language,
    pub translations_dir: PathBuf,
    pub api_key: String,
    pub city: String,
    pub weather_url: String,
    pub weather_interval: Duration,
    pub hands_interval: Duration,
    pub width: u32,
    pub height: u32,
    pub scale: u32,
    pub headless: bool,
    pub snapshot: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cfg: &Config, cli: &Cli) -> Self {
        let weather = cfg.weather.clone().unwrap_or_default();
        let display = cfg.display.clone().unwrap_or_default();

        let log_level = if cli.debug {
            "debug".to_string()
        } else {
            cfg.log_level.clone().unwrap_or_else(|| "info".to_string())
        };

        Self {
            log_level,
            language: cfg.language.unwrap_or_default(),
            translations_dir: cfg
                .translations_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TRANSLATIONS_DIR)),
            api_key: weather.api_key.unwrap_or_default(),
            city: weather.city.unwrap_or_else(|| DEFAULT_CITY.to_string()),
            weather_url: weather.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            weather_interval: Duration::from_secs(
                weather.interval_secs.unwrap_or(DEFAULT_WEATHER_INTERVAL_SECS),
            ),
            hands_interval: HANDS_INTERVAL,
            width: display.width.unwrap_or(DEFAULT_WIDTH),
            height: display.height.unwrap_or(DEFAULT_HEIGHT),
            scale: display.scale.unwrap_or(1),
            headless: display.headless.unwrap_or(false) || cli.snapshot.is_some(),
            snapshot: cli.snapshot.clone(),
        }
    }
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Settings, Cli), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_from(&cli)?;

    if cli.dump_config {
        // Pretty YAML of effective config (nice for debugging)
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok((Settings::resolve(&cfg, &cli), cli))
}

/// Layer defaults, YAML and `cli`, then validate.
pub fn load_from(cli: &Cli) -> Result<Config, ConfigError> {
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
    // XDG-style: ~/.config/rigaclock/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/rigaclock/config.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["rigaclock.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.log_level.is_some()        { dst.log_level = src.log_level; }
    if src.language.is_some()         { dst.language = src.language; }
    if src.translations_dir.is_some() { dst.translations_dir = src.translations_dir; }
    // weather
    match (&mut dst.weather, src.weather) {
        (None, Some(c)) => dst.weather = Some(c),
        (Some(d), Some(s)) => merge_weather(d, s),
        _ => {}
    }
    // display
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_weather(dst: &mut WeatherConfig, src: WeatherConfig) {
    if src.api_key.is_some()       { dst.api_key = src.api_key; }
    if src.city.is_some()          { dst.city = src.city; }
    if src.base_url.is_some()      { dst.base_url = src.base_url; }
    if src.interval_secs.is_some() { dst.interval_secs = src.interval_secs; }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()    { dst.width = src.width; }
    if src.height.is_some()   { dst.height = src.height; }
    if src.scale.is_some()    { dst.scale = src.scale; }
    if src.headless.is_some() { dst.headless = src.headless; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()    { cfg.log_level = cli.log_level.clone(); }
    if cli.lang.is_some()         { cfg.language = cli.lang; }
    if cli.translations.is_some() { cfg.translations_dir = cli.translations.clone(); }

    let any_weather = cli.api_key.is_some() || cli.city.is_some() || cli.weather_url.is_some();
    if any_weather && cfg.weather.is_none() {
        cfg.weather = Some(WeatherConfig::default());
    }
    if let Some(weather) = cfg.weather.as_mut() {
        if cli.api_key.is_some()     { weather.api_key = cli.api_key.clone(); }
        if cli.city.is_some()        { weather.city = cli.city.clone(); }
        if cli.weather_url.is_some() { weather.base_url = cli.weather_url.clone(); }
    }

    let any_display = cli.width.is_some() || cli.height.is_some() || cli.scale.is_some() || cli.headless;
    if any_display && cfg.display.is_none() {
        cfg.display = Some(DisplayConfig::default());
    }
    if let Some(display) = cfg.display.as_mut() {
        if cli.width.is_some()  { display.width = cli.width; }
        if cli.height.is_some() { display.height = cli.height; }
        if cli.scale.is_some()  { display.scale = cli.scale; }
        if cli.headless         { display.headless = Some(true); }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) || display.height == Some(0) {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
        if let Some(scale) = display.scale {
            if !(1..=8).contains(&scale) {
                return Err(ConfigError::Validation("display scale must be 1..=8".into()));
            }
        }
    }
    if let Some(weather) = cfg.weather.as_ref() {
        if weather.city.as_deref().is_some_and(|c| c.trim().is_empty()) {
            return Err(ConfigError::Validation("weather city must not be empty".into()));
        }
        if weather.interval_secs == Some(0) {
            return Err(ConfigError::Validation("weather interval_secs must be > 0".into()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_yaml(dir: &Path, body: &str) -> PathBuf {
        let p = dir.join("config.yaml");
        fs::write(&p, body).unwrap();
        p
    }

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["rigaclock"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_yaml_then_cli_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(
            dir.path(),
            "language: ru\nweather:\n  api_key: from-file\n  city: Jurmala\ndisplay:\n  width: 500\n",
        );
        let path = path.to_str().unwrap();
        let cfg = load_from(&cli(&["--config", path, "--city", "Riga", "--height", "700"])).unwrap();

        assert_eq!(cfg.language, Some(Language::Ru));
        let weather = cfg.weather.unwrap();
        assert_eq!(weather.api_key.as_deref(), Some("from-file"));
        assert_eq!(weather.city.as_deref(), Some("Riga"));
        let display = cfg.display.unwrap();
        assert_eq!(display.width, Some(500));
        assert_eq!(display.height, Some(700));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = load_from(&cli(&["--config", "/nonexistent/rigaclock.yaml"])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_unsupported_language_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_yaml(dir.path(), "language: de\n");
        let err = load_from(&cli(&["--config", path.to_str().unwrap()])).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
        assert!(Cli::try_parse_from(["rigaclock", "--lang", "de"]).is_err());
    }

    #[test]
    fn test_validation() {
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--width", "0"]));
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--scale", "9"]));
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &cli(&["--city", "  "]));
        assert!(validate(&cfg).is_err());

        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_settings_defaults() {
        let s = Settings::resolve(&Config::default(), &Cli::default());
        assert_eq!(s.language, Language::En);
        assert_eq!(s.city, "Riga");
        assert_eq!(s.weather_url, DEFAULT_BASE_URL);
        assert_eq!(s.weather_interval, Duration::from_secs(600));
        assert_eq!(s.hands_interval, Duration::from_millis(1000));
        assert_eq!((s.width, s.height, s.scale), (440, 640, 1));
        assert_eq!(s.translations_dir, PathBuf::from("assets/lang"));
        assert_eq!(s.log_level, "info");
        assert!(!s.headless);
    }

    #[test]
    fn test_snapshot_implies_headless_and_debug_wins() {
        let args = cli(&["--snapshot", "out.ppm", "--debug", "--log-level", "warn"]);
        let mut cfg = Config::default();
        apply_cli_overrides(&mut cfg, &args);
        let s = Settings::resolve(&cfg, &args);
        assert!(s.headless);
        assert_eq!(s.snapshot, Some(PathBuf::from("out.ppm")));
        assert_eq!(s.log_level, "debug");
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut dst = Config {
            weather: Some(WeatherConfig {
                api_key: Some("a".into()),
                city: Some("Riga".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        merge(
            &mut dst,
            Config {
                weather: Some(WeatherConfig {
                    city: Some("Liepaja".into()),
                    ..Default::default()
                }),
                ..Default::default()
            },
        );
        let weather = dst.weather.unwrap();
        assert_eq!(weather.api_key.as_deref(), Some("a"));
        assert_eq!(weather.city.as_deref(), Some("Liepaja"));
    }
}
