/*
 *  config.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  YAML configuration with command line overrides
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
use chrono_tz::Tz;
use clap::{Parser, ValueEnum, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::glyph::IconMap;

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

/// Everything a render pass needs. Built once at start-up and passed by
/// reference from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub log_level: Option<String>,
    pub location: Location,
    pub clocks: Clocks,
    pub weather: WeatherConfig,
    pub sun: SunConfig,
    pub transit: TransitConfig,
    pub aircraft: AircraftConfig,
    pub http: HttpConfig,
    pub display: DisplayConfig,
    /// per-glyph overrides, merged over the built-in codes
    pub icon_map: IconMap,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl Default for Location {
    fn default() -> Self {
        Self { lat: 40.6908507, lng: -73.9981995 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneLabel {
    pub tz: Tz,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Clocks {
    pub local: ZoneLabel,
    pub other: ZoneLabel,
}

impl Default for Clocks {
    fn default() -> Self {
        Self {
            local: ZoneLabel { tz: chrono_tz::America::New_York, label: "NY".into() },
            other: ZoneLabel { tz: chrono_tz::Europe::London, label: "LN".into() },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    pub base_url: String,
    /// gridpoint `office/x,y`
    pub station: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self { base_url: "https://api.weather.gov".into(), station: "OKX/31,34".into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayLengthMode {
    /// hours and minutes of daylight
    #[default]
    Corrected,
    /// minutes taken as `seconds % 60`, as older dashboards showed it
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SunConfig {
    pub base_url: String,
    pub day_length: DayLengthMode,
    /// compute sunrise/sunset locally when the feed is down
    pub fallback_local: bool,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.sunrise-sunset.org".into(),
            day_length: DayLengthMode::default(),
            fallback_local: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitConfig {
    pub base_url: String,
    pub station: String,
    /// headsign drawn on the red layer
    pub highlight_headsign: String,
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: "https://path.api.razza.dev".into(),
            station: "grove_street".into(),
            highlight_headsign: "World Trade Center".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftConfig {
    pub base_url: String,
    /// half-width of the lat/lng query box
    pub radius_deg: f64,
    /// barometric altitude in metres, exclusive
    pub min_altitude: f64,
    pub max_rows: usize,
}

impl Default for AircraftConfig {
    fn default() -> Self {
        Self {
            base_url: "https://opensky-network.org".into(),
            radius_deg: 0.3,
            min_altitude: 100.0,
            max_rows: 7,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_ms: u64,
    pub timeout_ms: u64,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { connect_timeout_ms: 5_000, timeout_ms: 15_000, user_agent: None }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    /// Waveshare 7.5" B HD over SPI
    #[default]
    #[value(name = "epd7in5b_hd")]
    #[serde(rename = "epd7in5b_hd")]
    Epd7in5bHd,
    /// PBM/PPM files, no hardware
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiConfig {
    pub device: String,
    pub speed_hz: u32,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self { device: "/dev/spidev0.0".into(), speed_hz: 4_000_000 }
    }
}

/// BCM numbering, exported through sysfs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PinConfig {
    pub busy: u64,
    pub dc: u64,
    pub rst: u64,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self { busy: 24, dc: 25, rst: 17 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub driver: DriverKind,
    pub width: u32,
    pub height: u32,
    /// where the file driver writes its images
    pub output_dir: PathBuf,
    pub spi: SpiConfig,
    pub pins: PinConfig,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            driver: DriverKind::default(),
            width: 880,
            height: 528,
            output_dir: PathBuf::from("."),
            spi: SpiConfig::default(),
            pins: PinConfig::default(),
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "inkdash", about = "inkdash e-ink dashboard", version)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    #[arg(long, value_enum)]
    pub driver: Option<DriverKind>,
    /// output directory for the file driver
    #[arg(long, value_hint = ValueHint::DirPath)]
    pub output_dir: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;

    if cli.dump_config {
        println!("{}", dump_config(&cfg)?);
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Layer defaults, the YAML file and the CLI in that order.
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    let mut cfg = match cli.config.as_ref() {
        Some(p) if p.exists() => read_yaml(p)?,
        Some(p) => {
            return Err(ConfigError::Validation(format!("Config file not found: {}", p.display())));
        }
        None => match find_config_file() {
            Some(p) => read_yaml(&p)?,
            None => Config::default(),
        },
    };

    apply_cli_overrides(&mut cfg, cli);
    validate(&cfg)?;
    Ok(cfg)
}

/// Pretty YAML of the effective config
pub fn dump_config(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    if let Some(home) = home_dir() {
        let p = home.join(".config/inkdash/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/inkdash.yaml");
        if p.exists() { return Some(p) }
    }
    for candidate in &["inkdash.yaml", "config.yaml", "config/inkdash.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    // an empty file is all defaults
    if s.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(s)?)
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()  { cfg.log_level = cli.log_level.clone(); }
    if let Some(d) = cli.driver { cfg.display.driver = d; }
    if let Some(p) = cli.output_dir.as_ref() { cfg.display.output_dir = p.clone(); }
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let loc = cfg.location;
    if !(-90.0..=90.0).contains(&loc.lat) || !(-180.0..=180.0).contains(&loc.lng) {
        return Err(ConfigError::Validation(format!("location {},{} out of range", loc.lat, loc.lng)));
    }
    if cfg.display.width == 0 || cfg.display.height == 0 {
        return Err(ConfigError::Validation("display width/height must be > 0".into()));
    }
    if cfg.weather.station.trim().is_empty() {
        return Err(ConfigError::Validation("weather station must be set".into()));
    }
    if cfg.transit.station.trim().is_empty() {
        return Err(ConfigError::Validation("transit station must be set".into()));
    }
    if !(cfg.aircraft.radius_deg > 0.0) {
        return Err(ConfigError::Validation("aircraft radius_deg must be > 0".into()));
    }
    if cfg.http.timeout_ms == 0 || cfg.http.connect_timeout_ms == 0 {
        return Err(ConfigError::Validation("http timeouts must be > 0".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::Glyph;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.location, Location { lat: 40.6908507, lng: -73.9981995 });
        assert_eq!(cfg.weather.station, "OKX/31,34");
        assert_eq!(cfg.transit.station, "grove_street");
        assert_eq!(cfg.clocks.local.tz, chrono_tz::America::New_York);
        assert_eq!(cfg.clocks.other.label, "LN");
        assert_eq!(cfg.display.width, 880);
        assert_eq!(cfg.display.height, 528);
        assert_eq!(cfg.aircraft.max_rows, 7);
        assert!(validate(&cfg).is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let cfg = parse_yaml(
            "location:\n  lat: 51.5\n  lng: -0.12\n\
             clocks:\n  local: { tz: Europe/London, label: LDN }\n  other: { tz: Asia/Tokyo, label: TYO }\n\
             sun:\n  day_length: legacy\n\
             display:\n  driver: file\n  output_dir: /tmp/out\n\
             icon_map:\n  Sunny: 'X'\n",
        )
        .unwrap();
        assert_eq!(cfg.location.lat, 51.5);
        assert_eq!(cfg.clocks.other.tz, chrono_tz::Asia::Tokyo);
        assert_eq!(cfg.sun.day_length, DayLengthMode::Legacy);
        assert_eq!(cfg.display.driver, DriverKind::File);
        assert_eq!(cfg.display.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(cfg.display.width, 880);
        assert_eq!(cfg.weather.station, "OKX/31,34");
        assert_eq!(cfg.icon_map.code(Glyph::Sunny), 'X');
        assert_eq!(cfg.icon_map.code(Glyph::Clear), 'C');
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let r = parse_yaml("clocks:\n  local: { tz: Mars/Olympus, label: MO }\n");
        assert!(matches!(r, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(parse_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_validation() {
        let mut cfg = Config::default();
        cfg.location.lat = 123.0;
        assert!(matches!(validate(&cfg), Err(ConfigError::Validation(_))));

        let mut cfg = Config::default();
        cfg.display.width = 0;
        assert!(validate(&cfg).is_err());

        let mut cfg = Config::default();
        cfg.http.timeout_ms = 0;
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_cli_overrides_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level: warn\ndisplay:\n  driver: epd7in5b_hd").unwrap();

        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            log_level: Some("debug".into()),
            driver: Some(DriverKind::File),
            output_dir: Some(PathBuf::from("/var/tmp")),
            dump_config: false,
        };
        let cfg = load_with(&cli).unwrap();
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.display.driver, DriverKind::File);
        assert_eq!(cfg.display.output_dir, PathBuf::from("/var/tmp"));
    }

    #[test]
    fn test_missing_explicit_config() {
        let cli = Cli { config: Some(PathBuf::from("/nonexistent/inkdash.yaml")), ..Default::default() };
        assert!(matches!(load_with(&cli), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_dump_round_trips() {
        let cfg = Config::default();
        let yaml = dump_config(&cfg).unwrap();
        assert!(yaml.contains("epd7in5b_hd"));
        assert!(yaml.contains("America/New_York"));
        assert_eq!(parse_yaml(&yaml).unwrap(), cfg);
    }
}
