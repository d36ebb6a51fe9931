//! Server configuration.
//!
//! Process settings come from environment variables. The per-direction
//! thresholds and default routes can additionally be overridden with a JSON
//! file named by `TRANSFER_CONFIG`:
//!
//! ```json
//! {
//!   "TRA2THSR": {
//!     "thresholds": { "depart_early": 15, "arrive_early": 20, "last_arrival_time": 540, "step": 10 },
//!     "route": { "startStation": "1190-北新竹", "endStation": "1000", "transferStation": "1194" }
//!   },
//!   "THSR2TRA": {
//!     "thresholds": { "depart_early": 30, "arrive_early": -1, "last_arrival_time": -1 }
//!   }
//! }
//! ```
//!
//! Missing sections, and a missing `thresholds` or `route` within a section,
//! keep their defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::{CacheConfig, DEFAULT_TTL};
use crate::domain::Direction;
use crate::feasibility::ThresholdConfig;
use crate::tra::{DEFAULT_BASE_URL, Route, TraConfig};

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// Errors while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable had an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },

    /// The settings file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for [`Settings`].
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Process-level configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: SocketAddr,

    /// TRA client settings.
    pub tra: TraConfig,

    /// Response cache settings.
    pub cache: CacheConfig,

    /// Per-direction thresholds and routes.
    pub settings: Settings,
}

impl ServerConfig {
    /// Read configuration from the environment.
    ///
    /// | variable           | default                |
    /// |--------------------|------------------------|
    /// | `TRANSFER_BIND_ADDR` | `127.0.0.1:3000`     |
    /// | `TRA_BASE_URL`     | the production TRA site |
    /// | `TRA_TIMEOUT_SECS` | `30`                   |
    /// | `TRA_MAX_CONCURRENT` | `4`                  |
    /// | `CACHE_TTL_SECS`   | `1800`                 |
    /// | `TRANSFER_CONFIG`  | none (built-in settings) |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let bind_addr: SocketAddr = parse_var(&lookup, "TRANSFER_BIND_ADDR")?
            .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR));

        let mut tra = TraConfig::default()
            .with_base_url(lookup("TRA_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()));
        if let Some(secs) = parse_var(&lookup, "TRA_TIMEOUT_SECS")? {
            tra = tra.with_timeout(secs);
        }
        if let Some(n) = parse_var(&lookup, "TRA_MAX_CONCURRENT")? {
            tra = tra.with_max_concurrent(n);
        }

        let ttl = parse_var::<u64, _>(&lookup, "CACHE_TTL_SECS")?
            .map_or(DEFAULT_TTL, Duration::from_secs);
        let cache = CacheConfig {
            ttl,
            ..CacheConfig::default()
        };

        let settings = match lookup("TRANSFER_CONFIG") {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        Ok(Self {
            bind_addr,
            tra,
            cache,
            settings,
        })
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&'static str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar { name, value }),
    }
}

/// Thresholds and default route for one direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectionSettings {
    pub thresholds: ThresholdConfig,
    pub route: Route,
}

impl DirectionSettings {
    /// Built-in settings for a direction.
    pub fn default_for(direction: Direction) -> Self {
        let thresholds = match direction {
            Direction::TraToThsr => ThresholdConfig::rail_first(),
            Direction::ThsrToTra => ThresholdConfig::high_speed_first(),
        };
        Self {
            thresholds,
            route: Route::default_for(direction),
        }
    }
}

/// Settings for both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SettingsFile")]
pub struct Settings {
    #[serde(rename = "TRA2THSR")]
    pub rail_first: DirectionSettings,

    #[serde(rename = "THSR2TRA")]
    pub high_speed_first: DirectionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rail_first: DirectionSettings::default_for(Direction::TraToThsr),
            high_speed_first: DirectionSettings::default_for(Direction::ThsrToTra),
        }
    }
}

/// Settings as written in the file, where any section may be left out.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(rename = "TRA2THSR", default)]
    rail_first: DirectionSection,

    #[serde(rename = "THSR2TRA", default)]
    high_speed_first: DirectionSection,
}

#[derive(Debug, Default, Deserialize)]
struct DirectionSection {
    thresholds: Option<ThresholdConfig>,
    route: Option<Route>,
}

impl DirectionSection {
    fn resolve(self, direction: Direction) -> DirectionSettings {
        let defaults = DirectionSettings::default_for(direction);
        DirectionSettings {
            thresholds: self.thresholds.unwrap_or(defaults.thresholds),
            route: self.route.unwrap_or(defaults.route),
        }
    }
}

impl From<SettingsFile> for Settings {
    fn from(file: SettingsFile) -> Self {
        Self {
            rail_first: file.rail_first.resolve(Direction::TraToThsr),
            high_speed_first: file.high_speed_first.resolve(Direction::ThsrToTra),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Settings for a direction.
    pub fn for_direction(&self, direction: Direction) -> &DirectionSettings {
        match direction {
            Direction::TraToThsr => &self.rail_first,
            Direction::ThsrToTra => &self.high_speed_first,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    fn lookup(vars: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            vars.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.tra.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.tra.timeout_secs, 30);
        assert_eq!(config.cache.ttl, Duration::from_secs(1800));
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn environment_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("TRANSFER_BIND_ADDR", "0.0.0.0:8080"),
            ("TRA_BASE_URL", "http://localhost:9000"),
            ("TRA_TIMEOUT_SECS", "5"),
            ("TRA_MAX_CONCURRENT", "2"),
            ("CACHE_TTL_SECS", " 60 "),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(config.tra.base_url, "http://localhost:9000");
        assert_eq!(config.tra.timeout_secs, 5);
        assert_eq!(config.tra.max_concurrent, 2);
        assert_eq!(config.cache.ttl, Duration::from_secs(60));
    }

    #[test]
    fn invalid_variable_is_reported() {
        let err = ServerConfig::from_lookup(lookup(&[("CACHE_TTL_SECS", "soon")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for CACHE_TTL_SECS: soon");
    }

    #[test]
    fn default_settings_per_direction() {
        let settings = Settings::default();
        assert_eq!(
            settings.for_direction(Direction::TraToThsr).thresholds,
            ThresholdConfig::rail_first()
        );
        assert_eq!(
            settings.for_direction(Direction::ThsrToTra).route,
            Route::default_high_speed_first()
        );
    }

    #[test]
    fn load_partial_settings_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transfer.json");
        std::fs::write(
            &path,
            r#"{
                "THSR2TRA": {
                    "thresholds": { "depart_early": 45, "arrive_early": -1, "last_arrival_time": -1, "step": 5 },
                    "route": { "startStation": "0990", "endStation": "1210", "transferStation": "1194" }
                }
            }"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(settings.rail_first, DirectionSettings::default_for(Direction::TraToThsr));
        let back = settings.for_direction(Direction::ThsrToTra);
        assert_eq!(back.thresholds.depart_early_minutes, Some(45));
        assert_eq!(back.thresholds.arrive_early_minutes, None);
        assert_eq!(back.thresholds.step_minutes, 5);
        assert_eq!(back.route.start_station, "0990");
    }

    #[test]
    fn settings_file_via_environment() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transfer.json");
        std::fs::write(&path, "{}").unwrap();

        let path_str = path.to_string_lossy().to_string();
        let config =
            ServerConfig::from_lookup(lookup(&[("TRANSFER_CONFIG", path_str.as_str())])).unwrap();
        assert_eq!(config.settings, Settings::default());
    }

    #[test]
    fn missing_settings_file() {
        let dir = tempdir().unwrap();
        let err = Settings::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn sections_may_omit_route_or_thresholds() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("transfer.json");
        std::fs::write(
            &path,
            r#"{
                "TRA2THSR": {
                    "thresholds": { "depart_early": 15, "arrive_early": 20, "last_arrival_time": 540, "step": 10 },
                    "route": { "startStation": "1190-北新竹", "endStation": "1000", "transferStation": "1194" }
                },
                "THSR2TRA": {
                    "thresholds": { "depart_early": 30, "arrive_early": -1, "last_arrival_time": -1 }
                }
            }"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn route_only_section_keeps_default_thresholds() {
        let settings: Settings = serde_json::from_str(
            r#"{ "TRA2THSR": { "route": { "startStation": "1210", "endStation": "1000", "transferStation": "1194" } } }"#,
        )
        .unwrap();

        assert_eq!(settings.rail_first.thresholds, ThresholdConfig::rail_first());
        assert_eq!(settings.rail_first.route.start_station, "1210");
        assert_eq!(
            settings.high_speed_first,
            DirectionSettings::default_for(Direction::ThsrToTra)
        );
    }

    #[test]
    fn malformed_settings_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn settings_roundtrip_through_json() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Settings::default());
    }
}
