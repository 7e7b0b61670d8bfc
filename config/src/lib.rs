//! Configuration loading for Frost.
//!
//! Reads `$FROST_CONFIG`, or `~/.frost/config.toml` when the variable is
//! unset, and resolves the raw TOML into [`FrostSettings`]. Missing files mean
//! defaults. [`load`] logs unreadable or invalid files and falls back to
//! defaults; [`load_from`] and [`parse`] report the error instead.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

use frost_types::settings::{AuditLevel, FrostSettings, SerializationSettings, StoreSettings};

pub const CONFIG_ENV: &str = "FROST_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown audit level `{0}` (expected warn, debug or off)")]
    AuditLevel(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    store: Option<RawStore>,
    audit: Option<RawAudit>,
    serialization: Option<RawSerialization>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawStore {
    initial_capacity: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAudit {
    denials: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSerialization {
    pretty: Option<bool>,
}

impl RawConfig {
    fn resolve(self) -> Result<FrostSettings, ConfigError> {
        let audit = match self.audit.and_then(|audit| audit.denials) {
            Some(raw) => AuditLevel::parse(&raw).ok_or(ConfigError::AuditLevel(raw))?,
            None => AuditLevel::default(),
        };
        let capacity = self
            .store
            .and_then(|store| store.initial_capacity)
            .unwrap_or(StoreSettings::DEFAULT_CAPACITY);
        let pretty = self
            .serialization
            .and_then(|serialization| serialization.pretty)
            .unwrap_or(false);
        Ok(FrostSettings::new(
            StoreSettings::new(capacity, audit),
            SerializationSettings::new(pretty),
        ))
    }
}

pub fn parse(content: &str) -> Result<FrostSettings, ConfigError> {
    toml::from_str::<RawConfig>(content)?.resolve()
}

/// Load settings from `path`. A missing file yields defaults.
pub fn load_from(path: &Path) -> Result<FrostSettings, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => parse(&content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(FrostSettings::default()),
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load settings from the default location, never failing.
#[must_use]
pub fn load() -> FrostSettings {
    let Some(path) = config_path() else {
        return FrostSettings::default();
    };
    match load_from(&path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Failed to load config at {:?}: {}", path, err);
            FrostSettings::default()
        }
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    path_from(env::var_os(CONFIG_ENV), dirs::home_dir())
}

fn path_from(explicit: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    match explicit {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => home.map(|home| home.join(".frost").join("config.toml")),
    }
}
