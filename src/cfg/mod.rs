use std::{io, path::PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::asteroids;

mod storage_native;

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("no reasonable config directory was found")]
    NoConfigDirectory,
    #[error("could not open config file: {0}")]
    Open(io::Error),
    #[error("could not read config file: {0}")]
    Read(io::Error),
    #[error("malformed config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orrery".to_owned(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct AssetConfig {
    /// Texture files are looked up relative to this directory.
    pub directory: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct AsteroidConfig {
    pub count: usize,
    pub seed: u64,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            count: asteroids::DEFAULT_COUNT,
            seed: asteroids::DEFAULT_SEED,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct HudConfig {
    pub show_fps: bool,
}

impl Default for HudConfig {
    fn default() -> Self {
        Self { show_fps: true }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct LogConfig {
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub asteroids: AsteroidConfig,
    pub hud: HudConfig,
    pub log: LogConfig,
}

impl Config {
    pub(crate) fn parse(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads `config.toml` from the platform config directory.
    ///
    /// A missing file gives the defaults.
    pub(crate) fn read() -> Result<Self, ConfigError> {
        let path = storage_native::CONFIG_PATH
            .as_ref()
            .ok_or(ConfigError::NoConfigDirectory)?;

        match storage_native::read(path)? {
            Some(source) => Self::parse(&source),
            None => Ok(Self::default()),
        }
    }

    /// Like [`Config::read`], but falls back to the defaults on error.
    ///
    /// Logging is usually not set up yet when this runs, since the log
    /// level comes from here, so the outcome is returned for later.
    pub(crate) fn load() -> (Self, Option<ConfigError>) {
        match Self::read() {
            Ok(config) => (config, None),
            Err(error) => (Self::default(), Some(error)),
        }
    }

    pub(crate) fn path() -> Option<&'static PathBuf> {
        storage_native::CONFIG_PATH.as_ref()
    }
}
