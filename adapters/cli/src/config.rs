use std::{
    fs,
    path::{Path, PathBuf},
};

use risk_rush_core::GameConfig;
use thiserror::Error;

/// Errors raised while loading a tuning file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file {path}")]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file contents are not a valid tuning document.
    #[error("failed to parse config file {path}")]
    Parse {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying TOML failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Where the active tuning came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigSource {
    /// Compiled-in defaults.
    Defaults,
    /// A TOML file that was read successfully.
    File(PathBuf),
}

/// Parses a TOML tuning document; missing fields keep their defaults.
pub fn parse_config(contents: &str, path: &Path) -> Result<GameConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses the tuning file at `path`.
pub fn read_config(path: &Path) -> Result<GameConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&contents, path)
}

/// Loads the tuning file if one was given, falling back to defaults on any failure.
#[must_use]
pub fn load_or_default(path: Option<&Path>) -> (GameConfig, ConfigSource) {
    let Some(path) = path else {
        return (GameConfig::default(), ConfigSource::Defaults);
    };

    match read_config(path) {
        Ok(config) => (config, ConfigSource::File(path.to_path_buf())),
        Err(error) => {
            log::warn!("{error}: {}; using built-in defaults", root_cause(&error));
            (GameConfig::default(), ConfigSource::Defaults)
        }
    }
}

fn root_cause(error: &ConfigError) -> String {
    match error {
        ConfigError::Read { source, .. } => source.to_string(),
        ConfigError::Parse { source, .. } => source.message().to_owned(),
    }
}
