//! `turnout_map.toml` configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use turnout_map_names::{AliasError, AliasTable};
use turnout_map_source::{Location, SourceLocations};

/// Config file read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "turnout_map.toml";

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path of the config file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("Invalid config {path}: {source}")]
    Toml {
        /// Path of the config file.
        path: PathBuf,
        /// The underlying parse error.
        source: toml::de::Error,
    },
}

/// Top-level configuration. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub sources: SourcesConfig,
    pub output: OutputConfig,
    /// Extra `source spelling = canonical spelling` entries, applied on top
    /// of the built-in alias table.
    pub aliases: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    pub classification: Location,
    pub turnout: Location,
    pub boundaries: Location,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            classification: Location::parse("data/party_system.json"),
            turnout: Location::parse("data/voter-turnout-by-country-2026.csv"),
            boundaries: Location::parse("data/countries.geojson"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/generated"),
        }
    }
}

impl AppConfig {
    /// Loads configuration.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`]
    /// is read if present and defaults are used otherwise.
    ///
    /// # Errors
    ///
    /// * If the config file cannot be read
    /// * If the config file is not valid TOML or has unknown keys
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_PATH);
                if !default.is_file() {
                    log::debug!("No {DEFAULT_CONFIG_PATH} found, using defaults");
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        let config = Self::parse(&text).map_err(|source| ConfigError::Toml {
            path: path.clone(),
            source,
        })?;

        log::info!("Loaded config from {}", path.display());

        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// * If `text` is not valid TOML or has unknown keys
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Source locations with any command-line overrides applied.
    #[must_use]
    pub fn source_locations(
        &self,
        classification: Option<&str>,
        turnout: Option<&str>,
        boundaries: Option<&str>,
    ) -> SourceLocations {
        let pick = |flag: Option<&str>, configured: &Location| {
            flag.map_or_else(|| configured.clone(), Location::parse)
        };

        SourceLocations {
            classification: pick(classification, &self.sources.classification),
            turnout: pick(turnout, &self.sources.turnout),
            boundaries: pick(boundaries, &self.sources.boundaries),
        }
    }

    /// The built-in alias table extended with configured aliases.
    ///
    /// # Errors
    ///
    /// * If a configured alias is blank or creates a cycle
    pub fn alias_table(&self) -> Result<AliasTable, AliasError> {
        AliasTable::default().with_overrides(&self.aliases)
    }
}
