#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loading of the three map inputs.
//!
//! Each input lives at a [`Location`], either a local path or an
//! `http(s)://` URL. [`SourceLoader::load_all`] fetches them one after
//! another in a fixed order (classification, turnout, boundaries) and
//! parses each independently. Any failure is fatal and names the
//! [`Resource`] that could not be loaded.

pub mod location;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::{AsRefStr, Display, EnumString};
use turnout_map_geography::{BoundarySet, GeoError};
use turnout_map_tabular::{Table, TabularError};

pub use location::Location;

/// The three inputs a map is built from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Resource {
    /// Country name to party-system classification, as a JSON object
    Classification,
    /// Comma- or tab-delimited turnout table
    Turnout,
    /// GeoJSON `FeatureCollection` of country boundaries
    Boundaries,
}

/// Errors that can occur while loading an input.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Reading a local file failed.
    #[error("Failed to read {resource} from {location}: {source}")]
    Io {
        /// The input being loaded.
        resource: Resource,
        /// Where it was loaded from.
        location: Location,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The HTTP request failed in transport or while reading the body.
    #[error("Failed to fetch {resource} from {location}: {source}")]
    Http {
        /// The input being loaded.
        resource: Resource,
        /// Where it was loaded from.
        location: Location,
        /// The underlying HTTP error.
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("Failed to load {resource} from {location}: HTTP {status}")]
    Status {
        /// The input being loaded.
        resource: Resource,
        /// Where it was loaded from.
        location: Location,
        /// The HTTP status code.
        status: u16,
    },

    /// The classification input is not valid JSON.
    #[error("Invalid JSON in {resource} from {location}: {source}")]
    Json {
        /// The input being loaded.
        resource: Resource,
        /// Where it was loaded from.
        location: Location,
        /// The underlying parse error.
        source: serde_json::Error,
    },

    /// The classification input is JSON but not an object.
    #[error("Expected a JSON object in {resource} from {location}")]
    NotAnObject {
        /// The input being loaded.
        resource: Resource,
        /// Where it was loaded from.
        location: Location,
    },

    /// The turnout table could not be parsed.
    #[error("Invalid table in {resource} from {location}: {source}")]
    Table {
        /// The input being loaded.
        resource: Resource,
        /// Where it was loaded from.
        location: Location,
        /// The underlying parse error.
        source: TabularError,
    },

    /// The boundary collection could not be parsed.
    #[error("Invalid boundaries in {resource} from {location}: {source}")]
    Boundaries {
        /// The input being loaded.
        resource: Resource,
        /// Where it was loaded from.
        location: Location,
        /// The underlying parse error.
        source: GeoError,
    },
}

impl SourceError {
    /// The input that failed to load, if the error concerns one.
    #[must_use]
    pub const fn resource(&self) -> Option<Resource> {
        match self {
            Self::Client(_) => None,
            Self::Io { resource, .. }
            | Self::Http { resource, .. }
            | Self::Status { resource, .. }
            | Self::Json { resource, .. }
            | Self::NotAnObject { resource, .. }
            | Self::Table { resource, .. }
            | Self::Boundaries { resource, .. } => Some(*resource),
        }
    }
}

/// Where each input is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocations {
    pub classification: Location,
    pub turnout: Location,
    pub boundaries: Location,
}

impl SourceLocations {
    /// Location of one input.
    #[must_use]
    pub const fn get(&self, resource: Resource) -> &Location {
        match resource {
            Resource::Classification => &self.classification,
            Resource::Turnout => &self.turnout,
            Resource::Boundaries => &self.boundaries,
        }
    }
}

impl fmt::Display for SourceLocations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "classification={}, turnout={}, boundaries={}",
            self.classification, self.turnout, self.boundaries
        )
    }
}

/// Raw classification mapping as it appears in the input.
pub type ClassificationMap = Map<String, Value>;

/// All three inputs, parsed.
#[derive(Debug, Clone)]
pub struct LoadedSources {
    pub classification: ClassificationMap,
    pub turnout: Table,
    pub boundaries: BoundarySet,
}

/// Fetches inputs from files or over HTTP.
#[derive(Debug, Clone)]
pub struct SourceLoader {
    client: reqwest::Client,
}

impl SourceLoader {
    /// Creates a loader with a default HTTP client.
    ///
    /// # Errors
    ///
    /// * If the HTTP client cannot be built
    pub fn new() -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(SourceError::Client)?;
        Ok(Self { client })
    }

    /// Loads and parses all three inputs, in order: classification,
    /// turnout, boundaries. Stops at the first failure.
    ///
    /// # Errors
    ///
    /// * If any input cannot be fetched or parsed
    pub async fn load_all(
        &self,
        locations: &SourceLocations,
    ) -> Result<LoadedSources, SourceError> {
        log::info!("Loading sources: {locations}");

        let classification = self.load_classification(&locations.classification).await?;
        let turnout = self.load_turnout(&locations.turnout).await?;
        let boundaries = self.load_boundaries(&locations.boundaries).await?;

        Ok(LoadedSources {
            classification,
            turnout,
            boundaries,
        })
    }

    /// Loads the party-system classification object.
    ///
    /// # Errors
    ///
    /// * If the input cannot be fetched
    /// * If it is not valid JSON
    /// * If the top-level JSON value is not an object
    pub async fn load_classification(
        &self,
        location: &Location,
    ) -> Result<ClassificationMap, SourceError> {
        let resource = Resource::Classification;
        let text = self.fetch_text(resource, location).await?;

        let value: Value = serde_json::from_str(&text).map_err(|source| SourceError::Json {
            resource,
            location: location.clone(),
            source,
        })?;

        match value {
            Value::Object(map) => {
                log::debug!("Classification input has {} entries", map.len());
                Ok(map)
            }
            _ => Err(SourceError::NotAnObject {
                resource,
                location: location.clone(),
            }),
        }
    }

    /// Loads the turnout table as raw text.
    ///
    /// # Errors
    ///
    /// * If the input cannot be fetched
    pub async fn load_turnout_text(&self, location: &Location) -> Result<String, SourceError> {
        self.fetch_text(Resource::Turnout, location).await
    }

    /// Loads and parses the turnout table.
    ///
    /// # Errors
    ///
    /// * If the input cannot be fetched or parsed
    pub async fn load_turnout(&self, location: &Location) -> Result<Table, SourceError> {
        let text = self.load_turnout_text(location).await?;
        let table =
            turnout_map_tabular::parse_table(&text).map_err(|source| SourceError::Table {
                resource: Resource::Turnout,
                location: location.clone(),
                source,
            })?;

        log::info!(
            "Turnout table: {} rows, delimiter {:?}",
            table.rows.len(),
            table.delimiter
        );

        Ok(table)
    }

    /// Loads and parses the boundary `FeatureCollection`.
    ///
    /// # Errors
    ///
    /// * If the input cannot be fetched
    /// * If it is not a GeoJSON `FeatureCollection`
    pub async fn load_boundaries(&self, location: &Location) -> Result<BoundarySet, SourceError> {
        let resource = Resource::Boundaries;
        let text = self.fetch_text(resource, location).await?;

        let boundaries = BoundarySet::parse(&text).map_err(|source| SourceError::Boundaries {
            resource,
            location: location.clone(),
            source,
        })?;

        log::info!("Boundaries: {} features", boundaries.len());

        Ok(boundaries)
    }

    async fn fetch_text(
        &self,
        resource: Resource,
        location: &Location,
    ) -> Result<String, SourceError> {
        let text = match location {
            Location::Path(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| SourceError::Io {
                        resource,
                        location: location.clone(),
                        source,
                    })?
            }
            Location::Url(url) => {
                let http_err = |source| SourceError::Http {
                    resource,
                    location: location.clone(),
                    source,
                };

                let response = self.client.get(url).send().await.map_err(http_err)?;

                let status = response.status();
                if !status.is_success() {
                    return Err(SourceError::Status {
                        resource,
                        location: location.clone(),
                        status: status.as_u16(),
                    });
                }

                response.text().await.map_err(http_err)?
            }
        };

        log::info!("Loaded {resource} from {location} ({} bytes)", text.len());

        Ok(text)
    }
}
