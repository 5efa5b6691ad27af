#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Country boundary features.
//!
//! Wraps a GeoJSON `FeatureCollection` of country polygons. Boundary files
//! disagree on which property holds the country name, so the display name
//! is taken from the first populated key of [`NAME_PROPERTIES`].
//! [`BoundarySet::normalize_names`] writes that name back, trimmed and
//! upper-cased, into each feature's `ADMIN` property.

use std::str::FromStr;

use geojson::{Feature, FeatureCollection, GeoJson};
use serde_json::Value;
use thiserror::Error;
use turnout_map_names::normalize_name;

/// Feature properties searched for a display name, in priority order.
pub const NAME_PROPERTIES: &[&str] = &["ADMIN", "NAME", "name", "SOVEREIGNT"];

/// Property that holds the normalized display name after
/// [`BoundarySet::normalize_names`].
pub const ADMIN_PROPERTY: &str = "ADMIN";

/// Display name for a feature with no usable name property.
pub const UNKNOWN_NAME: &str = "UNKNOWN";

/// Errors that can occur while reading boundary data.
#[derive(Debug, Error)]
pub enum GeoError {
    /// The input is not valid GeoJSON.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// The input is valid GeoJSON but not a `FeatureCollection`.
    #[error("Expected a FeatureCollection, found a {found}")]
    NotFeatureCollection {
        /// The GeoJSON object type that was found.
        found: &'static str,
    },
}

/// A loaded collection of boundary features.
#[derive(Debug, Clone)]
pub struct BoundarySet {
    collection: FeatureCollection,
}

impl FromStr for BoundarySet {
    type Err = GeoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<GeoJson>()? {
            GeoJson::FeatureCollection(collection) => Ok(Self::from_collection(collection)),
            GeoJson::Feature(_) => Err(GeoError::NotFeatureCollection { found: "Feature" }),
            GeoJson::Geometry(_) => Err(GeoError::NotFeatureCollection { found: "Geometry" }),
        }
    }
}

impl BoundarySet {
    #[must_use]
    pub const fn from_collection(collection: FeatureCollection) -> Self {
        Self { collection }
    }

    /// Parses a GeoJSON `FeatureCollection`.
    ///
    /// # Errors
    ///
    /// * If `text` is not GeoJSON
    /// * If the GeoJSON object is not a `FeatureCollection`
    pub fn parse(text: &str) -> Result<Self, GeoError> {
        text.parse()
    }

    /// Rewrites every feature's `ADMIN` property to its normalized display
    /// name, creating the property bag where a feature has none.
    pub fn normalize_names(&mut self) {
        for feature in &mut self.collection.features {
            let name = normalize_name(&display_name(feature));
            feature.set_property(ADMIN_PROPERTY, name);
        }
        log::debug!(
            "Normalized display names on {} features",
            self.collection.features.len()
        );
    }

    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.collection.features
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.features.is_empty()
    }

    #[must_use]
    pub fn into_collection(self) -> FeatureCollection {
        self.collection
    }
}

/// Returns a feature's display name, before normalization.
///
/// The first of [`NAME_PROPERTIES`] holding a non-empty string or a
/// non-zero number wins. Numbers are rendered as JSON renders them. When
/// none qualifies the name is [`UNKNOWN_NAME`].
#[must_use]
pub fn display_name(feature: &Feature) -> String {
    NAME_PROPERTIES
        .iter()
        .find_map(|key| feature.property(key).and_then(name_from_value))
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

/// Returns the normalized name stored in a feature's `ADMIN` property, or
/// the normalized display name if the property is missing.
#[must_use]
pub fn admin_name(feature: &Feature) -> String {
    match feature.property(ADMIN_PROPERTY) {
        Some(Value::String(s)) => normalize_name(s),
        _ => normalize_name(&display_name(feature)),
    }
}

fn name_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(properties: Value) -> Feature {
        Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: properties.as_object().cloned(),
            foreign_members: None,
        }
    }

    #[test]
    fn prefers_admin() {
        let f = feature(serde_json::json!({ "ADMIN": "France", "NAME": "Fr." }));
        assert_eq!(display_name(&f), "France");
    }

    #[test]
    fn falls_back_through_name_keys() {
        let f = feature(serde_json::json!({ "ADMIN": "", "NAME": "", "name": "Spain" }));
        assert_eq!(display_name(&f), "Spain");

        let f = feature(serde_json::json!({ "ADMIN": null, "SOVEREIGNT": "Norway" }));
        assert_eq!(display_name(&f), "Norway");
    }

    #[test]
    fn missing_names_are_unknown() {
        let f = feature(serde_json::json!({ "ISO_A3": "XKX", "NAME": 0 }));
        assert_eq!(display_name(&f), UNKNOWN_NAME);

        let f = Feature {
            properties: None,
            ..feature(serde_json::json!({}))
        };
        assert_eq!(display_name(&f), UNKNOWN_NAME);
    }

    #[test]
    fn numeric_names_are_rendered() {
        let f = feature(serde_json::json!({ "NAME": 42 }));
        assert_eq!(display_name(&f), "42");
    }

    #[test]
    fn parses_feature_collection() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "NAME": " Germany " }, "geometry": null },
                { "type": "Feature", "properties": null, "geometry": null }
            ]
        }"#;
        let mut set = BoundarySet::parse(text).unwrap();
        assert_eq!(set.len(), 2);

        set.normalize_names();
        assert_eq!(
            set.features()[0].property(ADMIN_PROPERTY),
            Some(&Value::String("GERMANY".to_string()))
        );
        assert_eq!(admin_name(&set.features()[1]), UNKNOWN_NAME);
    }

    #[test]
    fn rejects_non_collection() {
        let text = r#"{ "type": "Feature", "properties": {}, "geometry": null }"#;
        assert!(matches!(
            BoundarySet::parse(text),
            Err(GeoError::NotFeatureCollection { found: "Feature" })
        ));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            BoundarySet::parse("not geojson"),
            Err(GeoError::GeoJson(_))
        ));
    }
}
