#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Joins boundary features with turnout and party-system data.
//!
//! Every name from every source passes through the same
//! [`AliasTable::canonicalize`], and the resulting canonical names are
//! the keys of plain `BTreeMap` lookups. The joined [`JoinedDataset`] is
//! read-only once built.
//!
//! Classification lookup tries the canonical name first and then the
//! normalized, un-aliased feature name, so classification files keyed by
//! either spelling both match.

pub mod classification;
pub mod turnout;

use std::collections::BTreeMap;

use geojson::Feature;
use serde_json::{Map, Value};
use turnout_map_country_models::{MatchDiagnostics, TurnoutRecord, UNKNOWN_CLASSIFICATION};
use turnout_map_geography::BoundarySet;
use turnout_map_names::{AliasTable, normalize_name};
use turnout_map_tabular::Row;

pub use classification::build_classification_table;
pub use turnout::{build_turnout_rows, build_turnout_table, parse_number};

/// A boundary feature together with its joined values.
#[derive(Debug, Clone)]
pub struct JoinedFeature {
    /// The feature, with `ADMIN` rewritten to [`raw_name`](Self::raw_name).
    pub feature: Feature,
    /// Normalized display name, before alias substitution.
    pub raw_name: String,
    /// Alias-resolved join key.
    pub canonical_name: String,
    /// Classification, or `"unknown"` when none was found.
    pub classification: String,
    /// Turnout figures, empty when unmatched.
    pub turnout: TurnoutRecord,
    /// Whether the canonical name appears in the turnout table.
    pub turnout_matched: bool,
    /// Whether a classification was found.
    pub party_matched: bool,
}

/// The joined data behind the map and the chart.
#[derive(Debug, Clone)]
pub struct JoinedDataset {
    aliases: AliasTable,
    turnout: BTreeMap<String, TurnoutRecord>,
    turnout_rows: Vec<(String, TurnoutRecord)>,
    classification: BTreeMap<String, String>,
    features: Vec<JoinedFeature>,
    diagnostics: MatchDiagnostics,
}

impl JoinedDataset {
    /// Joins boundaries with turnout rows and the raw classification
    /// object.
    ///
    /// Each feature's `ADMIN` property is rewritten to its normalized
    /// display name before joining.
    #[must_use]
    pub fn join(
        aliases: AliasTable,
        mut boundaries: BoundarySet,
        turnout_rows: &[Row],
        classification: &Map<String, Value>,
    ) -> Self {
        let turnout_rows = build_turnout_rows(&aliases, turnout_rows);
        let turnout = build_turnout_table(&turnout_rows);
        let classification = build_classification_table(classification);

        log::info!(
            "Turnout table: {} rows for {} countries, classification table: {} countries",
            turnout_rows.len(),
            turnout.len(),
            classification.len()
        );

        boundaries.normalize_names();

        let mut dataset = Self {
            aliases,
            turnout,
            turnout_rows,
            classification,
            features: Vec::with_capacity(boundaries.len()),
            diagnostics: MatchDiagnostics::default(),
        };

        let features = boundaries
            .into_collection()
            .features
            .into_iter()
            .map(|feature| dataset.join_feature(feature))
            .collect::<Vec<_>>();

        dataset.diagnostics = MatchDiagnostics {
            turnout_matched: features.iter().filter(|f| f.turnout_matched).count(),
            party_matched: features.iter().filter(|f| f.party_matched).count(),
            total: features.len(),
        };
        dataset.features = features;

        log::info!("{}", dataset.diagnostics);

        dataset
    }

    fn join_feature(&self, feature: Feature) -> JoinedFeature {
        let raw_name = turnout_map_geography::admin_name(&feature);
        let canonical_name = self.resolve_canonical_name(&raw_name);

        let turnout_matched = self.turnout.contains_key(&canonical_name);
        let found = self.find_classification(&canonical_name, &raw_name);

        if !turnout_matched {
            log::debug!("No turnout row for {canonical_name}");
        }
        if found.is_none() {
            log::debug!("No classification for {canonical_name}");
        }

        JoinedFeature {
            turnout: self.lookup_turnout(&canonical_name),
            classification: found.unwrap_or(UNKNOWN_CLASSIFICATION).to_string(),
            party_matched: found.is_some(),
            turnout_matched,
            canonical_name,
            raw_name,
            feature,
        }
    }

    /// Reduces any source spelling to the canonical join key.
    #[must_use]
    pub fn resolve_canonical_name(&self, raw: &str) -> String {
        self.aliases.canonicalize(raw)
    }

    /// Turnout for a canonical name; both fields are `None` when the
    /// country is not in the turnout table.
    #[must_use]
    pub fn lookup_turnout(&self, canonical: &str) -> TurnoutRecord {
        self.turnout
            .get(canonical)
            .copied()
            .unwrap_or(TurnoutRecord::EMPTY)
    }

    /// Classification for a country, tried by canonical name and then by
    /// the normalized raw name. Defaults to `"unknown"`.
    #[must_use]
    pub fn lookup_classification<'a>(&'a self, canonical: &str, raw: &str) -> &'a str {
        self.find_classification(canonical, raw)
            .unwrap_or(UNKNOWN_CLASSIFICATION)
    }

    fn find_classification(&self, canonical: &str, raw: &str) -> Option<&str> {
        self.classification
            .get(canonical)
            .or_else(|| self.classification.get(&normalize_name(raw)))
            .map(String::as_str)
    }

    #[must_use]
    pub const fn match_diagnostics(&self) -> MatchDiagnostics {
        self.diagnostics
    }

    #[must_use]
    pub fn features(&self) -> &[JoinedFeature] {
        &self.features
    }

    /// Turnout table entries in canonical-name order.
    pub fn turnout_entries(&self) -> impl Iterator<Item = (&str, &TurnoutRecord)> {
        self.turnout.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every usable turnout row in input order, including repeated
    /// countries that [`lookup_turnout`](Self::lookup_turnout) collapses.
    pub fn turnout_rows(&self) -> impl Iterator<Item = (&str, &TurnoutRecord)> {
        self.turnout_rows.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Features that matched neither or only one of the two tables.
    pub fn unmatched_features(&self) -> impl Iterator<Item = &JoinedFeature> {
        self.features
            .iter()
            .filter(|f| !f.turnout_matched || !f.party_matched)
    }

    #[must_use]
    pub const fn aliases(&self) -> &AliasTable {
        &self.aliases
    }
}
