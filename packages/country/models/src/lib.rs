#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Country-level data types shared across the turnout-map workspace.
//!
//! The join key for every type here is a canonical country name (see
//! `turnout_map_names`). Party-system classifications are carried as raw
//! strings at the data layer; [`PartySystem`] is only a lenient view over
//! those strings for presentation decisions such as color and chart order.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Classification reported when a country has no party-system entry.
pub const UNKNOWN_CLASSIFICATION: &str = "unknown";

/// Turnout figures for a single country.
///
/// `None` means "not reported", which is distinct from a reported zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnoutRecord {
    /// Parliamentary turnout as a percentage of registered voters. Not
    /// clamped: out-of-domain source values are kept as reported.
    pub percentage: Option<f64>,
    /// Year the turnout figure was recorded.
    pub year: Option<i32>,
}

impl TurnoutRecord {
    /// A record with neither a percentage nor a year.
    pub const EMPTY: Self = Self {
        percentage: None,
        year: None,
    };
}

/// How many boundary features found a turnout and a party-system entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDiagnostics {
    /// Features whose canonical name appears in the turnout table.
    pub turnout_matched: usize,
    /// Features with a party-system classification.
    pub party_matched: usize,
    /// Total number of features.
    pub total: usize,
}

impl std::fmt::Display for MatchDiagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Turnout matched: {}/{}, Party matched: {}/{}",
            self.turnout_matched, self.total, self.party_matched, self.total
        )
    }
}

/// The fixed party-system vocabulary.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum PartySystem {
    /// Several parties routinely compete for and share power
    MultiParty,
    /// Two parties dominate elections
    TwoParty,
    /// Competitive elections, but one party reliably governs
    DominantParty,
    /// A single legal or effective party
    OneParty,
    /// Elections held without party affiliation
    NonPartisan,
    /// No classification, or one outside the vocabulary
    Unknown,
}

impl PartySystem {
    /// Interprets a raw classification string.
    ///
    /// Matching ignores surrounding whitespace and ASCII case. Anything
    /// outside the vocabulary is [`PartySystem::Unknown`].
    #[must_use]
    pub fn from_classification(raw: &str) -> Self {
        raw.trim().parse().unwrap_or(Self::Unknown)
    }

    /// Position of this party system on the chart's category axis.
    #[must_use]
    pub const fn chart_order(self) -> usize {
        match self {
            Self::TwoParty => 0,
            Self::MultiParty => 1,
            Self::DominantParty => 2,
            Self::OneParty => 3,
            Self::NonPartisan => 4,
            Self::Unknown => 5,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::MultiParty,
            Self::TwoParty,
            Self::DominantParty,
            Self::OneParty,
            Self::NonPartisan,
            Self::Unknown,
        ]
    }
}

/// Turnout statistics for one party-system group of the bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStat {
    /// Lower-cased classification string the group was formed from.
    #[serde(rename = "type")]
    pub party_type: String,
    /// Number of countries in the group.
    pub n: usize,
    /// Mean turnout percentage.
    pub avg: f64,
    /// Lowest turnout percentage.
    pub min: f64,
    /// Highest turnout percentage.
    pub max: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_vocabulary_leniently() {
        assert_eq!(
            PartySystem::from_classification("multi-party"),
            PartySystem::MultiParty
        );
        assert_eq!(
            PartySystem::from_classification("  Two-Party "),
            PartySystem::TwoParty
        );
        assert_eq!(
            PartySystem::from_classification("NON-PARTISAN"),
            PartySystem::NonPartisan
        );
    }

    #[test]
    fn unrecognized_classification_is_unknown() {
        assert_eq!(
            PartySystem::from_classification("military junta"),
            PartySystem::Unknown
        );
        assert_eq!(PartySystem::from_classification(""), PartySystem::Unknown);
    }

    #[test]
    fn display_matches_vocabulary() {
        assert_eq!(PartySystem::DominantParty.to_string(), "dominant-party");
        assert_eq!(PartySystem::Unknown.as_ref(), UNKNOWN_CLASSIFICATION);
    }

    #[test]
    fn chart_order_is_unique() {
        let mut orders: Vec<usize> = PartySystem::all()
            .iter()
            .map(|p| p.chart_order())
            .collect();
        orders.sort_unstable();
        orders.dedup();
        assert_eq!(orders.len(), PartySystem::all().len());
        assert_eq!(PartySystem::TwoParty.chart_order(), 0);
    }

    #[test]
    fn empty_turnout_record_has_no_values() {
        assert_eq!(TurnoutRecord::default(), TurnoutRecord::EMPTY);
        assert!(TurnoutRecord::EMPTY.percentage.is_none());
        assert!(TurnoutRecord::EMPTY.year.is_none());
    }

    #[test]
    fn diagnostics_display() {
        let d = MatchDiagnostics {
            turnout_matched: 150,
            party_matched: 170,
            total: 177,
        };
        assert_eq!(
            d.to_string(),
            "Turnout matched: 150/177, Party matched: 170/177"
        );
    }
}
