//! Fill color, opacity and stripe encodings.

use serde::Serialize;
use turnout_map_country_models::PartySystem;

/// Stroke color shared by every country outline.
pub const STROKE_COLOR: &str = "#222";

/// Stroke width shared by every country outline.
pub const STROKE_WEIGHT: f64 = 1.0;

/// Fill opacity for countries without a turnout figure.
pub const MIN_FILL_OPACITY: f64 = 0.15;

/// Fill opacity at 100% turnout.
pub const MAX_FILL_OPACITY: f64 = 0.80;

/// Fill color for a party system.
#[must_use]
pub const fn party_system_color(party_system: PartySystem) -> &'static str {
    match party_system {
        PartySystem::MultiParty => "#2ca02c",
        PartySystem::TwoParty => "#1f77b4",
        PartySystem::DominantParty => "#ff7f0e",
        PartySystem::OneParty => "#d62728",
        PartySystem::NonPartisan => "#9467bd",
        PartySystem::Unknown => "#cccccc",
    }
}

/// Fill color for a raw classification string. Unrecognized values are
/// grey.
#[must_use]
pub fn party_color(classification: &str) -> &'static str {
    party_system_color(PartySystem::from_classification(classification))
}

fn known(pct: Option<f64>) -> Option<f64> {
    pct.filter(|p| !p.is_nan())
}

/// Maps turnout linearly onto `[0.15, 0.80]`, clamping the percentage to
/// `[0, 100]` first.
#[must_use]
pub fn fill_opacity(pct: Option<f64>) -> f64 {
    known(pct).map_or(MIN_FILL_OPACITY, |p| {
        let t = p.clamp(0.0, 100.0);
        (t / 100.0).mul_add(MAX_FILL_OPACITY - MIN_FILL_OPACITY, MIN_FILL_OPACITY)
    })
}

/// Stripe width for the turnout overlay: 1 below 40%, 2 below 60%, 3
/// below 80%, otherwise 4.
#[must_use]
pub fn stripe_weight(pct: Option<f64>) -> u8 {
    match known(pct) {
        None => 1,
        Some(p) if p < 40.0 => 1,
        Some(p) if p < 60.0 => 2,
        Some(p) if p < 80.0 => 3,
        Some(_) => 4,
    }
}

/// Bucketed overlay opacity, using the same thresholds as
/// [`stripe_weight`].
#[must_use]
pub fn bucket_opacity(pct: Option<f64>) -> f64 {
    match known(pct) {
        None => MIN_FILL_OPACITY,
        Some(p) if p < 40.0 => 0.25,
        Some(p) if p < 60.0 => 0.35,
        Some(p) if p < 80.0 => 0.45,
        Some(_) => 0.6,
    }
}

/// Drawing style for one country polygon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureStyle {
    pub color: &'static str,
    pub weight: f64,
    pub fill_opacity: f64,
    pub fill_color: &'static str,
}

impl FeatureStyle {
    /// Style for a country: fill color by classification, fill opacity by
    /// turnout.
    #[must_use]
    pub fn new(classification: &str, pct: Option<f64>) -> Self {
        Self {
            color: STROKE_COLOR,
            weight: STROKE_WEIGHT,
            fill_opacity: fill_opacity(pct),
            fill_color: party_color(classification),
        }
    }
}
