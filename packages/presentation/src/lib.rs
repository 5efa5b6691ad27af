#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map and chart output for a [`JoinedDataset`].
//!
//! Color encodes the party system and fill opacity encodes turnout.
//! [`styled_collection`] bakes both, together with the popup snippet,
//! into the properties of every boundary feature so a static front end
//! can draw the map without further lookups. [`ChartData`] carries the
//! per-party-system turnout averages for the bar chart.

pub mod chart;
pub mod popup;
pub mod style;

use geojson::{Feature, FeatureCollection};
use serde_json::Value;
use turnout_map_join::{JoinedDataset, JoinedFeature};

pub use chart::{ChartData, chart_stats, party_order};
pub use popup::{Popup, turnout_label};
pub use style::{FeatureStyle, bucket_opacity, fill_opacity, party_color, stripe_weight};

/// Properties written onto every styled feature.
pub mod properties {
    pub const ADMIN: &str = "ADMIN";
    pub const CANONICAL_NAME: &str = "canonicalName";
    pub const PARTY_SYSTEM: &str = "partySystem";
    pub const TURNOUT_PCT: &str = "turnoutPct";
    pub const TURNOUT_YEAR: &str = "turnoutYear";
    pub const FILL_COLOR: &str = "fillColor";
    pub const FILL_OPACITY: &str = "fillOpacity";
    pub const STROKE_COLOR: &str = "strokeColor";
    pub const STROKE_WEIGHT: &str = "strokeWeight";
    pub const STRIPE_WEIGHT: &str = "stripeWeight";
    pub const STRIPE_OPACITY: &str = "stripeOpacity";
    pub const POPUP_HTML: &str = "popupHtml";
}

/// Returns one styled copy of every joined feature, in boundary order.
#[must_use]
pub fn styled_collection(dataset: &JoinedDataset) -> FeatureCollection {
    let features: Vec<Feature> = dataset.features().iter().map(styled_feature).collect();

    log::info!("Styled {} features", features.len());

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Copies a joined feature and writes its style and popup properties.
#[must_use]
pub fn styled_feature(joined: &JoinedFeature) -> Feature {
    let pct = joined.turnout.percentage;
    let style = FeatureStyle::new(&joined.classification, pct);
    let popup = Popup::new(&joined.canonical_name, &joined.classification, joined.turnout);

    let mut feature = joined.feature.clone();
    feature.set_property(properties::ADMIN, joined.raw_name.clone());
    feature.set_property(properties::CANONICAL_NAME, joined.canonical_name.clone());
    feature.set_property(properties::PARTY_SYSTEM, joined.classification.clone());
    feature.set_property(properties::TURNOUT_PCT, number_or_null(pct));
    feature.set_property(
        properties::TURNOUT_YEAR,
        joined.turnout.year.map_or(Value::Null, Value::from),
    );
    feature.set_property(properties::FILL_COLOR, style.fill_color);
    feature.set_property(properties::FILL_OPACITY, style.fill_opacity);
    feature.set_property(properties::STROKE_COLOR, style.color);
    feature.set_property(properties::STROKE_WEIGHT, style.weight);
    feature.set_property(properties::STRIPE_WEIGHT, stripe_weight(pct));
    feature.set_property(properties::STRIPE_OPACITY, bucket_opacity(pct));
    feature.set_property(properties::POPUP_HTML, popup.to_html());
    feature
}

fn number_or_null(value: Option<f64>) -> Value {
    value
        .and_then(serde_json::Number::from_f64)
        .map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use turnout_map_geography::BoundarySet;
    use turnout_map_names::AliasTable;

    fn dataset() -> JoinedDataset {
        let rows = turnout_map_tabular::parse_table(
            "country,VoterTurnout_ParliamentaryVotingTurnoutPct,\
             VoterTurnout_ParliamentaryTurnoutDataYear\n\
             France,67.8,2024\n",
        )
        .unwrap()
        .rows;
        let boundaries = BoundarySet::parse(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "properties": { "ADMIN": "France", "ISO_A3": "FRA" },
                        "geometry": null
                    },
                    { "type": "Feature", "properties": { "NAME": "Atlantis" }, "geometry": null }
                ]
            }"#,
        )
        .unwrap();
        let classification: Map<String, Value> = serde_json::json!({ "FRANCE": "multi-party" })
            .as_object()
            .cloned()
            .unwrap();
        JoinedDataset::join(AliasTable::default(), boundaries, &rows, &classification)
    }

    #[test]
    fn styles_matched_feature() {
        let collection = styled_collection(&dataset());
        assert_eq!(collection.features.len(), 2);

        let france = &collection.features[0];
        assert_eq!(france.property("ISO_A3"), Some(&Value::from("FRA")));
        assert_eq!(france.property(properties::ADMIN), Some(&Value::from("FRANCE")));
        assert_eq!(
            france.property(properties::PARTY_SYSTEM),
            Some(&Value::from("multi-party"))
        );
        assert_eq!(france.property(properties::TURNOUT_PCT), Some(&Value::from(67.8)));
        assert_eq!(france.property(properties::TURNOUT_YEAR), Some(&Value::from(2024)));
        assert_eq!(
            france.property(properties::FILL_COLOR),
            Some(&Value::from("#2ca02c"))
        );
        assert_eq!(france.property(properties::STRIPE_WEIGHT), Some(&Value::from(3)));
        assert_eq!(
            france.property(properties::STRIPE_OPACITY),
            Some(&Value::from(0.45))
        );
        assert_eq!(
            france.property(properties::POPUP_HTML),
            Some(&Value::from(
                "<b>FRANCE</b><br/>Party system: multi-party<br/>Turnout: 67.8%<br/>Year: 2024"
            ))
        );
    }

    #[test]
    fn unmatched_feature_gets_defaults() {
        let collection = styled_collection(&dataset());
        let atlantis = &collection.features[1];

        assert_eq!(atlantis.property(properties::TURNOUT_PCT), Some(&Value::Null));
        assert_eq!(atlantis.property(properties::TURNOUT_YEAR), Some(&Value::Null));
        assert_eq!(
            atlantis.property(properties::PARTY_SYSTEM),
            Some(&Value::from("unknown"))
        );
        assert_eq!(
            atlantis.property(properties::FILL_COLOR),
            Some(&Value::from("#cccccc"))
        );
        assert_eq!(
            atlantis.property(properties::FILL_OPACITY),
            Some(&Value::from(0.15))
        );
        assert_eq!(
            atlantis.property(properties::STRIPE_OPACITY),
            Some(&Value::from(0.15))
        );
        assert_eq!(
            atlantis.property(properties::STROKE_COLOR),
            Some(&Value::from("#222"))
        );
    }

    #[test]
    fn styled_collection_serializes() {
        let json = serde_json::to_value(styled_collection(&dataset())).unwrap();
        assert_eq!(json["type"], "FeatureCollection");
        assert_eq!(json["features"][0]["properties"]["canonicalName"], "FRANCE");
    }
}
