//! Turnout statistics by party system for the bar chart.

use std::collections::BTreeMap;

use serde::Serialize;
use turnout_map_country_models::{ChartStat, PartySystem};
use turnout_map_join::JoinedDataset;

/// Axis position for classifications outside the vocabulary.
pub const OTHER_ORDER: usize = 999;

/// Series label for the chart's only dataset.
pub const SERIES_LABEL: &str = "Average voter turnout (%)";

/// Position of a lower-cased classification on the chart's axis.
#[must_use]
pub fn party_order(party_type: &str) -> usize {
    party_type
        .parse::<PartySystem>()
        .map_or(OTHER_ORDER, PartySystem::chart_order)
}

/// Groups every turnout row with a finite figure by its lower-cased
/// classification. A country listed on several rows counts once per row.
///
/// Groups are ordered two-party, multi-party, dominant-party, one-party,
/// non-partisan, unknown, then any other classification by name.
#[must_use]
pub fn chart_stats(dataset: &JoinedDataset) -> Vec<ChartStat> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();

    for (name, record) in dataset.turnout_rows() {
        let Some(pct) = record.percentage.filter(|p| p.is_finite()) else {
            continue;
        };
        let party_type = dataset.lookup_classification(name, name).to_lowercase();
        groups.entry(party_type).or_default().push(pct);
    }

    let mut stats: Vec<ChartStat> = groups
        .into_iter()
        .filter_map(|(party_type, values)| summarize(party_type, &values))
        .collect();

    stats.sort_by(|a, b| {
        party_order(&a.party_type)
            .cmp(&party_order(&b.party_type))
            .then_with(|| a.party_type.cmp(&b.party_type))
    });

    log::debug!("Chart groups: {}", stats.len());

    stats
}

#[allow(clippy::cast_precision_loss)]
fn summarize(party_type: String, values: &[f64]) -> Option<ChartStat> {
    let n = values.len();
    if n == 0 {
        return None;
    }

    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(ChartStat {
        party_type,
        n,
        avg: sum / n as f64,
        min,
        max,
    })
}

/// Bar chart input: one label and one rounded average per group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub series_label: &'static str,
    pub labels: Vec<String>,
    pub averages: Vec<f64>,
    pub stats: Vec<ChartStat>,
}

impl ChartData {
    #[must_use]
    pub fn from_stats(stats: Vec<ChartStat>) -> Self {
        Self {
            series_label: SERIES_LABEL,
            labels: stats.iter().map(|s| s.party_type.clone()).collect(),
            averages: stats.iter().map(|s| round2(s.avg)).collect(),
            stats,
        }
    }

    #[must_use]
    pub fn from_dataset(dataset: &JoinedDataset) -> Self {
        Self::from_stats(chart_stats(dataset))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
