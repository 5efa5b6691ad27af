//! Turnout table construction.

use std::collections::BTreeMap;

use turnout_map_country_models::TurnoutRecord;
use turnout_map_names::AliasTable;
use turnout_map_tabular::{COUNTRY_FIELDS, Row, TURNOUT_PCT_FIELDS, YEAR_FIELDS};

/// Canonicalizes every usable turnout row, in input order.
///
/// Rows without a country, or whose country canonicalizes to the empty
/// string, are skipped. Several rows may share a canonical name.
#[must_use]
pub fn build_turnout_rows(aliases: &AliasTable, rows: &[Row]) -> Vec<(String, TurnoutRecord)> {
    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let Some(country) = row.get(COUNTRY_FIELDS).filter(|c| !c.is_empty()) else {
            log::trace!("Skipping turnout row {i}: no country");
            continue;
        };

        let canonical = aliases.canonicalize(country);
        if canonical.is_empty() {
            log::trace!("Skipping turnout row {i}: blank country");
            continue;
        }

        let percentage = row.get(TURNOUT_PCT_FIELDS).and_then(parse_number);
        let year = row
            .get(YEAR_FIELDS)
            .and_then(parse_number)
            .and_then(whole_year);

        if percentage.is_none() {
            log::debug!("No numeric turnout for {canonical}");
        }

        records.push((canonical, TurnoutRecord { percentage, year }));
    }

    records
}

/// Builds the canonical name → turnout record table from canonicalized
/// rows. A later row for the same country replaces the earlier one.
#[must_use]
pub fn build_turnout_table(rows: &[(String, TurnoutRecord)]) -> BTreeMap<String, TurnoutRecord> {
    let mut table = BTreeMap::new();

    for (name, record) in rows {
        if table.insert(name.clone(), *record).is_some() {
            log::debug!("Turnout row replaces an earlier row for {name}");
        }
    }

    table
}

/// Coerces a cell to a finite number. Blank, non-numeric and non-finite
/// cells are `None`.
///
/// A blank cell is not read as zero, so a missing figure stays "N/A"
/// rather than becoming a reported 0%.
#[must_use]
pub fn parse_number(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Keeps a year only when it is a whole number that fits in `i32`.
/// Fractional years are dropped instead of being kept as-is.
#[allow(clippy::cast_possible_truncation)]
fn whole_year(value: f64) -> Option<i32> {
    if value.fract() != 0.0 || value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    Some(value as i32)
}
