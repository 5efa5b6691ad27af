//! Party-system classification table construction.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde_json::{Map, Value};
use turnout_map_names::normalize_name;

/// Builds the name → classification table from the raw JSON object.
///
/// Keys are normalized but not aliased. Values are kept as given. Empty
/// strings and non-string values are treated as absent. If two keys
/// normalize to the same name, the first non-empty value is kept.
#[must_use]
pub fn build_classification_table(raw: &Map<String, Value>) -> BTreeMap<String, String> {
    let mut table = BTreeMap::new();

    for (key, value) in raw {
        let name = normalize_name(key);
        if name.is_empty() {
            log::debug!("Ignoring classification with blank name");
            continue;
        }

        let Some(classification) = value.as_str().filter(|s| !s.is_empty()) else {
            log::debug!("Ignoring classification for {name}: {value}");
            continue;
        };

        match table.entry(name) {
            Entry::Vacant(entry) => {
                entry.insert(classification.to_string());
            }
            Entry::Occupied(entry) => {
                log::debug!("Duplicate classification for {}", entry.key());
            }
        }
    }

    table
}
