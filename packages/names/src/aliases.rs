//! Country-name alias table.
//!
//! Maps upper-cased source spellings (as produced by
//! [`normalize_name`](crate::normalize_name)) to the canonical spelling used
//! as the join key. The table is a plain value so callers can extend it
//! from configuration and pass it wherever names are canonicalized.

use std::collections::{BTreeMap, BTreeSet};

use crate::normalize::normalize_name;

/// Built-in aliases, keyed by upper-cased source spelling.
///
/// No target here is also a key.
const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("UNITED STATES OF AMERICA", "UNITED STATES"),
    ("RUSSIAN FEDERATION", "RUSSIA"),
    ("IRAN (ISLAMIC REPUBLIC OF)", "IRAN"),
    ("VENEZUELA (BOLIVARIAN REPUBLIC OF)", "VENEZUELA"),
    ("SYRIAN ARAB REPUBLIC", "SYRIA"),
    ("BOLIVIA (PLURINATIONAL STATE OF)", "BOLIVIA"),
    ("TANZANIA, UNITED REPUBLIC OF", "TANZANIA"),
    ("VIET NAM", "VIETNAM"),
    ("LAO PEOPLE'S DEMOCRATIC REPUBLIC", "LAOS"),
    ("KOREA, DEMOCRATIC PEOPLE'S REPUBLIC OF", "NORTH KOREA"),
    ("KOREA, REPUBLIC OF", "SOUTH KOREA"),
    ("BRUNEI DARUSSALAM", "BRUNEI"),
    ("CZECHIA", "CZECH REPUBLIC"),
    ("CÔTE D’IVOIRE", "COTE D'IVOIRE"),
    ("CÔTE D'IVOIRE", "COTE D'IVOIRE"),
    ("BOSNIA AND HERZEGOVINA", "BOSNIA & HERZEGOVINA"),
];

/// Errors that can occur when building an alias table.
#[derive(Debug, thiserror::Error)]
pub enum AliasError {
    /// An alias key or target is blank after normalization.
    #[error("Alias entry has an empty name (key: {key:?}, target: {target:?})")]
    EmptyName {
        /// The key as given.
        key: String,
        /// The target as given.
        target: String,
    },

    /// Following aliases from this name leads back to a name already seen.
    #[error("Alias cycle detected starting at {0:?}")]
    Cycle(String),
}

/// Mapping from upper-cased source spelling to canonical spelling.
///
/// Every target is final: no target is itself a key, so
/// [`canonicalize`](Self::canonicalize) is idempotent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_ALIASES
                .iter()
                .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
                .collect(),
        }
    }
}

impl AliasTable {
    /// A table with no aliases; canonicalization reduces to
    /// [`normalize_name`].
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Builds a table from arbitrary `(source, canonical)` pairs.
    ///
    /// Both sides are normalized. Identity entries are dropped, and
    /// chained entries (`A → B`, `B → C`) are resolved to their final
    /// target. When a key repeats, the later pair wins.
    ///
    /// # Errors
    ///
    /// * If a key or target is blank after normalization
    /// * If the pairs contain a cycle
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = BTreeMap::new();
        insert_pairs(&mut raw, pairs)?;
        Ok(Self {
            entries: close(raw)?,
        })
    }

    /// Extends this table with `overrides`, which replace existing entries
    /// for the same key.
    ///
    /// # Errors
    ///
    /// * If an override key or target is blank after normalization
    /// * If the combined table contains a cycle
    pub fn with_overrides<I, K, V>(self, overrides: I) -> Result<Self, AliasError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut raw = self.entries;
        let before = raw.len();
        insert_pairs(&mut raw, overrides)?;
        log::debug!(
            "Alias table extended from {before} to {} entries",
            raw.len()
        );
        Ok(Self {
            entries: close(raw)?,
        })
    }

    /// Reduces a raw name to its canonical join key: normalize, then
    /// substitute the alias if one exists.
    #[must_use]
    pub fn canonicalize(&self, raw: &str) -> String {
        let normalized = normalize_name(raw);
        match self.entries.get(&normalized) {
            Some(canonical) => canonical.clone(),
            None => normalized,
        }
    }

    /// Returns the canonical target for an already-normalized key.
    #[must_use]
    pub fn get(&self, normalized: &str) -> Option<&str> {
        self.entries.get(normalized).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(source, canonical)` entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn insert_pairs<I, K, V>(raw: &mut BTreeMap<String, String>, pairs: I) -> Result<(), AliasError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    for (key, target) in pairs {
        let from = normalize_name(key.as_ref());
        let to = normalize_name(target.as_ref());
        if from.is_empty() || to.is_empty() {
            return Err(AliasError::EmptyName {
                key: key.as_ref().to_string(),
                target: target.as_ref().to_string(),
            });
        }
        if from == to {
            raw.remove(&from);
        } else {
            raw.insert(from, to);
        }
    }
    Ok(())
}

/// Resolves every entry to the end of its chain.
fn close(raw: BTreeMap<String, String>) -> Result<BTreeMap<String, String>, AliasError> {
    let mut closed = BTreeMap::new();

    for (key, first) in &raw {
        let mut seen = BTreeSet::from([key.as_str()]);
        let mut target = first.as_str();

        while let Some(next) = raw.get(target) {
            if !seen.insert(target) {
                return Err(AliasError::Cycle(key.clone()));
            }
            target = next.as_str();
        }

        closed.insert(key.clone(), target.to_string());
    }

    Ok(closed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_all_entries() {
        assert_eq!(AliasTable::default().len(), DEFAULT_ALIASES.len());
    }

    #[test]
    fn default_targets_are_final() {
        let table = AliasTable::default();
        for (_, target) in table.iter() {
            assert!(table.get(target).is_none(), "{target} is also a key");
        }
    }

    #[test]
    fn canonicalizes_known_alias() {
        let table = AliasTable::default();
        assert_eq!(table.canonicalize("Russian Federation"), "RUSSIA");
        assert_eq!(table.canonicalize("  viet nam"), "VIETNAM");
        assert_eq!(table.canonicalize("Côte d’Ivoire"), "COTE D'IVOIRE");
        assert_eq!(table.canonicalize("Côte d'Ivoire"), "COTE D'IVOIRE");
    }

    #[test]
    fn passes_through_unknown_names() {
        let table = AliasTable::default();
        assert_eq!(table.canonicalize("France"), "FRANCE");
        assert_eq!(table.canonicalize(""), "");
    }

    #[test]
    fn canonicalize_is_idempotent() {
        let table = AliasTable::default();
        for raw in [
            "United States of America",
            "Korea, Republic of",
            "Bosnia and Herzegovina",
            "Czechia",
            "Germany",
            "  laos ",
        ] {
            let once = table.canonicalize(raw);
            assert_eq!(table.canonicalize(&once), once);
        }
    }

    #[test]
    fn from_pairs_normalizes_both_sides() {
        let table = AliasTable::from_pairs([(" republic of moldova", "Moldova ")]).unwrap();
        assert_eq!(table.get("REPUBLIC OF MOLDOVA"), Some("MOLDOVA"));
        assert_eq!(table.canonicalize("Republic of Moldova"), "MOLDOVA");
    }

    #[test]
    fn from_pairs_resolves_chains() {
        let table = AliasTable::from_pairs([("A", "B"), ("B", "C"), ("C", "D")]).unwrap();
        assert_eq!(table.canonicalize("a"), "D");
        assert_eq!(table.canonicalize("b"), "D");
        assert_eq!(table.canonicalize("D"), "D");
    }

    #[test]
    fn from_pairs_rejects_cycles() {
        let err = AliasTable::from_pairs([("A", "B"), ("B", "C"), ("C", "A")]).unwrap_err();
        assert!(matches!(err, AliasError::Cycle(_)));
    }

    #[test]
    fn from_pairs_drops_identity_entries() {
        let table = AliasTable::from_pairs([("France", "FRANCE")]).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn from_pairs_rejects_blank_names() {
        let err = AliasTable::from_pairs([("  ", "X")]).unwrap_err();
        assert!(matches!(err, AliasError::EmptyName { .. }));
    }

    #[test]
    fn overrides_replace_defaults() {
        let table = AliasTable::default()
            .with_overrides([("Czechia", "Czechia")])
            .unwrap();
        assert_eq!(table.canonicalize("Czechia"), "CZECHIA");
        assert_eq!(table.len(), DEFAULT_ALIASES.len() - 1);
    }

    #[test]
    fn overrides_chain_into_defaults() {
        let table = AliasTable::default()
            .with_overrides([("USA", "United States of America")])
            .unwrap();
        assert_eq!(table.canonicalize("usa"), "UNITED STATES");
    }

    #[test]
    fn overrides_can_introduce_cycles() {
        let err = AliasTable::default()
            .with_overrides([("RUSSIA", "Russian Federation")])
            .unwrap_err();
        assert!(matches!(err, AliasError::Cycle(_)));
    }

    #[test]
    fn empty_table_only_normalizes() {
        let table = AliasTable::empty();
        assert_eq!(table.canonicalize("Viet Nam"), "VIET NAM");
    }
}
