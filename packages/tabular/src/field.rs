//! Header-spelling-tolerant field lookup.

use crate::Row;

/// Header spellings for the country name column.
pub const COUNTRY_FIELDS: &[&str] = &["country", "Country", "COUNTRY"];

/// Header spellings for the parliamentary turnout percentage column.
///
/// One published release carries a trailing space in the header.
pub const TURNOUT_PCT_FIELDS: &[&str] = &[
    "VoterTurnout_ParliamentaryVotingTurnoutPct",
    "VoterTurnout_ParliamentaryVotingTurnoutPct ",
    "turnout",
    "Turnout",
];

/// Header spellings for the turnout reporting year column.
pub const YEAR_FIELDS: &[&str] = &["VoterTurnout_ParliamentaryTurnoutDataYear", "year", "Year"];

/// Returns the first value in `row` whose header matches a candidate.
///
/// Candidates are first tried as exact keys, in order. If none matches,
/// each candidate is compared against the row's headers (in header order)
/// ignoring case and surrounding whitespace. Returns `None` when nothing
/// matches.
#[must_use]
pub fn get_field<'a>(row: &'a Row, candidates: &[&str]) -> Option<&'a str> {
    if let Some(value) = candidates.iter().find_map(|c| row.value(c)) {
        return Some(value);
    }

    candidates.iter().find_map(|candidate| {
        let wanted = candidate.trim().to_lowercase();
        row.iter()
            .find(|(key, _)| key.trim().to_lowercase() == wanted)
            .map(|(_, value)| value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, &str)]) -> Row {
        cells.iter().copied().collect()
    }

    #[test]
    fn exact_match_in_candidate_order() {
        let r = row(&[("Country", "second"), ("country", "first")]);
        assert_eq!(get_field(&r, COUNTRY_FIELDS), Some("first"));
    }

    #[test]
    fn falls_back_to_case_insensitive_match() {
        let r = row(&[("  CoUnTrY ", "France")]);
        assert_eq!(get_field(&r, COUNTRY_FIELDS), Some("France"));
    }

    #[test]
    fn exact_match_beats_earlier_fuzzy_candidate() {
        let r = row(&[("TURNOUT", "fuzzy"), ("Turnout", "exact")]);
        assert_eq!(get_field(&r, TURNOUT_PCT_FIELDS), Some("exact"));
    }

    #[test]
    fn trailing_space_header_matches() {
        let r = row(&[("VoterTurnout_ParliamentaryVotingTurnoutPct ", "61.2")]);
        assert_eq!(get_field(&r, TURNOUT_PCT_FIELDS), Some("61.2"));
    }

    #[test]
    fn empty_value_is_still_a_match() {
        let r = row(&[("year", "")]);
        assert_eq!(get_field(&r, YEAR_FIELDS), Some(""));
    }

    #[test]
    fn missing_field_is_none() {
        let r = row(&[("population", "10")]);
        assert_eq!(get_field(&r, YEAR_FIELDS), None);
        assert_eq!(r.get(COUNTRY_FIELDS), None);
    }
}
