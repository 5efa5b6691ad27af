//! Spelling-insensitive name keys.

/// Normalizes a raw country name into its comparison form.
///
/// Surrounding whitespace is trimmed and the result is upper-cased using
/// Unicode case mapping, so `"côte d'ivoire"` becomes `"CÔTE D'IVOIRE"`.
/// No other transformation is applied.
#[must_use]
pub fn normalize_name(raw: &str) -> String {
    raw.trim().to_uppercase()
}
