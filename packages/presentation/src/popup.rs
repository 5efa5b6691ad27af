//! Per-country popup content.

use serde::Serialize;
use turnout_map_country_models::TurnoutRecord;

/// Label shown for a missing turnout figure or year.
pub const NOT_AVAILABLE: &str = "N/A";

/// Text shown when a country is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub name: String,
    pub party_system: String,
    pub turnout_label: String,
    pub year_label: String,
}

impl Popup {
    #[must_use]
    pub fn new(name: &str, party_system: &str, turnout: TurnoutRecord) -> Self {
        Self {
            name: name.to_string(),
            party_system: party_system.to_string(),
            turnout_label: turnout_label(turnout.percentage),
            year_label: turnout
                .year
                .map_or_else(|| NOT_AVAILABLE.to_string(), |y| y.to_string()),
        }
    }

    /// Renders the popup as an HTML snippet. Interpolated text is escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<b>{}</b><br/>Party system: {}<br/>Turnout: {}<br/>Year: {}",
            escape(&self.name),
            escape(&self.party_system),
            escape(&self.turnout_label),
            escape(&self.year_label),
        )
    }
}

/// Formats a turnout percentage with one decimal, or `"N/A"`.
#[must_use]
pub fn turnout_label(pct: Option<f64>) -> String {
    pct.map_or_else(|| NOT_AVAILABLE.to_string(), |p| format!("{p:.1}%"))
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
