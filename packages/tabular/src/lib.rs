#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Lenient parsing of comma- or tab-delimited tables.
//!
//! Published turnout tables come in several shapes: comma or tab
//! delimited, with or without quoted cells, with header spellings that
//! drift between releases. [`parse_table`] turns any of them into a list
//! of [`Row`]s, and [`get_field`] looks a value up by a list of candidate
//! header spellings.
//!
//! Parsing is deliberately simple: there is no quote-aware splitting, so
//! a delimiter inside a quoted cell splits the cell. Lines that are blank
//! after trimming are dropped wherever they appear.

pub mod field;
pub mod row;

pub use field::{COUNTRY_FIELDS, TURNOUT_PCT_FIELDS, YEAR_FIELDS, get_field};
pub use row::Row;

/// Errors that can occur while parsing a table.
#[derive(Debug, thiserror::Error)]
pub enum TabularError {
    /// The underlying CSV reader failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Field delimiter detected from the header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    /// Tab if `header_line` contains a tab, otherwise comma.
    #[must_use]
    pub fn detect(header_line: &str) -> Self {
        if header_line.contains('\t') {
            Self::Tab
        } else {
            Self::Comma
        }
    }

    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Comma => b',',
            Self::Tab => b'\t',
        }
    }
}

/// A parsed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Header names in file order, trimmed and unquoted. May repeat.
    pub headers: Vec<String>,
    /// One row per non-blank data line.
    pub rows: Vec<Row>,
    /// The delimiter used to split every line.
    pub delimiter: Delimiter,
}

impl Table {
    fn empty() -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            delimiter: Delimiter::Comma,
        }
    }
}

/// Parses delimited text into headers and rows.
///
/// The first non-blank line is the header. Each following non-blank line
/// becomes a [`Row`] with one entry per header: missing trailing cells are
/// the empty string and surplus cells are ignored. Every cell is trimmed
/// and then loses one layer of surrounding double quotes.
///
/// Input with no non-blank lines yields an empty table.
///
/// # Errors
///
/// * If the CSV reader fails on the input
pub fn parse_table(text: &str) -> Result<Table, TabularError> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let Some(header_line) = lines.first() else {
        log::warn!("Table input has no non-blank lines");
        return Ok(Table::empty());
    };

    let delimiter = Delimiter::detect(header_line);
    let joined = lines.join("\n");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_reader(joined.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(clean_cell).collect();

    log::debug!("Detected delimiter {delimiter:?}");
    log::debug!("Headers: {headers:?}");

    let mut rows = Vec::with_capacity(lines.len() - 1);

    for result in reader.records() {
        let record = result?;

        let mut row = Row::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).map_or_else(String::new, clean_cell);
            row.insert(header.clone(), value);
        }
        rows.push(row);
    }

    log::debug!("Parsed {} rows", rows.len());

    Ok(Table {
        headers,
        rows,
        delimiter,
    })
}

/// Trims `cell` and removes one pair of enclosing double quotes.
///
/// Quotes are only removed when the trimmed cell is at least two
/// characters long and both starts and ends with `"`. The unquoted
/// content is not trimmed again.
#[must_use]
pub fn strip_outer_quotes(cell: &str) -> &str {
    let t = cell.trim();
    if t.len() >= 2 && t.starts_with('"') && t.ends_with('"') {
        &t[1..t.len() - 1]
    } else {
        t
    }
}

fn clean_cell(cell: &str) -> String {
    strip_outer_quotes(cell).to_string()
}
