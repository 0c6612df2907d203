//! # CSV Loader
//!
//! Reads action datasets into [`RawAction`]s for the core to normalize.
//!
//! ## Supported Layouts
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Plain        name , price , profit                                     │
//! │               Share-MOEX , 29.55 , 29.15                                 │
//! │                                                                         │
//! │  French       Actions # , Coût par action (en euros) ,                  │
//! │               Bénéfice (après 2 ans)                                    │
//! │               Action-1 , 20 , 5%                                        │
//! │                                                                         │
//! │  In both, the profit column is a percentage rate over the horizon.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Headers are matched after trimming and ignoring case, in any column
//! order. Number cells may use a decimal comma, a trailing `%`, a `€` sign
//! and spaces as thousands separators.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use pactole_core::RawAction;
use tracing::debug;

use crate::error::LoadError;

/// Header names for one dataset layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub name: &'static str,
    pub cost: &'static str,
    pub profit_rate: &'static str,
}

pub const PLAIN_LAYOUT: Layout = Layout {
    name: "name",
    cost: "price",
    profit_rate: "profit",
};

pub const FRENCH_LAYOUT: Layout = Layout {
    name: "Actions #",
    cost: "Coût par action (en euros)",
    profit_rate: "Bénéfice (après 2 ans)",
};

const LAYOUTS: [Layout; 2] = [PLAIN_LAYOUT, FRENCH_LAYOUT];

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    name: usize,
    cost: usize,
    profit_rate: usize,
}

/// Loads every record of a CSV file.
pub fn load_path(path: &Path, delimiter: u8) -> Result<Vec<RawAction>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let actions = from_reader(file, delimiter)?;
    debug!(?path, records = actions.len(), "CSV loaded");
    Ok(actions)
}

/// Loads every record from any reader.
pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Vec<RawAction>, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();
    let columns = resolve_columns(&headers).ok_or(LoadError::UnknownLayout {
        found: headers.clone(),
    })?;

    let mut actions = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record?;
        // Line 1 is the header.
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);

        let name = record.get(columns.name).unwrap_or_default();
        let cost = number_cell(&record, columns.cost, "cost", line)?;
        let rate = number_cell(&record, columns.profit_rate, "profit rate", line)?;

        actions.push(RawAction::with_rate(name, cost, rate));
    }

    Ok(actions)
}

fn resolve_columns(headers: &[String]) -> Option<Columns> {
    let find = |wanted: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(wanted));

    LAYOUTS.iter().find_map(|layout| {
        Some(Columns {
            name: find(layout.name)?,
            cost: find(layout.cost)?,
            profit_rate: find(layout.profit_rate)?,
        })
    })
}

fn number_cell(
    record: &csv::StringRecord,
    index: usize,
    column: &'static str,
    line: u64,
) -> Result<f64, LoadError> {
    let cell = record.get(index).unwrap_or_default();
    parse_number(cell).ok_or_else(|| LoadError::InvalidNumber {
        line,
        column,
        value: cell.to_string(),
    })
}

/// Parses a locale-formatted number cell.
///
/// ```rust
/// use pactole_cli::loader::parse_number;
///
/// assert_eq!(parse_number("29,55"), Some(29.55));
/// assert_eq!(parse_number(" 5% "), Some(5.0));
/// assert_eq!(parse_number("1 250,00 €"), Some(1250.0));
/// assert_eq!(parse_number(""), None);
/// ```
pub fn parse_number(cell: &str) -> Option<f64> {
    let cleaned: String = cell
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '%' && *c != '€')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

// =============================================================================
// Unit Tests
// =============================================================================
