//! Holdings sheet import.
//!
//! The sheet is read positionally: after `skip_columns` leading columns, the
//! next four columns are Asset Class, Security Name, Quantity and Market Value,
//! whatever their header text says. Asset class cells are forward-filled, and
//! rows without a quantity (subtotals, section headers) are discarded.
//!
//! CSV files and spreadsheet workbooks go through the same row parser.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::SystemTime;

use rebalancer_core::math::saturating_sum;
use rebalancer_core::{AssetClass, Holding};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{FileError, FileResult};
use crate::workbook::read_workbook_rows;

/// Number of positional data columns.
pub const DATA_COLUMNS: usize = 4;

/// Column names used in diagnostics.
pub const COLUMN_NAMES: [&str; DATA_COLUMNS] =
    ["Asset Class", "Security Name", "Quantity", "Market Value"];

// =============================================================================
// SHEET LAYOUT
// =============================================================================

/// Positions of the label cell and data region in a holdings sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetLayout {
    /// Leading columns to discard.
    pub skip_columns: usize,

    /// Rows before the data region.
    pub header_rows: usize,

    /// Zero-based row of the client label cell.
    pub label_row: usize,

    /// Zero-based column of the client label cell.
    pub label_column: usize,

    /// Label used when the label cell is absent or blank.
    pub default_label: String,
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            skip_columns: 1,
            header_rows: 1,
            label_row: 2,
            label_column: 0,
            default_label: "Client".to_string(),
        }
    }
}

impl SheetLayout {
    /// Sets the number of leading columns to discard.
    #[must_use]
    pub fn with_skip_columns(mut self, skip_columns: usize) -> Self {
        self.skip_columns = skip_columns;
        self
    }

    /// Sets the number of header rows.
    #[must_use]
    pub fn with_header_rows(mut self, header_rows: usize) -> Self {
        self.header_rows = header_rows;
        self
    }

    /// Sets the client label cell position.
    #[must_use]
    pub fn with_label_cell(mut self, row: usize, column: usize) -> Self {
        self.label_row = row;
        self.label_column = column;
        self
    }

    /// Minimum record width for the layout to be readable.
    #[must_use]
    pub fn required_width(&self) -> usize {
        self.skip_columns + DATA_COLUMNS
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Holdings and client label read from one sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingsSnapshot {
    /// Client label from the label cell.
    pub client_label: String,

    /// Parsed holdings in sheet order.
    pub holdings: Vec<Holding>,

    /// Data rows discarded during parsing.
    pub dropped_rows: usize,
}

impl HoldingsSnapshot {
    /// Sum of market values.
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        saturating_sum(self.holdings.iter().map(|h| h.market_value))
    }

    /// Number of holdings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Returns true if there are no holdings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

// =============================================================================
// SHEET FORMAT
// =============================================================================

/// Container format of a holdings sheet, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    /// Comma-separated text. Used for any extension not listed under `Workbook`.
    Csv,
    /// Spreadsheet workbook (`.xlsx`, `.xlsm`, `.xls`, `.ods`); the first worksheet is read.
    Workbook,
}

impl SheetFormat {
    /// Extensions read as workbooks.
    pub const WORKBOOK_EXTENSIONS: [&'static str; 4] = ["xlsx", "xlsm", "xls", "ods"];

    /// Picks the format from the file extension (case-insensitive).
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        let is_workbook = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                Self::WORKBOOK_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            });
        if is_workbook {
            Self::Workbook
        } else {
            Self::Csv
        }
    }

    fn is_sheet(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ext.eq_ignore_ascii_case("csv")
                    || Self::WORKBOOK_EXTENSIONS
                        .iter()
                        .any(|known| ext.eq_ignore_ascii_case(known))
            })
    }
}

/// Returns the most recently modified holdings sheet in `dir`.
///
/// Only `.csv` and workbook files directly inside `dir` are considered.
pub fn find_latest_sheet(dir: impl AsRef<Path>) -> FileResult<PathBuf> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| FileError::io(dir, e))?;

    let mut latest: Option<(SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| FileError::io(dir, e))?;
        let path = entry.path();
        if !path.is_file() || !SheetFormat::is_sheet(&path) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .map_err(|e| FileError::io(&path, e))?;
        if latest.as_ref().map_or(true, |(newest, _)| modified > *newest) {
            latest = Some((modified, path));
        }
    }

    let (_, path) = latest.ok_or_else(|| FileError::NoSheetFound {
        dir: dir.to_path_buf(),
    })?;
    debug!(path = %path.display(), "picked most recent holdings sheet");
    Ok(path)
}

// =============================================================================
// PARSING
// =============================================================================

/// Reads a holdings sheet from a CSV file or a spreadsheet workbook.
pub fn load_holdings(path: impl AsRef<Path>, layout: &SheetLayout) -> FileResult<HoldingsSnapshot> {
    let path = path.as_ref();
    let snapshot = match SheetFormat::from_path(path) {
        SheetFormat::Csv => {
            let file = File::open(path).map_err(|e| FileError::io(path, e))?;
            parse_holdings(file, layout)?
        }
        SheetFormat::Workbook => {
            let rows = read_workbook_rows(path)?;
            parse_rows(rows.into_iter().map(Ok), layout)?
        }
    };

    info!(
        path = %path.display(),
        holdings = snapshot.len(),
        dropped = snapshot.dropped_rows,
        "loaded holdings sheet"
    );
    Ok(snapshot)
}

/// Parses a holdings sheet from CSV text.
///
/// Cells that are not valid UTF-8 (e.g. a Windows-1252 export) are decoded
/// lossily rather than rejecting the sheet.
pub fn parse_holdings<R: Read>(reader: R, layout: &SheetLayout) -> FileResult<HoldingsSnapshot> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let rows = csv_reader.byte_records().map(|record| {
        record.map_err(FileError::from).map(|record| {
            record
                .iter()
                .map(|cell| String::from_utf8_lossy(cell).into_owned())
                .collect::<Vec<String>>()
        })
    });
    parse_rows(rows, layout)
}

/// Parses holdings from rows of cell text, already positioned as in the sheet.
///
/// # Errors
///
/// - [`FileError::MissingColumns`] if no row reaches the four data columns
/// - [`FileError::InvalidNumber`] for a non-numeric quantity or market value
/// - [`FileError::NoHoldings`] if every data row was discarded
pub fn parse_rows<I>(rows: I, layout: &SheetLayout) -> FileResult<HoldingsSnapshot>
where
    I: IntoIterator<Item = FileResult<Vec<String>>>,
{
    let mut client_label: Option<String> = None;
    let mut widest = 0usize;
    let mut current_class: Option<AssetClass> = None;
    let mut holdings = Vec::new();
    let mut dropped_rows = 0usize;

    for (index, record) in rows.into_iter().enumerate() {
        let record = record?;
        let row = index + 1;

        if index == layout.label_row {
            client_label = record
                .get(layout.label_column)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string);
        }

        widest = widest.max(record.len());
        if index < layout.header_rows {
            continue;
        }

        let cell = |offset: usize| {
            record
                .get(layout.skip_columns + offset)
                .map_or("", |s| s.trim())
        };

        // Forward-fill applies to every row, including the ones dropped below.
        let class_cell = cell(0);
        if !class_cell.is_empty() {
            current_class = AssetClass::new(class_cell).ok();
        }

        let quantity_cell = cell(2);
        if quantity_cell.is_empty() {
            debug!(row, "dropping row without quantity");
            dropped_rows += 1;
            continue;
        }

        let Some(asset_class) = current_class.clone() else {
            warn!(row, "dropping row before any asset class");
            dropped_rows += 1;
            continue;
        };

        let security_name = cell(1);
        if security_name.is_empty() {
            warn!(row, asset_class = %asset_class, "dropping row without security name");
            dropped_rows += 1;
            continue;
        }

        let quantity = parse_amount(quantity_cell)
            .ok_or_else(|| FileError::invalid_number(row, COLUMN_NAMES[2], quantity_cell))?;

        let value_cell = cell(3);
        let market_value = if value_cell.is_empty() {
            Decimal::ZERO
        } else {
            parse_amount(value_cell)
                .ok_or_else(|| FileError::invalid_number(row, COLUMN_NAMES[3], value_cell))?
        };

        holdings.push(Holding::new(asset_class, security_name, quantity, market_value));
    }

    if widest < layout.required_width() {
        return Err(FileError::MissingColumns {
            found: widest.saturating_sub(layout.skip_columns),
            required: DATA_COLUMNS,
        });
    }

    if holdings.is_empty() {
        return Err(FileError::NoHoldings);
    }

    Ok(HoldingsSnapshot {
        client_label: client_label.unwrap_or_else(|| layout.default_label.clone()),
        holdings,
        dropped_rows,
    })
}

/// Parses a spreadsheet-formatted number such as `$1,234.50` or `(250.00)`.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let mut text = raw.trim();
    let negative = text.len() > 1 && text.starts_with('(') && text.ends_with(')');
    if negative {
        text = &text[1..text.len() - 1];
    }

    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let value = Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()?;
    Some(if negative { -value } else { value })
}
