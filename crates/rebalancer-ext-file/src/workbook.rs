//! Spreadsheet workbooks.
//!
//! Holdings are read from the first worksheet of an `.xlsx`, `.xlsm`, `.xls`
//! or `.ods` file with the same positional layout as CSV sheets. Plans are
//! written as a two-sheet `.xlsx`.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use rebalancer_portfolio::RebalancePlan;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::error::{FileError, FileResult};

/// Worksheet holding the asset-class tier.
pub const ASSET_CLASS_SHEET: &str = "Asset Class";

/// Worksheet holding the security tier.
pub const SECURITY_SHEET: &str = "Securities";

const ASSET_CLASS_HEADERS: [&str; 6] = [
    "Asset Class",
    "Current $",
    "Current %",
    "Target $",
    "Target %",
    "Buy/Sell $",
];

const SECURITY_HEADERS: [&str; 7] = [
    "Asset Class",
    "Security Name",
    "Market Value",
    "Current % of Class",
    "Target $",
    "Target % of Class",
    "Buy/Sell $",
];

// =============================================================================
// IMPORT
// =============================================================================

/// Reads the first worksheet of a workbook as rows of cell text.
///
/// Rows and columns keep their sheet positions: cell `A3` is always row 2,
/// column 0, even when the used range starts further in.
pub fn read_workbook_rows(path: &Path) -> FileResult<Vec<Vec<String>>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| FileError::workbook(path, e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| FileError::workbook(path, "workbook has no worksheets"))?
        .map_err(|e| FileError::workbook(path, e.to_string()))?;

    Ok(grid(&range))
}

fn grid(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((first_row, first_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows = vec![Vec::new(); first_row as usize];
    for cells in range.rows() {
        let mut row = vec![String::new(); first_col as usize];
        row.extend(cells.iter().map(cell_text));
        rows.push(row);
    }
    rows
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(text) => text.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// EXPORT
// =============================================================================

/// Writes a plan as an `.xlsx` with one worksheet per tier.
///
/// Money is rounded to cents half away from zero; percentages to two places.
pub fn write_plan_workbook(path: &Path, plan: &RebalancePlan) -> FileResult<()> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let money = Format::new().set_num_format("#,##0.00");
    let pct = Format::new().set_num_format("0.00");

    let sheet = workbook.add_worksheet();
    sheet.set_name(ASSET_CLASS_SHEET)?;
    write_headers(sheet, &ASSET_CLASS_HEADERS, &header)?;
    for (row, line) in (1u32..).zip(&plan.asset_classes) {
        sheet.write_string(row, 0, line.asset_class.as_str())?;
        sheet.write_number_with_format(row, 1, cents(line.current_value), &money)?;
        sheet.write_number_with_format(row, 2, hundredths(line.current_pct), &pct)?;
        sheet.write_number_with_format(row, 3, cents(line.target_value), &money)?;
        sheet.write_number_with_format(row, 4, hundredths(line.target_pct), &pct)?;
        sheet.write_number_with_format(row, 5, cents(line.buy_sell), &money)?;
    }
    sheet.autofit();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SECURITY_SHEET)?;
    write_headers(sheet, &SECURITY_HEADERS, &header)?;
    for (row, line) in (1u32..).zip(&plan.securities) {
        sheet.write_string(row, 0, line.asset_class.as_str())?;
        sheet.write_string(row, 1, &line.security_name)?;
        sheet.write_number_with_format(row, 2, cents(line.market_value), &money)?;
        sheet.write_number_with_format(row, 3, hundredths(line.current_pct_of_class), &pct)?;
        sheet.write_number_with_format(row, 4, cents(line.target_value), &money)?;
        sheet.write_number_with_format(row, 5, hundredths(line.target_pct_of_class), &pct)?;
        sheet.write_number_with_format(row, 6, cents(line.buy_sell), &money)?;
    }
    sheet.autofit();

    workbook.save(path)?;
    Ok(())
}

fn write_headers(sheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<(), XlsxError> {
    for (col, title) in (0u16..).zip(headers) {
        sheet.write_string_with_format(0, col, *title, format)?;
    }
    Ok(())
}

fn cents(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

fn hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
