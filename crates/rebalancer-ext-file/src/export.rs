//! Plan export: one CSV per tier, both tiers as a workbook, and the full plan as JSON.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use rebalancer_portfolio::{AssetClassRow, RebalancePlan, SecurityRow};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::info;

use crate::error::{FileError, FileResult};
use crate::workbook::write_plan_workbook;

/// File name of the asset-class tier.
pub const ASSET_CLASS_FILE: &str = "asset_classes.csv";

/// File name of the security tier.
pub const SECURITY_FILE: &str = "securities.csv";

/// File name of the full plan.
pub const PLAN_FILE: &str = "plan.json";

/// File name of the two-sheet workbook.
pub const WORKBOOK_FILE: &str = "rebalancing_plan.xlsx";

/// Paths written by [`export_plan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// Asset-class CSV.
    pub asset_classes: PathBuf,
    /// Security CSV.
    pub securities: PathBuf,
    /// Plan JSON.
    pub plan: PathBuf,
    /// Workbook with one worksheet per tier.
    pub workbook: PathBuf,
}

#[derive(Serialize)]
struct AssetClassRecord {
    #[serde(rename = "Asset Class")]
    asset_class: String,
    #[serde(rename = "Current $")]
    current_value: String,
    #[serde(rename = "Current %")]
    current_pct: String,
    #[serde(rename = "Target $")]
    target_value: String,
    #[serde(rename = "Target %")]
    target_pct: String,
    #[serde(rename = "Buy/Sell $")]
    buy_sell: String,
}

impl From<&AssetClassRow> for AssetClassRecord {
    fn from(row: &AssetClassRow) -> Self {
        Self {
            asset_class: row.asset_class.to_string(),
            current_value: money(row.current_value),
            current_pct: pct(row.current_pct),
            target_value: money(row.target_value),
            target_pct: pct(row.target_pct),
            buy_sell: money(row.buy_sell),
        }
    }
}

#[derive(Serialize)]
struct SecurityRecord {
    #[serde(rename = "Asset Class")]
    asset_class: String,
    #[serde(rename = "Security Name")]
    security_name: String,
    #[serde(rename = "Market Value")]
    market_value: String,
    #[serde(rename = "Current % of Class")]
    current_pct_of_class: String,
    #[serde(rename = "Target $")]
    target_value: String,
    #[serde(rename = "Target % of Class")]
    target_pct_of_class: String,
    #[serde(rename = "Buy/Sell $")]
    buy_sell: String,
}

impl From<&SecurityRow> for SecurityRecord {
    fn from(row: &SecurityRow) -> Self {
        Self {
            asset_class: row.asset_class.to_string(),
            security_name: row.security_name.clone(),
            market_value: money(row.market_value),
            current_pct_of_class: pct(row.current_pct_of_class),
            target_value: money(row.target_value),
            target_pct_of_class: pct(row.target_pct_of_class),
            buy_sell: money(row.buy_sell),
        }
    }
}

fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

fn pct(value: f64) -> String {
    format!("{value:.2}")
}

/// Writes the asset-class tier as CSV.
pub fn write_asset_class_csv<W: Write>(writer: W, rows: &[AssetClassRow]) -> FileResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(AssetClassRecord::from(row))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the security tier as CSV.
pub fn write_security_csv<W: Write>(writer: W, rows: &[SecurityRow]) -> FileResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(SecurityRecord::from(row))?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

fn create(path: &Path) -> FileResult<File> {
    File::create(path).map_err(|e| FileError::io(path, e))
}

/// Writes the full plan as pretty-printed JSON.
pub fn write_plan_json(path: &Path, plan: &RebalancePlan) -> FileResult<()> {
    let file = create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, plan)
        .map_err(|e| FileError::Export(format!("{}: {e}", path.display())))?;
    writer.flush().map_err(|e| FileError::io(path, e))
}

/// Exports a plan into `dir`, creating it if needed.
pub fn export_plan(plan: &RebalancePlan, dir: impl AsRef<Path>) -> FileResult<ExportPaths> {
    let dir = dir.as_ref();
    if dir.exists() && !dir.is_dir() {
        return Err(FileError::Export(format!(
            "{} exists and is not a directory",
            dir.display()
        )));
    }
    fs::create_dir_all(dir).map_err(|e| FileError::io(dir, e))?;

    let paths = ExportPaths {
        asset_classes: dir.join(ASSET_CLASS_FILE),
        securities: dir.join(SECURITY_FILE),
        plan: dir.join(PLAN_FILE),
        workbook: dir.join(WORKBOOK_FILE),
    };

    write_asset_class_csv(create(&paths.asset_classes)?, &plan.asset_classes)?;
    write_security_csv(create(&paths.securities)?, &plan.securities)?;
    write_plan_json(&paths.plan, plan)?;
    write_plan_workbook(&paths.workbook, plan)?;

    info!(
        dir = %dir.display(),
        classes = plan.asset_classes.len(),
        securities = plan.securities.len(),
        "exported rebalancing plan"
    );
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_rounds_to_cents() {
        assert_eq!(money(dec!(1234.567)), "1234.57");
        assert_eq!(money(dec!(-20000)), "-20000.00");
        assert_eq!(money(dec!(0.005)), "0.01");
    }

    #[test]
    fn test_pct_format() {
        assert_eq!(pct(33.33333), "33.33");
        assert_eq!(pct(0.0), "0.00");
    }
}
