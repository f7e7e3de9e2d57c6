//! Holdings command implementation.
//!
//! Shows the parsed sheet rolled up by asset class and security.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use rebalancer_ext_file::load_holdings;
use rebalancer_portfolio::{aggregate, PortfolioSummary};

use crate::cli::OutputFormat;
use crate::commands::{Context, SheetArgs};
use crate::output::{format_money, format_pct, print_header, print_json, print_output, KeyValue};

/// Arguments for the holdings command.
#[derive(Args, Debug)]
pub struct HoldingsArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,
}

#[derive(Serialize, Tabled)]
struct ClassHoldingLine {
    #[serde(rename = "Asset Class")]
    #[tabled(rename = "Asset Class")]
    asset_class: String,
    #[serde(rename = "Current $")]
    #[tabled(rename = "Current $")]
    current: String,
    #[serde(rename = "Current %")]
    #[tabled(rename = "Current %")]
    weight: String,
    #[serde(rename = "Securities")]
    #[tabled(rename = "Securities")]
    securities: usize,
}

#[derive(Serialize, Tabled)]
struct SecurityHoldingLine {
    #[serde(rename = "Asset Class")]
    #[tabled(rename = "Asset Class")]
    asset_class: String,
    #[serde(rename = "Security Name")]
    #[tabled(rename = "Security Name")]
    security_name: String,
    #[serde(rename = "Market Value")]
    #[tabled(rename = "Market Value")]
    market_value: String,
    #[serde(rename = "Current % of Class")]
    #[tabled(rename = "Current % of Class")]
    weight: String,
}

#[derive(Serialize)]
struct HoldingsReport<'a> {
    client_label: &'a str,
    dropped_rows: usize,
    #[serde(flatten)]
    summary: &'a PortfolioSummary,
}

/// Execute the holdings command.
pub fn execute(args: HoldingsArgs, ctx: &Context) -> Result<()> {
    let snapshot = load_holdings(args.sheet.path()?, &ctx.config.sheet)?;
    let summary = aggregate(&snapshot.holdings, &ctx.config.plan);
    let symbol = ctx.currency();

    if ctx.format == OutputFormat::Json {
        return print_json(&HoldingsReport {
            client_label: &snapshot.client_label,
            dropped_rows: snapshot.dropped_rows,
            summary: &summary,
        });
    }

    let classes: Vec<ClassHoldingLine> = summary
        .asset_classes
        .iter()
        .map(|c| ClassHoldingLine {
            asset_class: c.asset_class.to_string(),
            current: format_money(c.current_value, symbol),
            weight: format_pct(c.current_weight_pct),
            securities: c.security_count,
        })
        .collect();

    let securities: Vec<SecurityHoldingLine> = summary
        .securities
        .iter()
        .map(|s| SecurityHoldingLine {
            asset_class: s.asset_class.to_string(),
            security_name: s.security_name.clone(),
            market_value: format_money(s.current_value, symbol),
            weight: format_pct(s.current_weight_within_class * 100.0),
        })
        .collect();

    if ctx.format == OutputFormat::Csv {
        // Securities carry the class column, so one table covers both tiers.
        return print_output(&securities, ctx.format);
    }

    print_header(&format!("Holdings: {}", snapshot.client_label));
    print_output(
        &[
            KeyValue::new("Total Portfolio Value", format_money(summary.total_value, symbol)),
            KeyValue::new("Holdings", snapshot.len().to_string()),
            KeyValue::new("Rows Dropped", snapshot.dropped_rows.to_string()),
        ],
        ctx.format,
    )?;

    print_header("Asset Classes");
    print_output(&classes, ctx.format)?;

    print_header("Securities");
    print_output(&securities, ctx.format)
}
