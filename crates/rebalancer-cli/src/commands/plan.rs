//! Plan command implementation.
//!
//! Loads a holdings sheet and an optional allocation request, resolves
//! targets and prints both plan tiers with buy/sell summaries.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tabled::Tabled;
use tracing::{debug, warn};

use rebalancer_ext_file::{
    export_plan, load_holdings, load_request, write_asset_class_csv, write_security_csv,
};
use rebalancer_portfolio::{
    aggregate, build_plan, resolve, AllocationRequest, AssetClassRow, RebalancePlan, SecurityRow,
    TradeList,
};

use crate::cli::OutputFormat;
use crate::commands::{Context, SheetArgs};
use crate::error::CliError;
use crate::output::{
    format_money, format_pct, print_header, print_info, print_json, print_success, print_table,
    print_warning, KeyValue,
};

/// Arguments for the plan command.
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Allocation request (.json or .toml); every entity is unlocked when omitted
    #[arg(short, long)]
    pub targets: Option<PathBuf>,

    /// Also write asset_classes.csv, securities.csv, plan.json and rebalancing_plan.xlsx here
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Fail if the request names asset classes or securities absent from the holdings
    #[arg(long)]
    pub strict: bool,
}

#[derive(Tabled)]
struct ClassLine {
    #[tabled(rename = "Asset Class")]
    asset_class: String,
    #[tabled(rename = "Current $")]
    current: String,
    #[tabled(rename = "Current %")]
    current_pct: String,
    #[tabled(rename = "Target $")]
    target: String,
    #[tabled(rename = "Target %")]
    target_pct: String,
    #[tabled(rename = "Buy/Sell $")]
    buy_sell: String,
    #[tabled(rename = "Basis")]
    basis: &'static str,
}

impl ClassLine {
    fn new(row: &AssetClassRow, symbol: &str) -> Self {
        Self {
            asset_class: row.asset_class.to_string(),
            current: format_money(row.current_value, symbol),
            current_pct: format_pct(row.current_pct),
            target: format_money(row.target_value, symbol),
            target_pct: format_pct(row.target_pct),
            buy_sell: format_money(row.buy_sell, symbol),
            basis: row.basis.label(),
        }
    }
}

#[derive(Tabled)]
struct SecurityLine {
    #[tabled(rename = "Security Name")]
    security_name: String,
    #[tabled(rename = "Market Value")]
    market_value: String,
    #[tabled(rename = "Current % of Class")]
    current_pct: String,
    #[tabled(rename = "Target $")]
    target: String,
    #[tabled(rename = "Target % of Class")]
    target_pct: String,
    #[tabled(rename = "Buy/Sell $")]
    buy_sell: String,
    #[tabled(rename = "Basis")]
    basis: &'static str,
}

impl SecurityLine {
    fn new(row: &SecurityRow, symbol: &str) -> Self {
        Self {
            security_name: row.security_name.clone(),
            market_value: format_money(row.market_value, symbol),
            current_pct: format_pct(row.current_pct_of_class),
            target: format_money(row.target_value, symbol),
            target_pct: format_pct(row.target_pct_of_class),
            buy_sell: format_money(row.buy_sell, symbol),
            basis: row.basis.label(),
        }
    }
}

#[derive(Tabled)]
struct TradeLine {
    #[tabled(rename = "Action")]
    action: &'static str,
    #[tabled(rename = "What")]
    label: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn trade_lines(trades: &TradeList, symbol: &str) -> Vec<TradeLine> {
    let buys = trades.buys.iter().map(|t| TradeLine {
        action: "Buy",
        label: t.label.clone(),
        amount: format_money(t.amount, symbol),
    });
    let sells = trades.sells.iter().map(|t| TradeLine {
        action: "Sell",
        label: t.label.clone(),
        amount: format_money(t.amount, symbol),
    });
    buys.chain(sells).collect()
}

/// Execute the plan command.
pub fn execute(args: PlanArgs, ctx: &Context) -> Result<()> {
    debug!(config = ?ctx.config_path, "planning");

    let snapshot = load_holdings(args.sheet.path()?, &ctx.config.sheet)?;
    let request = match &args.targets {
        Some(path) => load_request(path)?,
        None => {
            if !ctx.quiet && ctx.format == OutputFormat::Table {
                print_info("No targets given; every asset class and security is unlocked");
            }
            AllocationRequest::new()
        }
    };

    let summary = aggregate(&snapshot.holdings, &ctx.config.plan);

    let unknown = request.unknown_entities(&summary);
    if !unknown.is_empty() {
        if args.strict {
            let entries = unknown.iter().map(ToString::to_string).collect();
            return Err(CliError::UnknownEntities(entries).into());
        }
        for entry in &unknown {
            warn!(%entry, "ignoring allocation request entry");
        }
    }

    let resolved = resolve(&summary, &request);
    let plan = build_plan(snapshot.client_label.clone(), &summary, &resolved, &ctx.config.plan);

    match ctx.format {
        OutputFormat::Table => print_plan_tables(&plan, ctx)?,
        OutputFormat::Json => print_json(&plan)?,
        OutputFormat::Csv => {
            write_asset_class_csv(io::stdout(), &plan.asset_classes)?;
            println!();
            write_security_csv(io::stdout(), &plan.securities)?;
        }
    }

    if ctx.format == OutputFormat::Table {
        for warning in &plan.warnings {
            print_warning(&warning.to_string());
        }
    }

    if let Some(dir) = &args.export {
        let paths = export_plan(&plan, dir)?;
        if !ctx.quiet && ctx.format == OutputFormat::Table {
            print_success(&format!(
                "Exported {}, {}, {} and {}",
                paths.asset_classes.display(),
                paths.securities.display(),
                paths.plan.display(),
                paths.workbook.display()
            ));
        }
    }

    Ok(())
}

fn print_plan_tables(plan: &RebalancePlan, ctx: &Context) -> Result<()> {
    let symbol = ctx.currency();

    print_header(&format!("Rebalancing Plan: {}", plan.client_label));
    print_table(&[
        KeyValue::new("Total Portfolio Value", format_money(plan.total_value, symbol)),
        KeyValue::new("Total Target Value", format_money(plan.total_target_value, symbol)),
        KeyValue::new("Total Target %", format_pct(plan.total_target_pct)),
        KeyValue::new("Net Buy/Sell", format_money(plan.net_buy_sell(), symbol)),
    ])?;

    print_header("Asset Class Plan");
    let classes: Vec<ClassLine> = plan
        .asset_classes
        .iter()
        .map(|row| ClassLine::new(row, symbol))
        .collect();
    print_table(&classes)?;

    for class in &plan.asset_classes {
        print_header(&format!("{} Securities", class.asset_class));
        let securities: Vec<SecurityLine> = plan
            .securities_in(&class.asset_class)
            .map(|row| SecurityLine::new(row, symbol))
            .collect();
        print_table(&securities)?;
    }

    print_header("Asset Class Trades");
    print_trades(&plan.class_trades(), symbol)?;

    print_header("Security Trades");
    print_trades(&plan.security_trades(), symbol)?;

    Ok(())
}

fn print_trades(trades: &TradeList, symbol: &str) -> Result<()> {
    if trades.is_empty() {
        println!("No trades needed.");
        return Ok(());
    }
    print_table(&trade_lines(trades, symbol))?;
    if trades.unchanged > 0 {
        println!("{} with no action needed.", trades.unchanged);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trade_lines_order() {
        let trades = TradeList::from_deltas([
            ("Bonds", dec!(-20000)),
            ("Canadian Equity", dec!(20000)),
        ]);
        let lines = trade_lines(&trades, "$");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].action, "Buy");
        assert_eq!(lines[0].label, "Canadian Equity");
        assert_eq!(lines[1].action, "Sell");
        assert_eq!(lines[1].amount, "$20,000.00");
    }
}
