//! Template command implementation.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Args;

use rebalancer_ext_file::{load_holdings, render_request, write_request, RequestFormat};
use rebalancer_portfolio::{aggregate, AllocationRequest};

use crate::cli::OutputFormat;
use crate::commands::{ensure_writable, Context, SheetArgs};
use crate::output::print_success;

/// Arguments for the template command.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    #[command(flatten)]
    pub sheet: SheetArgs,

    /// Write the template here (.json or .toml) instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

/// Execute the template command.
///
/// Every asset class and security in the sheet gets an unlocked entry at
/// its current weight.
pub fn execute(args: TemplateArgs, ctx: &Context) -> Result<()> {
    let snapshot = load_holdings(args.sheet.path()?, &ctx.config.sheet)?;
    let summary = aggregate(&snapshot.holdings, &ctx.config.plan);
    let request = AllocationRequest::template(&summary);

    match &args.output {
        Some(path) => {
            ensure_writable(path, args.force)?;
            write_request(path, &request)?;
            if !ctx.quiet {
                print_success(&format!(
                    "Wrote template for {} asset classes and {} securities to {}",
                    summary.asset_classes.len(),
                    summary.securities.len(),
                    path.display()
                ));
            }
        }
        None => {
            let format = match ctx.format {
                OutputFormat::Json => RequestFormat::Json,
                OutputFormat::Table | OutputFormat::Csv => RequestFormat::Toml,
            };
            let text = render_request(&request, format).map_err(|msg| anyhow!(msg))?;
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
    }

    Ok(())
}
