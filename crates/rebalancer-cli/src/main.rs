//! Rebalancer CLI - Two-tier portfolio rebalancing calculator.
//!
//! # Usage
//!
//! ```bash
//! # Inspect a holdings sheet
//! rebalancer holdings holdings.csv
//!
//! # Write an editable allocation request
//! rebalancer template holdings.csv -o targets.toml
//!
//! # Compute the plan and export it
//! rebalancer plan holdings.csv --targets targets.toml --export out/
//!
//! # Plan against the newest sheet in a downloads folder
//! rebalancer plan --latest ~/Downloads --targets targets.toml
//!
//! # Show the effective configuration
//! rebalancer config show
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    match cli.command {
        Commands::Plan(args) => commands::plan::execute(args, &Context::load(&cli.global)?)?,
        Commands::Holdings(args) => {
            commands::holdings::execute(args, &Context::load(&cli.global)?)?
        }
        Commands::Template(args) => {
            commands::template::execute(args, &Context::load(&cli.global)?)?
        }
        Commands::Config(args) => commands::config::execute(args, &cli.global)?,
    }

    Ok(())
}

/// Logs go to stderr so that JSON and CSV output stay clean.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug"
    } else {
        "warn,rebalancer=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
