//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, HoldingsArgs, PlanArgs, TemplateArgs};

/// Rebalancer - Two-tier portfolio rebalancing calculator
#[derive(Parser)]
#[command(name = "rebalancer")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Configuration file [default: ./rebalancer.toml when present]
    #[arg(short, long, global = true, env = "REBALANCER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format [default: from configuration, else table]
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute a rebalancing plan from a holdings sheet and allocation targets
    Plan(PlanArgs),

    /// Show current holdings aggregated by asset class and security
    Holdings(HoldingsArgs),

    /// Write an allocation request template for a holdings sheet
    Template(TemplateArgs),

    /// Show, validate or create the configuration file
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl From<rebalancer_config::OutputFormat> for OutputFormat {
    fn from(format: rebalancer_config::OutputFormat) -> Self {
        match format {
            rebalancer_config::OutputFormat::Table => Self::Table,
            rebalancer_config::OutputFormat::Json => Self::Json,
            rebalancer_config::OutputFormat::Csv => Self::Csv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "rebalancer",
            "plan",
            "holdings.csv",
            "--targets",
            "targets.toml",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.global.format, Some(OutputFormat::Json));
        assert!(cli.global.verbose);
        match cli.command {
            Commands::Plan(args) => {
                assert_eq!(args.sheet.holdings, Some(PathBuf::from("holdings.csv")));
                assert_eq!(args.sheet.latest, None);
                assert_eq!(args.targets, Some(PathBuf::from("targets.toml")));
                assert!(!args.strict);
            }
            _ => panic!("expected plan command"),
        }
    }

    #[test]
    fn test_sheet_or_latest_required() {
        let cli = Cli::try_parse_from(["rebalancer", "holdings", "--latest", "downloads"]).unwrap();
        match cli.command {
            Commands::Holdings(args) => {
                assert_eq!(args.sheet.holdings, None);
                assert_eq!(args.sheet.latest, Some(PathBuf::from("downloads")));
            }
            _ => panic!("expected holdings command"),
        }

        assert!(Cli::try_parse_from(["rebalancer", "plan"]).is_err());
        assert!(
            Cli::try_parse_from(["rebalancer", "plan", "a.csv", "--latest", "downloads"]).is_err()
        );
    }
}
