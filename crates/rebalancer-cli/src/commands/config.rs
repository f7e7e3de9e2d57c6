//! Config command implementation.
//!
//! Shows, validates and creates the `rebalancer.toml` settings file.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};

use rebalancer_config::{RebalancerConfig, Validate, DEFAULT_CONFIG_FILE};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::commands::ensure_writable;
use crate::error::CliError;
use crate::output::{
    print_header, print_info, print_json, print_output, print_success, print_warning, KeyValue,
};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (default)
    Show,

    /// Check the configuration and report every problem
    Validate,

    /// Write a configuration file with default settings
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
///
/// Loads the configuration itself so that `validate` can report problems
/// instead of failing on the first one.
pub fn execute(args: ConfigArgs, global: &GlobalArgs) -> Result<()> {
    match args.command.unwrap_or(ConfigCommand::Show) {
        ConfigCommand::Show => execute_show(global),
        ConfigCommand::Validate => execute_validate(global),
        ConfigCommand::Init(init) => execute_init(init, global.quiet),
    }
}

fn execute_show(global: &GlobalArgs) -> Result<()> {
    let (config, source) = RebalancerConfig::load(global.config.as_deref())?;
    let format = global
        .format
        .unwrap_or_else(|| config.output.format.into());

    match format {
        OutputFormat::Json => print_json(&config),
        OutputFormat::Csv => print_output(&settings_rows(&config), format),
        OutputFormat::Table => {
            print_header("Current Configuration");
            print_output(&settings_rows(&config), format)?;
            if !global.quiet {
                print_source(source.as_deref());
            }
            Ok(())
        }
    }
}

fn execute_validate(global: &GlobalArgs) -> Result<()> {
    let (config, source) = RebalancerConfig::load(global.config.as_deref())?;
    let errors = config.validate();

    if !errors.is_empty() {
        for error in &errors {
            print_warning(&error.to_string());
        }
        return Err(CliError::InvalidConfig(errors.len()).into());
    }

    if !global.quiet {
        match source {
            Some(path) => print_success(&format!("{} is valid", path.display())),
            None => print_success("Default configuration is valid"),
        }
    }
    Ok(())
}

fn execute_init(args: InitArgs, quiet: bool) -> Result<()> {
    ensure_writable(&args.output, args.force)?;

    let config = RebalancerConfig::default();
    if args.force {
        std::fs::write(&args.output, config.to_toml()?)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
    } else {
        config.write_new(&args.output)?;
    }

    if !quiet {
        print_success(&format!("Wrote {}", args.output.display()));
    }
    Ok(())
}

fn print_source(source: Option<&Path>) {
    match source {
        Some(path) => print_info(&format!("Loaded from {}", path.display())),
        None => print_info(&format!(
            "No {DEFAULT_CONFIG_FILE} found; showing defaults"
        )),
    }
}

/// Flattens the configuration into `section.key` rows.
fn settings_rows(config: &RebalancerConfig) -> Vec<KeyValue> {
    let sheet = &config.sheet;
    let plan = &config.plan;
    let output = &config.output;

    vec![
        KeyValue::new("sheet.skip_columns", sheet.skip_columns.to_string()),
        KeyValue::new("sheet.header_rows", sheet.header_rows.to_string()),
        KeyValue::new("sheet.label_row", sheet.label_row.to_string()),
        KeyValue::new("sheet.label_column", sheet.label_column.to_string()),
        KeyValue::new("sheet.default_label", sheet.default_label.clone()),
        KeyValue::new("plan.class_order", plan.class_order.join(", ")),
        KeyValue::new("plan.warn_tolerance_pct", plan.warn_tolerance_pct.to_string()),
        KeyValue::new(
            "plan.warn_under_allocation",
            plan.warn_under_allocation.to_string(),
        ),
        KeyValue::new("output.format", output.format.to_string()),
        KeyValue::new("output.currency_symbol", output.currency_symbol.clone()),
    ]
}
