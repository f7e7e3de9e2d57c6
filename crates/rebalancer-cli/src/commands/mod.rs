//! CLI command implementations.

pub mod config;
pub mod holdings;
pub mod plan;
pub mod template;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use holdings::HoldingsArgs;
pub use plan::PlanArgs;
pub use template::TemplateArgs;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::Args;
use rebalancer_config::{RebalancerConfig, Validate};
use rebalancer_ext_file::find_latest_sheet;
use tracing::info;

use crate::cli::{GlobalArgs, OutputFormat};
use crate::error::{CliError, CliResult};

/// Validated configuration and output settings for one invocation.
#[derive(Debug)]
pub struct Context {
    pub config: RebalancerConfig,
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Context {
    /// Loads and validates the configuration selected by the global flags.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let (config, config_path) = RebalancerConfig::load(global.config.as_deref())?;
        config.validate_or_error()?;

        let format = global
            .format
            .unwrap_or_else(|| config.output.format.into());

        Ok(Self {
            config,
            config_path,
            format,
            quiet: global.quiet,
        })
    }

    /// Currency symbol for table output.
    pub fn currency(&self) -> &str {
        &self.config.output.currency_symbol
    }
}

/// Holdings sheet selection shared by the commands that read one.
#[derive(Args, Debug)]
pub struct SheetArgs {
    /// Holdings sheet (CSV or Excel workbook)
    #[arg(required_unless_present = "latest")]
    pub holdings: Option<PathBuf>,

    /// Use the most recently modified sheet in this directory instead
    #[arg(long, value_name = "DIR", conflicts_with = "holdings")]
    pub latest: Option<PathBuf>,
}

impl SheetArgs {
    /// Returns the sheet to read, searching `--latest` when no path was given.
    pub fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.holdings {
            return Ok(path.clone());
        }
        let dir = self
            .latest
            .as_deref()
            .ok_or_else(|| anyhow!("No holdings sheet given"))?;

        let path = find_latest_sheet(dir)?;
        info!(path = %path.display(), "using most recent holdings sheet");
        Ok(path)
    }
}

/// Fails if `path` exists and `force` is not set.
pub fn ensure_writable(path: &Path, force: bool) -> CliResult<()> {
    if path.exists() && !force {
        return Err(CliError::FileExists(path.to_path_buf()));
    }
    Ok(())
}
