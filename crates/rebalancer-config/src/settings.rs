//! Rebalancer settings file.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rebalancer_ext_file::SheetLayout;
use rebalancer_portfolio::PlanConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "rebalancer.toml";

/// Default rendering of command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Formatted tables.
    #[default]
    Table,
    /// JSON.
    Json,
    /// CSV.
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown output format '{other}'")),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Format used when `--format` is not given.
    pub format: OutputFormat,

    /// Symbol prefixed to money amounts in tables.
    pub currency_symbol: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            currency_symbol: "$".to_string(),
        }
    }
}

/// Complete rebalancer configuration.
///
/// Every section is optional in the file; missing keys take their defaults.
///
/// ```toml
/// [sheet]
/// skip_columns = 1
/// label_row = 2
///
/// [plan]
/// warn_tolerance_pct = 0.5
///
/// [output]
/// format = "json"
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RebalancerConfig {
    /// Holdings sheet layout.
    pub sheet: SheetLayout,

    /// Ordering and warning settings.
    pub plan: PlanConfig,

    /// Output settings.
    pub output: OutputSettings,
}

impl RebalancerConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Resolves the configuration to use.
    ///
    /// An explicit path must exist. Without one, [`DEFAULT_CONFIG_FILE`] in
    /// the working directory is used when present, otherwise defaults.
    /// Returns the configuration and the file it came from.
    pub fn load(explicit: Option<&Path>) -> ConfigResult<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            let config = Self::from_file(path)?;
            debug!(path = %path.display(), "loaded configuration");
            return Ok((config, Some(path.to_path_buf())));
        }

        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            let config = Self::from_file(&local)?;
            debug!(path = %local.display(), "loaded configuration");
            return Ok((config, Some(local)));
        }

        debug!("no configuration file; using defaults");
        Ok((Self::default(), None))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration as TOML, refusing to overwrite an existing file.
    pub fn write_new(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if path.exists() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::AlreadyExists, "file already exists"),
            });
        }
        std::fs::write(path, self.to_toml()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Sets the plan settings.
    #[must_use]
    pub fn with_plan(mut self, plan: PlanConfig) -> Self {
        self.plan = plan;
        self
    }

    /// Sets the sheet layout.
    #[must_use]
    pub fn with_sheet(mut self, sheet: SheetLayout) -> Self {
        self.sheet = sheet;
        self
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

impl Validate for SheetLayout {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.header_rows == 0 {
            errors.push(ValidationError::with_rule(
                "header_rows",
                "must be at least 1",
                "min",
            ));
        }
        if self.default_label.trim().is_empty() {
            errors.push(ValidationError::new("default_label", "must not be blank"));
        }
        errors
    }
}

impl Validate for PlanConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.class_order.is_empty() {
            errors.push(ValidationError::new("class_order", "must not be empty"));
        }

        let mut seen = HashSet::new();
        for (i, name) in self.class_order.iter().enumerate() {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                errors.push(ValidationError::new(
                    format!("class_order[{i}]"),
                    "must not be blank",
                ));
            } else if !seen.insert(trimmed) {
                errors.push(ValidationError::with_rule(
                    format!("class_order[{i}]"),
                    format!("duplicate asset class '{trimmed}'"),
                    "unique",
                ));
            }
        }

        if !self.warn_tolerance_pct.is_finite() || self.warn_tolerance_pct < 0.0 {
            errors.push(ValidationError::with_rule(
                "warn_tolerance_pct",
                "must be a finite, non-negative number",
                "range",
            ));
        }

        errors
    }
}

impl Validate for OutputSettings {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.currency_symbol.is_empty() {
            errors.push(ValidationError::new("currency_symbol", "must not be empty"));
        }
        errors
    }
}

impl Validate for RebalancerConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let sheet = self.sheet.validate().into_iter().map(|e| e.in_section("sheet"));
        let plan = self.plan.validate().into_iter().map(|e| e.in_section("plan"));
        let output = self.output.validate().into_iter().map(|e| e.in_section("output"));
        sheet.chain(plan).chain(output).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RebalancerConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.sheet.label_row, 2);
        assert_eq!(config.plan.class_order.len(), 4);
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_partial_toml() {
        let config = RebalancerConfig::from_toml(
            r#"
[plan]
warn_under_allocation = true

[output]
format = "json"
"#,
        )
        .unwrap();

        assert!(config.plan.warn_under_allocation);
        assert_eq!(config.plan.warn_tolerance_pct, 0.5);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.currency_symbol, "$");
        assert_eq!(config.sheet, SheetLayout::default());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = RebalancerConfig::from_toml("[output]\nformat = \"xml\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }

    #[test]
    fn test_round_trip_toml() {
        let config = RebalancerConfig::default();
        let text = config.to_toml().unwrap();
        assert!(text.contains("[sheet]"));
        assert_eq!(RebalancerConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_validation_collects_all_sections() {
        let mut config = RebalancerConfig::default();
        config.sheet.header_rows = 0;
        config.plan.class_order = vec!["Bonds".into(), " Bonds ".into(), "".into()];
        config.plan.warn_tolerance_pct = f64::NAN;
        config.output.currency_symbol.clear();

        let errors = config.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            [
                "sheet.header_rows",
                "plan.class_order[1]",
                "plan.class_order[2]",
                "plan.warn_tolerance_pct",
                "output.currency_symbol",
            ]
        );
    }

    #[test]
    fn test_padded_class_order_entries_still_order_classes() {
        use rebalancer_portfolio::prelude::{aggregate, AssetClass, Decimal, Holding};

        let config = RebalancerConfig::from_toml(
            r#"
[plan]
class_order = [" Global Equity ", "Bonds  "]
"#,
        )
        .unwrap();
        assert!(config.validate().is_empty());

        let holding = |class: &str| {
            Holding::new(AssetClass::new(class).unwrap(), "X", Decimal::ONE, Decimal::TEN)
        };
        let summary = aggregate(
            &[holding("Bonds"), holding("Cash"), holding("Global Equity")],
            &config.plan,
        );
        let names: Vec<&str> = summary
            .asset_classes
            .iter()
            .map(|c| c.asset_class.as_str())
            .collect();
        assert_eq!(names, ["Global Equity", "Bonds", "Cash"]);
    }

    #[test]
    fn test_empty_class_order() {
        let plan = PlanConfig::default().with_class_order(Vec::<String>::new());
        let errors = plan.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "class_order");
    }

    #[test]
    fn test_negative_tolerance() {
        let plan = PlanConfig::default().with_tolerance(-1.0);
        assert!(!plan.is_valid());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }
}
