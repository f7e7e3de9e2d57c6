//! Configuration file tests.

use std::fs;

use rebalancer_config::prelude::*;
use tempfile::TempDir;

#[test]
fn test_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rebalancer.toml");
    fs::write(
        &path,
        r#"
[sheet]
skip_columns = 0
label_row = 0
default_label = "Household"

[plan]
class_order = ["Bonds", "Global Equity"]
"#,
    )
    .unwrap();

    let config = RebalancerConfig::from_file(&path).unwrap();
    assert_eq!(config.sheet.skip_columns, 0);
    assert_eq!(config.sheet.header_rows, 1);
    assert_eq!(config.sheet.default_label, "Household");
    assert_eq!(config.plan.class_order, ["Bonds", "Global Equity"]);
    assert!(config.is_valid());
}

#[test]
fn test_load_explicit_missing_file() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.toml");
    let err = RebalancerConfig::load(Some(missing.as_path())).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
}

#[test]
fn test_load_explicit_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");
    fs::write(&path, "[output]\ncurrency_symbol = \"CA$\"\n").unwrap();

    let (config, source) = RebalancerConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.output.currency_symbol, "CA$");
    assert_eq!(source.as_deref(), Some(path.as_path()));
}

#[test]
fn test_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rebalancer.toml");
    fs::write(&path, "[plan\nclass_order = 3").unwrap();

    let err = RebalancerConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Deserialization(_)));
}

#[test]
fn test_write_new_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rebalancer.toml");

    RebalancerConfig::default().write_new(&path).unwrap();
    let written = RebalancerConfig::from_file(&path).unwrap();
    assert_eq!(written, RebalancerConfig::default());

    let err = RebalancerConfig::default().write_new(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_invalid_file_reports_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rebalancer.toml");
    fs::write(
        &path,
        "[plan]\nclass_order = []\nwarn_tolerance_pct = -2.0\n",
    )
    .unwrap();

    let config = RebalancerConfig::from_file(&path).unwrap();
    let err = config.validate_or_error().unwrap_err();
    let message = err.to_string();
    assert!(message.contains("plan.class_order"));
    assert!(message.contains("plan.warn_tolerance_pct"));
}
