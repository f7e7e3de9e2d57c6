//! # Rebalancer Config
//!
//! Settings for the rebalancer, loaded from `rebalancer.toml`:
//!
//! - **`[sheet]`**: positional layout of the holdings sheet
//! - **`[plan]`**: asset class order and allocation warning thresholds
//! - **`[output]`**: default output format and currency symbol
//!
//! Every key is optional. Loaded settings are checked with [`Validate`].
//!
//! ## Example
//!
//! ```rust
//! use rebalancer_config::prelude::*;
//!
//! let config = RebalancerConfig::from_toml("[plan]\nwarn_tolerance_pct = 1.0\n").unwrap();
//! assert!(config.validate_or_error().is_ok());
//! assert_eq!(config.output.format, OutputFormat::Table);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod settings;

pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use settings::{OutputFormat, OutputSettings, RebalancerConfig, DEFAULT_CONFIG_FILE};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
    pub use crate::settings::{
        OutputFormat, OutputSettings, RebalancerConfig, DEFAULT_CONFIG_FILE,
    };
    pub use rebalancer_ext_file::SheetLayout;
    pub use rebalancer_portfolio::PlanConfig;
}
