//! # Rebalancer Ext File
//!
//! File formats around the rebalancing pipeline:
//! - Holdings sheet import (CSV or spreadsheet workbook) with a positional column layout
//! - JSON/TOML allocation request files
//! - Plan export (one CSV per tier, a two-sheet workbook and the plan as JSON)

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod export;
mod holdings;
mod request;
mod workbook;

pub use error::*;
pub use export::*;
pub use holdings::*;
pub use request::*;
pub use workbook::*;
