//! # Rebalancer Core
//!
//! Core domain types for the Rebalancer portfolio rebalancing calculator.
//!
//! This crate provides the building blocks shared by every other crate:
//!
//! - **Holdings**: One parsed row of a holdings sheet ([`Holding`])
//! - **Asset classes**: Validated class labels and the canonical presentation order
//! - **Allocation inputs**: The per-entity `(method, value, locked)` request, with the
//!   method expressed as a closed [`AllocationTarget`] variant
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Targets are enum variants, never string-matched method names
//! - **Explicit Over Implicit**: Inputs travel as values; nothing is held in ambient state
//!
//! ## Example
//!
//! ```rust
//! use rebalancer_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let input = AllocationInput::percent(dec!(30)).locked();
//! let target = input.target.resolve(dec!(100_000), dec!(50_000));
//! assert_eq!(target, dec!(30_000));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod math;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{
        AllocationInput, AllocationMethod, AllocationTarget, AssetClass, Holding, SecurityKey,
        CANONICAL_CLASS_ORDER,
    };
    pub use rust_decimal::Decimal;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{
    AllocationInput, AllocationMethod, AllocationTarget, AssetClass, Holding, SecurityKey,
    CANONICAL_CLASS_ORDER,
};
