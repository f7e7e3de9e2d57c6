//! # Rebalancer Portfolio
//!
//! Computes a rebalancing plan from a snapshot of holdings and a set of
//! per-entity allocation inputs.
//!
//! ## Pipeline
//!
//! 1. [`aggregate`] rolls holdings up into asset-class and security-within-class
//!    totals with current weights.
//! 2. [`resolve`] turns an [`AllocationRequest`] into dollar targets, first across
//!    asset classes and then across the securities of each class.
//! 3. [`build_plan`] produces presentation rows, buy/sell lists and warnings.
//!
//! [`rebalance`] runs all three steps.
//!
//! ## Resolution policy
//!
//! Locked entities take their target straight from their input. Whatever value
//! remains is then handed to the unlocked entities:
//!
//! - **Asset classes** split the remainder *evenly*.
//! - **Securities** split their class's remainder *in proportion to current
//!   market value*.
//!
//! Inconsistent inputs (over-allocation, negative targets) never fail; they
//! surface through the buy/sell output and [`PlanWarning`].
//!
//! ## Quick Start
//!
//! ```rust
//! use rebalancer_portfolio::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let bonds = AssetClass::new("Bonds").unwrap();
//! let equity = AssetClass::new("Canadian Equity").unwrap();
//! let holdings = vec![
//!     Holding::new(bonds.clone(), "XBB", dec!(1_000), dec!(50_000)),
//!     Holding::new(equity.clone(), "XIC", dec!(1_500), dec!(50_000)),
//! ];
//!
//! let request = AllocationRequest::new()
//!     .with_class(bonds.clone(), AllocationInput::percent(dec!(30)).locked());
//!
//! let plan = rebalance("Client", &holdings, &request, &PlanConfig::default()).unwrap();
//! assert_eq!(plan.class_row(&bonds).unwrap().target_value, dec!(30_000));
//! assert_eq!(plan.class_row(&equity).unwrap().target_value, dec!(70_000));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod aggregation;
pub mod allocation;
pub mod error;
pub mod plan;
pub mod types;

use rebalancer_core::Holding;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{AllocationRequest, PlanConfig};

pub use aggregation::{aggregate, AssetClassSummary, PortfolioSummary, SecuritySummary};

pub use allocation::{
    resolve, resolve_asset_classes, resolve_securities, ClassTarget, ResolvedAllocation,
    ResolvedTarget, SecurityTarget, TargetBasis,
};

pub use plan::{
    build_plan, check_allocation_total, AssetClassRow, PlanWarning, RebalancePlan, SecurityRow,
    Trade, TradeList, TradeSide,
};

/// Runs aggregation, resolution and plan building for one snapshot.
///
/// Fails only when `holdings` is empty; every numeric input is accepted.
pub fn rebalance(
    client_label: impl Into<String>,
    holdings: &[Holding],
    request: &AllocationRequest,
    config: &PlanConfig,
) -> PortfolioResult<RebalancePlan> {
    if holdings.is_empty() {
        return Err(PortfolioError::EmptyPortfolio);
    }

    let summary = aggregate(holdings, config);
    let resolved = resolve(&summary, request);
    Ok(build_plan(client_label, &summary, &resolved, config))
}

/// Prelude module for convenient imports.
///
/// ```rust
/// use rebalancer_portfolio::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{PortfolioError, PortfolioResult};

    // Request and config
    pub use crate::types::{AllocationRequest, PlanConfig};

    // Aggregation
    pub use crate::aggregation::{aggregate, AssetClassSummary, PortfolioSummary, SecuritySummary};

    // Resolution
    pub use crate::allocation::{
        resolve, ClassTarget, ResolvedAllocation, SecurityTarget, TargetBasis,
    };

    // Plan
    pub use crate::plan::{
        build_plan, AssetClassRow, PlanWarning, RebalancePlan, SecurityRow, TradeList, TradeSide,
    };

    pub use crate::rebalance;

    // Re-export commonly used types from dependencies
    pub use rebalancer_core::{
        AllocationInput, AllocationMethod, AllocationTarget, AssetClass, Holding, SecurityKey,
    };
    pub use rust_decimal::Decimal;
}
