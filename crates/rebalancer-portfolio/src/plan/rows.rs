//! Presentation rows.

use rebalancer_core::AssetClass;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::{weight_pct, AssetClassSummary, SecuritySummary};
use crate::allocation::{ClassTarget, SecurityTarget, TargetBasis};

/// One row of the asset-class plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetClassRow {
    /// Asset class.
    pub asset_class: AssetClass,
    /// Current value.
    pub current_value: Decimal,
    /// Current share of the portfolio (0-100).
    pub current_pct: f64,
    /// Target value.
    pub target_value: Decimal,
    /// Target as a share of the current portfolio total (0-100).
    pub target_pct: f64,
    /// Target minus current.
    pub buy_sell: Decimal,
    /// How the target was derived.
    pub basis: TargetBasis,
}

impl AssetClassRow {
    pub(crate) fn new(summary: &AssetClassSummary, target: &ClassTarget, total_value: Decimal) -> Self {
        Self {
            asset_class: summary.asset_class.clone(),
            current_value: summary.current_value,
            current_pct: summary.current_weight_pct,
            target_value: target.target_value,
            target_pct: weight_pct(target.target_value, total_value),
            buy_sell: target.buy_sell_delta,
            basis: target.basis,
        }
    }
}

/// One row of a per-class security plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityRow {
    /// Owning asset class.
    pub asset_class: AssetClass,
    /// Security name.
    pub security_name: String,
    /// Current market value.
    pub market_value: Decimal,
    /// Current share of the class (0-100).
    pub current_pct_of_class: f64,
    /// Target value.
    pub target_value: Decimal,
    /// Share of the summed security targets of the class (0-100).
    pub target_pct_of_class: f64,
    /// Target minus current.
    pub buy_sell: Decimal,
    /// How the target was derived.
    pub basis: TargetBasis,
}

impl SecurityRow {
    pub(crate) fn new(summary: &SecuritySummary, target: &SecurityTarget, class_target_sum: Decimal) -> Self {
        Self {
            asset_class: summary.asset_class.clone(),
            security_name: summary.security_name.clone(),
            market_value: summary.current_value,
            current_pct_of_class: summary.current_weight_within_class * 100.0,
            target_value: target.target_value,
            target_pct_of_class: weight_pct(target.target_value, class_target_sum),
            buy_sell: target.buy_sell_delta,
            basis: target.basis,
        }
    }

    /// Display label, e.g. `XBB (Bonds)`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} ({})", self.security_name, self.asset_class)
    }
}
