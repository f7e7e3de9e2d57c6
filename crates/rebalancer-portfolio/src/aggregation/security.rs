//! Security-within-class aggregation.

use std::collections::BTreeMap;

use rebalancer_core::math::{mul_div, saturating_sum};
use rebalancer_core::{AssetClass, Holding, SecurityKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AssetClassSummary;

/// Current position of one security within its asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySummary {
    /// Owning asset class.
    pub asset_class: AssetClass,

    /// Security name.
    pub security_name: String,

    /// Sum of market values across all lots of this security.
    pub current_value: Decimal,

    /// Sum of current values of every security in the same class.
    pub class_total: Decimal,

    /// `current_value / class_total` as a fraction (0-1); 0 when the class total is zero.
    pub current_weight_within_class: f64,
}

impl SecuritySummary {
    /// Returns the key identifying this security.
    #[must_use]
    pub fn key(&self) -> SecurityKey {
        SecurityKey::new(self.asset_class.clone(), self.security_name.clone())
    }
}

/// Groups holdings by `(asset_class, security_name)` and computes in-class weights.
///
/// Output follows the order of `classes`, securities sorted by name within a
/// class. Holdings whose class is not in `classes` are ignored.
#[must_use]
pub fn summarize_securities(holdings: &[Holding], classes: &[AssetClassSummary]) -> Vec<SecuritySummary> {
    let mut by_class: BTreeMap<&AssetClass, BTreeMap<&str, Decimal>> = BTreeMap::new();
    for h in holdings {
        let value = by_class
            .entry(&h.asset_class)
            .or_default()
            .entry(h.security_name.as_str())
            .or_default();
        *value = value.saturating_add(h.market_value);
    }

    let mut result = Vec::new();
    for class in classes {
        let Some(securities) = by_class.get(&class.asset_class) else {
            continue;
        };

        let class_total = saturating_sum(securities.values().copied());

        for (name, value) in securities {
            let current_weight_within_class: f64 = if class_total.is_zero() {
                0.0
            } else {
                mul_div(*value, Decimal::ONE, class_total)
                    .try_into()
                    .unwrap_or(0.0)
            };

            result.push(SecuritySummary {
                asset_class: class.asset_class.clone(),
                security_name: (*name).to_string(),
                current_value: *value,
                class_total,
                current_weight_within_class,
            });
        }
    }

    result
}
