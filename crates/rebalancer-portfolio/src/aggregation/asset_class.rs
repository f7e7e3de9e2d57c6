//! Asset-class level aggregation.

use std::collections::BTreeMap;

use rebalancer_core::math::saturating_sum;
use rebalancer_core::{AssetClass, Holding};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{order_classes, weight_pct};
use crate::types::PlanConfig;

/// Current position of one asset class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetClassSummary {
    /// The asset class.
    pub asset_class: AssetClass,

    /// Sum of market values in this class.
    pub current_value: Decimal,

    /// Weight as percentage of the portfolio total (0-100).
    pub current_weight_pct: f64,

    /// Number of distinct securities in this class.
    pub security_count: usize,
}

/// Groups holdings by asset class and computes portfolio weights.
///
/// Classes absent from the holdings are not listed.
#[must_use]
pub fn summarize_asset_classes(holdings: &[Holding], config: &PlanConfig) -> Vec<AssetClassSummary> {
    let mut totals: BTreeMap<&AssetClass, (Decimal, Vec<&str>)> = BTreeMap::new();
    for h in holdings {
        let entry = totals.entry(&h.asset_class).or_default();
        entry.0 = entry.0.saturating_add(h.market_value);
        if !entry.1.contains(&h.security_name.as_str()) {
            entry.1.push(&h.security_name);
        }
    }

    let total_value = saturating_sum(totals.values().map(|(value, _)| *value));

    let mut classes: Vec<AssetClass> = totals.keys().map(|c| (*c).clone()).collect();
    order_classes(&mut classes, &config.class_order);

    classes
        .into_iter()
        .map(|asset_class| {
            let (current_value, names) = &totals[&asset_class];
            AssetClassSummary {
                current_weight_pct: weight_pct(*current_value, total_value),
                current_value: *current_value,
                security_count: names.len(),
                asset_class,
            }
        })
        .collect()
}
