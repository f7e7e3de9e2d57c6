//! Holdings aggregation.
//!
//! Rolls parsed holdings up into:
//!
//! - **Asset-class totals** with each class's weight in the portfolio
//! - **Security totals** with each security's weight within its class
//!
//! Classes are ordered by [`PlanConfig::class_order`](crate::PlanConfig), with
//! unlisted classes following alphabetically. Securities are ordered by class,
//! then by name. All functions are pure.
//!
//! # Example
//!
//! ```rust
//! use rebalancer_portfolio::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let bonds = AssetClass::new("Bonds").unwrap();
//! let holdings = vec![
//!     Holding::new(bonds.clone(), "XBB", dec!(10), dec!(600)),
//!     Holding::new(bonds.clone(), "ZAG", dec!(10), dec!(400)),
//! ];
//!
//! let summary = aggregate(&holdings, &PlanConfig::default());
//! assert_eq!(summary.total_value, dec!(1_000));
//! assert_eq!(summary.securities_in(&bonds).count(), 2);
//! ```

mod asset_class;
mod security;

pub use asset_class::*;
pub use security::*;

use rebalancer_core::math::{mul_div, saturating_sum};
use rebalancer_core::{AssetClass, Holding};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::PlanConfig;

/// Aggregated view of one holdings snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Asset class totals in presentation order.
    pub asset_classes: Vec<AssetClassSummary>,

    /// Security totals, grouped by class in the same order.
    pub securities: Vec<SecuritySummary>,

    /// Sum of all market values.
    pub total_value: Decimal,
}

impl PortfolioSummary {
    /// Returns the summary for an asset class.
    #[must_use]
    pub fn class(&self, asset_class: &AssetClass) -> Option<&AssetClassSummary> {
        self.asset_classes
            .iter()
            .find(|c| &c.asset_class == asset_class)
    }

    /// Returns the summary for a security.
    #[must_use]
    pub fn security(&self, asset_class: &AssetClass, security_name: &str) -> Option<&SecuritySummary> {
        self.securities
            .iter()
            .find(|s| &s.asset_class == asset_class && s.security_name == security_name)
    }

    /// Iterates the securities of one asset class.
    pub fn securities_in<'a>(
        &'a self,
        asset_class: &'a AssetClass,
    ) -> impl Iterator<Item = &'a SecuritySummary> + 'a {
        self.securities
            .iter()
            .filter(move |s| &s.asset_class == asset_class)
    }

    /// Returns true when the snapshot contains no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.asset_classes.is_empty()
    }
}

/// Aggregates holdings into class and security summaries.
#[must_use]
pub fn aggregate(holdings: &[Holding], config: &PlanConfig) -> PortfolioSummary {
    let asset_classes = summarize_asset_classes(holdings, config);
    let total_value = saturating_sum(asset_classes.iter().map(|c| c.current_value));
    let securities = summarize_securities(holdings, &asset_classes);

    PortfolioSummary {
        asset_classes,
        securities,
        total_value,
    }
}

/// Percentage share of `part` in `whole` (0-100), or 0 when `whole` is zero.
pub(crate) fn weight_pct(part: Decimal, whole: Decimal) -> f64 {
    if whole.is_zero() {
        return 0.0;
    }
    mul_div(part, Decimal::ONE_HUNDRED, whole)
        .try_into()
        .unwrap_or(0.0)
}

/// Orders classes by `order`, unlisted classes last in alphabetical order.
pub(crate) fn order_classes(classes: &mut [AssetClass], order: &[String]) {
    classes.sort_by(|a, b| {
        let rank_a = a.rank_in(order).unwrap_or(usize::MAX);
        let rank_b = b.rank_in(order).unwrap_or(usize::MAX);
        rank_a.cmp(&rank_b).then_with(|| a.cmp(b))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn class(name: &str) -> AssetClass {
        AssetClass::new(name).unwrap()
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = aggregate(&[], &PlanConfig::default());
        assert!(summary.is_empty());
        assert!(summary.securities.is_empty());
        assert!(summary.total_value.is_zero());
    }

    #[test]
    fn test_total_equals_sum_of_classes() {
        let holdings = vec![
            Holding::new(class("Bonds"), "XBB", dec!(1), dec!(1_234.56)),
            Holding::new(class("Global Equity"), "XAW", dec!(1), dec!(7_890.12)),
            Holding::new(class("Bonds"), "ZAG", dec!(1), dec!(0.32)),
        ];
        let summary = aggregate(&holdings, &PlanConfig::default());

        let class_sum: Decimal = summary.asset_classes.iter().map(|c| c.current_value).sum();
        assert_eq!(class_sum, summary.total_value);
        assert_eq!(summary.total_value, dec!(9_125.00));
    }

    #[test]
    fn test_lookup_helpers() {
        let holdings = vec![
            Holding::new(class("Bonds"), "XBB", dec!(1), dec!(100)),
            Holding::new(class("Canadian Equity"), "XIC", dec!(1), dec!(100)),
        ];
        let summary = aggregate(&holdings, &PlanConfig::default());

        assert!(summary.class(&class("Bonds")).is_some());
        assert!(summary.class(&class("Global Equity")).is_none());
        assert!(summary.security(&class("Bonds"), "XBB").is_some());
        assert!(summary.security(&class("Bonds"), "XIC").is_none());
        assert_eq!(summary.securities_in(&class("Canadian Equity")).count(), 1);
    }

    #[test]
    fn test_order_classes() {
        let order: Vec<String> = ["Bonds", "Cash"].iter().map(|s| s.to_string()).collect();
        let mut classes = vec![class("Zeta"), class("Cash"), class("Alpha"), class("Bonds")];
        order_classes(&mut classes, &order);

        let names: Vec<&str> = classes.iter().map(AssetClass::as_str).collect();
        assert_eq!(names, vec!["Bonds", "Cash", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_weight_pct_zero_whole() {
        assert!((weight_pct(dec!(10), Decimal::ZERO)).abs() < f64::EPSILON);
        assert!((weight_pct(dec!(25), dec!(100)) - 25.0).abs() < 1e-12);
    }
}
