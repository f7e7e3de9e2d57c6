//! Rebalancing plan assembly.
//!
//! Joins the aggregated snapshot with resolved targets into presentation rows,
//! buy/sell lists and input warnings. Rendering is left to callers.

mod rows;
mod trades;
mod warnings;

pub use rows::*;
pub use trades::*;
pub use warnings::*;

use rebalancer_core::math::saturating_sum;
use rebalancer_core::AssetClass;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::{weight_pct, PortfolioSummary};
use crate::allocation::ResolvedAllocation;
use crate::types::PlanConfig;

/// Complete rebalancing plan for one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalancePlan {
    /// Client label shown in the plan header.
    pub client_label: String,

    /// Current portfolio total.
    pub total_value: Decimal,

    /// Sum of asset-class targets.
    pub total_target_value: Decimal,

    /// `total_target_value` as a share of `total_value` (0-100).
    pub total_target_pct: f64,

    /// Asset-class rows in class order.
    pub asset_classes: Vec<AssetClassRow>,

    /// Security rows grouped by class in class order.
    pub securities: Vec<SecurityRow>,

    /// Input warnings.
    #[serde(default)]
    pub warnings: Vec<PlanWarning>,
}

impl RebalancePlan {
    /// Returns the row of an asset class.
    #[must_use]
    pub fn class_row(&self, asset_class: &AssetClass) -> Option<&AssetClassRow> {
        self.asset_classes
            .iter()
            .find(|r| &r.asset_class == asset_class)
    }

    /// Returns the row of a security.
    #[must_use]
    pub fn security_row(&self, asset_class: &AssetClass, security_name: &str) -> Option<&SecurityRow> {
        self.securities
            .iter()
            .find(|r| &r.asset_class == asset_class && r.security_name == security_name)
    }

    /// Iterates the security rows of one class.
    pub fn securities_in<'a>(
        &'a self,
        asset_class: &'a AssetClass,
    ) -> impl Iterator<Item = &'a SecurityRow> + 'a {
        self.securities
            .iter()
            .filter(move |r| &r.asset_class == asset_class)
    }

    /// Buy/sell list across asset classes.
    #[must_use]
    pub fn class_trades(&self) -> TradeList {
        TradeList::from_deltas(
            self.asset_classes
                .iter()
                .map(|r| (r.asset_class.to_string(), r.buy_sell)),
        )
    }

    /// Buy/sell list across all securities.
    #[must_use]
    pub fn security_trades(&self) -> TradeList {
        TradeList::from_deltas(self.securities.iter().map(|r| (r.label(), r.buy_sell)))
    }

    /// Net of asset-class buy/sell amounts. Zero when targets add up to the total.
    #[must_use]
    pub fn net_buy_sell(&self) -> Decimal {
        saturating_sum(self.asset_classes.iter().map(|r| r.buy_sell))
    }

    /// Returns true if any warning was raised.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Builds plan rows from a summary and its resolved targets.
///
/// Summary entries without a matching target are skipped.
#[must_use]
pub fn build_plan(
    client_label: impl Into<String>,
    summary: &PortfolioSummary,
    resolved: &ResolvedAllocation,
    config: &PlanConfig,
) -> RebalancePlan {
    let total_value = summary.total_value;

    let asset_classes: Vec<AssetClassRow> = summary
        .asset_classes
        .iter()
        .filter_map(|class| {
            resolved
                .class(&class.asset_class)
                .map(|target| AssetClassRow::new(class, target, total_value))
        })
        .collect();

    let mut securities = Vec::with_capacity(summary.securities.len());
    for class in &summary.asset_classes {
        let class_target_sum = saturating_sum(
            resolved
                .securities_in(&class.asset_class)
                .map(|t| t.target_value),
        );

        for security in summary.securities_in(&class.asset_class) {
            if let Some(target) = resolved.security(&security.asset_class, &security.security_name) {
                securities.push(SecurityRow::new(security, target, class_target_sum));
            }
        }
    }

    let total_target_value = resolved.total_target();
    let total_target_pct = weight_pct(total_target_value, total_value);

    let warnings: Vec<PlanWarning> = check_allocation_total(total_target_pct, config)
        .into_iter()
        .collect();
    for warning in &warnings {
        tracing::warn!(%warning, "allocation inputs are inconsistent");
    }

    RebalancePlan {
        client_label: client_label.into(),
        total_value,
        total_target_value,
        total_target_pct,
        asset_classes,
        securities,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::aggregate;
    use crate::allocation::{resolve, TargetBasis};
    use crate::types::AllocationRequest;
    use approx::assert_relative_eq;
    use rebalancer_core::{AllocationInput, Holding, SecurityKey};
    use rust_decimal_macros::dec;

    fn class(name: &str) -> AssetClass {
        AssetClass::new(name).unwrap()
    }

    fn plan_for(holdings: &[Holding], request: &AllocationRequest) -> RebalancePlan {
        let config = PlanConfig::default();
        let summary = aggregate(holdings, &config);
        let resolved = resolve(&summary, request);
        build_plan("Jane Doe", &summary, &resolved, &config)
    }

    fn sample_holdings() -> Vec<Holding> {
        vec![
            Holding::new(class("Bonds"), "XBB", dec!(1_000), dec!(50_000)),
            Holding::new(class("Canadian Equity"), "XIC", dec!(800), dec!(30_000)),
            Holding::new(class("Canadian Equity"), "ZCN", dec!(500), dec!(20_000)),
        ]
    }

    #[test]
    fn test_class_rows() {
        let request = AllocationRequest::new()
            .with_class(class("Bonds"), AllocationInput::percent(dec!(30)).locked());
        let plan = plan_for(&sample_holdings(), &request);

        assert_eq!(plan.client_label, "Jane Doe");
        assert_eq!(plan.total_value, dec!(100_000));
        assert_eq!(plan.asset_classes.len(), 2);

        let bonds = plan.class_row(&class("Bonds")).unwrap();
        assert_eq!(bonds.target_value, dec!(30_000));
        assert_eq!(bonds.buy_sell, dec!(-20_000));
        assert_relative_eq!(bonds.current_pct, 50.0);
        assert_relative_eq!(bonds.target_pct, 30.0);
        assert_eq!(bonds.basis, TargetBasis::Locked);

        let equity = plan.class_row(&class("Canadian Equity")).unwrap();
        assert_eq!(equity.target_value, dec!(70_000));
        assert_eq!(equity.basis, TargetBasis::EvenSplit);

        assert!(plan.net_buy_sell().is_zero());
        assert!(!plan.has_warnings());
    }

    #[test]
    fn test_security_rows() {
        let request = AllocationRequest::new()
            .with_class(class("Bonds"), AllocationInput::percent(dec!(30)).locked());
        let plan = plan_for(&sample_holdings(), &request);

        let xic = plan.security_row(&class("Canadian Equity"), "XIC").unwrap();
        assert_eq!(xic.target_value, dec!(42_000));
        assert_relative_eq!(xic.current_pct_of_class, 60.0);
        assert_relative_eq!(xic.target_pct_of_class, 60.0);
        assert_eq!(xic.label(), "XIC (Canadian Equity)");

        assert_eq!(plan.securities_in(&class("Canadian Equity")).count(), 2);
    }

    #[test]
    fn test_target_pct_of_class_uses_security_target_sum() {
        let request = AllocationRequest::new()
            .with_class(class("Bonds"), AllocationInput::dollars(dec!(50_000)).locked())
            .with_security(
                SecurityKey::new(class("Bonds"), "XBB"),
                AllocationInput::dollars(dec!(25_000)).locked(),
            );
        let holdings = vec![Holding::new(class("Bonds"), "XBB", dec!(1), dec!(50_000))];
        let plan = plan_for(&holdings, &request);

        let row = plan.security_row(&class("Bonds"), "XBB").unwrap();
        assert_eq!(row.target_value, dec!(25_000));
        assert_relative_eq!(row.target_pct_of_class, 100.0);
    }

    #[test]
    fn test_trades() {
        let request = AllocationRequest::new()
            .with_class(class("Bonds"), AllocationInput::percent(dec!(30)).locked());
        let plan = plan_for(&sample_holdings(), &request);

        let classes = plan.class_trades();
        assert_eq!(classes.buys.len(), 1);
        assert_eq!(classes.buys[0].label, "Canadian Equity");
        assert_eq!(classes.sells[0].amount, dec!(20_000));

        let securities = plan.security_trades();
        assert_eq!(securities.buys.len(), 2);
        assert_eq!(securities.sells.len(), 1);
        assert_eq!(securities.total_buys(), dec!(20_000));
    }

    #[test]
    fn test_over_allocation_warning() {
        let request = AllocationRequest::new()
            .with_class(class("Bonds"), AllocationInput::percent(dec!(60)).locked())
            .with_class(class("Canadian Equity"), AllocationInput::percent(dec!(60)).locked());
        let plan = plan_for(&sample_holdings(), &request);

        assert_relative_eq!(plan.total_target_pct, 120.0);
        assert_eq!(plan.total_target_value, dec!(120_000));
        assert_eq!(plan.net_buy_sell(), dec!(20_000));
        assert_eq!(plan.warnings.len(), 1);
        assert!(matches!(plan.warnings[0], PlanWarning::OverAllocated { .. }));
    }

    #[test]
    fn test_zero_total_portfolio() {
        let holdings = vec![Holding::new(class("Bonds"), "XBB", dec!(0), dec!(0))];
        let plan = plan_for(&holdings, &AllocationRequest::new());

        let row = plan.class_row(&class("Bonds")).unwrap();
        assert!(row.target_value.is_zero());
        assert_relative_eq!(row.target_pct, 0.0);
        assert_relative_eq!(plan.total_target_pct, 0.0);
        assert!(plan.warnings.is_empty());
    }

    #[test]
    fn test_plan_serializes() {
        let plan = plan_for(&sample_holdings(), &AllocationRequest::new());
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["client_label"], "Jane Doe");
        assert_eq!(json["asset_classes"].as_array().unwrap().len(), 2);
    }
}
