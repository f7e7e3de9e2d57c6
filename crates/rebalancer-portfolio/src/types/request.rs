//! Allocation request: the explicit set of inputs for one resolution run.

use std::collections::BTreeMap;

use rebalancer_core::math::mul_div;
use rebalancer_core::{AllocationInput, AssetClass, SecurityKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::aggregation::PortfolioSummary;
use crate::error::{PortfolioError, PortfolioResult};

/// Allocation inputs for every asset class and security of one run.
///
/// Entities without an entry resolve as an unlocked `0%` input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Inputs keyed by asset class.
    #[serde(default)]
    pub asset_classes: BTreeMap<AssetClass, AllocationInput>,

    /// Inputs keyed by asset class, then security name.
    #[serde(default)]
    pub securities: BTreeMap<AssetClass, BTreeMap<String, AllocationInput>>,
}

impl AllocationRequest {
    /// Creates an empty request (everything unlocked).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the input for an asset class.
    #[must_use]
    pub fn with_class(mut self, asset_class: AssetClass, input: AllocationInput) -> Self {
        self.asset_classes.insert(asset_class, input);
        self
    }

    /// Sets the input for a security.
    #[must_use]
    pub fn with_security(mut self, key: SecurityKey, input: AllocationInput) -> Self {
        self.securities
            .entry(key.asset_class)
            .or_default()
            .insert(key.security_name, input);
        self
    }

    /// Returns the input for an asset class, or the unlocked default.
    #[must_use]
    pub fn class_input(&self, asset_class: &AssetClass) -> AllocationInput {
        self.asset_classes
            .get(asset_class)
            .copied()
            .unwrap_or_default()
    }

    /// Returns the input for a security, or the unlocked default.
    #[must_use]
    pub fn security_input(&self, asset_class: &AssetClass, security_name: &str) -> AllocationInput {
        self.securities
            .get(asset_class)
            .and_then(|by_name| by_name.get(security_name))
            .copied()
            .unwrap_or_default()
    }

    /// Builds an editable request covering every entity in `summary`.
    ///
    /// All entries are unlocked percentages set to the current weight
    /// (rounded to two decimals), so locking an entry as-is holds it steady.
    #[must_use]
    pub fn template(summary: &PortfolioSummary) -> Self {
        let mut request = Self::new();

        for class in &summary.asset_classes {
            let pct = percent_of(class.current_value, summary.total_value);
            request
                .asset_classes
                .insert(class.asset_class.clone(), AllocationInput::percent(pct));
        }

        for security in &summary.securities {
            let pct = percent_of(security.current_value, security.class_total);
            request = request.with_security(
                SecurityKey::new(security.asset_class.clone(), security.security_name.clone()),
                AllocationInput::percent(pct),
            );
        }

        request
    }

    /// Lists request entries that do not match any class or security in `summary`.
    #[must_use]
    pub fn unknown_entities(&self, summary: &PortfolioSummary) -> Vec<PortfolioError> {
        let mut unknown = Vec::new();

        for asset_class in self.asset_classes.keys() {
            if summary.class(asset_class).is_none() {
                unknown.push(PortfolioError::unknown_asset_class(asset_class.as_str()));
            }
        }

        for (asset_class, by_name) in &self.securities {
            for name in by_name.keys() {
                if summary.security(asset_class, name).is_none() {
                    unknown.push(PortfolioError::unknown_security(asset_class.as_str(), name));
                }
            }
        }

        unknown
    }

    /// Fails with the first entry that does not match the holdings.
    pub fn validate_against(&self, summary: &PortfolioSummary) -> PortfolioResult<()> {
        match self.unknown_entities(summary).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    mul_div(part, Decimal::ONE_HUNDRED, whole).round_dp(2)
}
