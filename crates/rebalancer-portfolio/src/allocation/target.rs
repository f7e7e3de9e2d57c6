//! Resolved targets.

use rebalancer_core::math::saturating_sum;
use rebalancer_core::{AssetClass, SecurityKey};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a target value was arrived at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetBasis {
    /// Taken directly from a locked input.
    Locked,
    /// Even share of the remainder (asset-class tier).
    EvenSplit,
    /// Market-value-proportional share of the remainder (security tier).
    Proportional,
    /// No remainder could be distributed; target left at zero.
    Unallocated,
}

impl TargetBasis {
    /// Returns a short label for display.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Locked => "locked",
            Self::EvenSplit => "even",
            Self::Proportional => "proportional",
            Self::Unallocated => "unallocated",
        }
    }
}

/// Target value computed for one entity. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedTarget<K> {
    /// The entity this target belongs to.
    pub entity: K,

    /// Current value of the entity.
    pub current_value: Decimal,

    /// Resolved target value.
    pub target_value: Decimal,

    /// `target_value - current_value`; positive buys, negative sells.
    pub buy_sell_delta: Decimal,

    /// How the target was computed.
    pub basis: TargetBasis,
}

impl<K> ResolvedTarget<K> {
    pub(crate) fn new(entity: K, current_value: Decimal, target_value: Decimal, basis: TargetBasis) -> Self {
        Self {
            entity,
            current_value,
            target_value,
            buy_sell_delta: target_value.saturating_sub(current_value),
            basis,
        }
    }

    /// Returns true if the target came from a locked input.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.basis == TargetBasis::Locked
    }
}

/// Resolved asset-class target.
pub type ClassTarget = ResolvedTarget<AssetClass>;

/// Resolved security target.
pub type SecurityTarget = ResolvedTarget<SecurityKey>;

/// Resolved targets for both tiers of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolvedAllocation {
    /// Asset-class targets in class order.
    pub classes: Vec<ClassTarget>,

    /// Security targets grouped by class in class order.
    pub securities: Vec<SecurityTarget>,
}

impl ResolvedAllocation {
    /// Sum of asset-class targets.
    #[must_use]
    pub fn total_target(&self) -> Decimal {
        saturating_sum(self.classes.iter().map(|t| t.target_value))
    }

    /// Sum of asset-class buy/sell deltas.
    #[must_use]
    pub fn net_buy_sell(&self) -> Decimal {
        saturating_sum(self.classes.iter().map(|t| t.buy_sell_delta))
    }

    /// Returns the target for an asset class.
    #[must_use]
    pub fn class(&self, asset_class: &AssetClass) -> Option<&ClassTarget> {
        self.classes.iter().find(|t| &t.entity == asset_class)
    }

    /// Returns the target for a security.
    #[must_use]
    pub fn security(&self, asset_class: &AssetClass, security_name: &str) -> Option<&SecurityTarget> {
        self.securities
            .iter()
            .find(|t| &t.entity.asset_class == asset_class && t.entity.security_name == security_name)
    }

    /// Iterates security targets of one class.
    pub fn securities_in<'a>(
        &'a self,
        asset_class: &'a AssetClass,
    ) -> impl Iterator<Item = &'a SecurityTarget> + 'a {
        self.securities
            .iter()
            .filter(move |t| &t.entity.asset_class == asset_class)
    }
}
