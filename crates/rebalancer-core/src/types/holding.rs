//! Holding representation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AssetClass, SecurityKey};

/// One security lot from a holdings sheet.
///
/// A sheet may list the same security more than once; the aggregator sums
/// lots by `(asset_class, security_name)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Asset class after forward-fill.
    pub asset_class: AssetClass,

    /// Security name.
    pub security_name: String,

    /// Units held.
    pub quantity: Decimal,

    /// Market value in the sheet's reporting currency.
    pub market_value: Decimal,
}

impl Holding {
    /// Creates a new holding.
    #[must_use]
    pub fn new(
        asset_class: AssetClass,
        security_name: impl Into<String>,
        quantity: Decimal,
        market_value: Decimal,
    ) -> Self {
        Self {
            asset_class,
            security_name: security_name.into(),
            quantity,
            market_value,
        }
    }

    /// Returns the key identifying this holding's security within its class.
    #[must_use]
    pub fn security_key(&self) -> SecurityKey {
        SecurityKey::new(self.asset_class.clone(), self.security_name.clone())
    }
}
