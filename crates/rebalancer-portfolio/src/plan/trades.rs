//! Buy/sell partitioning.

use rebalancer_core::math::saturating_sum;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a rebalancing trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSide {
    /// Target above current value.
    Buy,
    /// Target below current value.
    Sell,
    /// Target equals current value.
    Hold,
}

impl TradeSide {
    /// Classifies a buy/sell delta.
    #[must_use]
    pub fn from_delta(delta: Decimal) -> Self {
        if delta.is_sign_positive() && !delta.is_zero() {
            Self::Buy
        } else if delta.is_sign_negative() && !delta.is_zero() {
            Self::Sell
        } else {
            Self::Hold
        }
    }
}

/// One line of a buy or sell list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// What to trade ("Bonds", or "XBB (Bonds)" for a security).
    pub label: String,
    /// Absolute trade amount.
    pub amount: Decimal,
}

/// Buys and sells for one tier of a plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeList {
    /// Entities to buy, in plan order.
    pub buys: Vec<Trade>,
    /// Entities to sell, in plan order, with positive amounts.
    pub sells: Vec<Trade>,
    /// Count of entities needing no action.
    pub unchanged: usize,
}

impl TradeList {
    /// Partitions `(label, delta)` pairs by the sign of the delta.
    pub fn from_deltas<I, S>(deltas: I) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let mut list = Self::default();
        for (label, delta) in deltas {
            match TradeSide::from_delta(delta) {
                TradeSide::Buy => list.buys.push(Trade {
                    label: label.into(),
                    amount: delta,
                }),
                TradeSide::Sell => list.sells.push(Trade {
                    label: label.into(),
                    amount: delta.abs(),
                }),
                TradeSide::Hold => list.unchanged += 1,
            }
        }
        list
    }

    /// Sum of buy amounts.
    #[must_use]
    pub fn total_buys(&self) -> Decimal {
        saturating_sum(self.buys.iter().map(|t| t.amount))
    }

    /// Sum of sell amounts.
    #[must_use]
    pub fn total_sells(&self) -> Decimal {
        saturating_sum(self.sells.iter().map(|t| t.amount))
    }

    /// Returns true when nothing needs to be traded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buys.is_empty() && self.sells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_from_delta() {
        assert_eq!(TradeSide::from_delta(dec!(0.01)), TradeSide::Buy);
        assert_eq!(TradeSide::from_delta(dec!(-0.01)), TradeSide::Sell);
        assert_eq!(TradeSide::from_delta(Decimal::ZERO), TradeSide::Hold);
        assert_eq!(TradeSide::from_delta(-Decimal::ZERO), TradeSide::Hold);
    }

    #[test]
    fn test_partition() {
        let list = TradeList::from_deltas([
            ("Bonds", dec!(-20_000)),
            ("Canadian Equity", dec!(20_000)),
            ("Cash & Cash Equivalents", Decimal::ZERO),
        ]);

        assert_eq!(list.buys.len(), 1);
        assert_eq!(list.buys[0].label, "Canadian Equity");
        assert_eq!(list.sells.len(), 1);
        assert_eq!(list.sells[0].amount, dec!(20_000));
        assert_eq!(list.unchanged, 1);
        assert_eq!(list.total_buys(), list.total_sells());
        assert!(!list.is_empty());
    }
}
