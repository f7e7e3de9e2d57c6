//! Property-based tests for rebalancing invariants.
//!
//! These tests verify properties that should hold for any holdings set:
//! - Class totals sum to the portfolio total
//! - Fully unlocked classes split the total evenly
//! - Consistent locked inputs net to zero buy/sell
//! - Unlocked securities keep their current proportions
//! - Resolution is deterministic

use rebalancer_portfolio::prelude::*;
use rebalancer_portfolio::resolve_securities;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

const CLASSES: [&str; 5] = [
    "Cash & Cash Equivalents",
    "Bonds",
    "Canadian Equity",
    "Global Equity",
    "Real Estate",
];

/// Generates N holdings spread over a hash-chosen subset of classes.
fn generate_holdings(n: usize, seed: u64) -> Vec<Holding> {
    (0..n)
        .map(|i| {
            let hash = simple_hash(seed, i as u64);
            let class = AssetClass::new(CLASSES[hash as usize % CLASSES.len()]).unwrap();
            let name = format!("SEC{}", hash % 7);
            // Cents, up to $250k per lot
            let market_value = Decimal::new((hash % 25_000_000) as i64, 2);
            let quantity = Decimal::from(1 + (hash % 5_000) as i64);
            Holding::new(class, name, quantity, market_value)
        })
        .collect()
}

fn simple_hash(seed: u64, i: u64) -> u64 {
    let mut x = seed.wrapping_add(i).wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x = x.wrapping_mul(0x517cc1b727220a95);
    x ^= x >> 32;
    x
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn assert_close(actual: Decimal, expected: Decimal) {
    let diff = (actual - expected).abs();
    assert!(
        diff < dec!(0.000001),
        "expected {expected}, got {actual} (diff {diff})"
    );
}

// =============================================================================
// PROPERTY: CLASS TOTALS SUM TO PORTFOLIO TOTAL
// =============================================================================

#[test]
fn property_class_totals_sum_to_total() {
    for seed in 0..25 {
        let holdings = generate_holdings(5 + seed as usize * 3, seed);
        let summary = aggregate(&holdings, &PlanConfig::default());

        let class_sum: Decimal = summary.asset_classes.iter().map(|c| c.current_value).sum();
        let holding_sum: Decimal = holdings.iter().map(|h| h.market_value).sum();

        assert_eq!(class_sum, summary.total_value, "seed {seed}");
        assert_eq!(holding_sum, summary.total_value, "seed {seed}");
    }
}

#[test]
fn property_class_weights_sum_to_100() {
    for seed in 0..25 {
        let holdings = generate_holdings(20, seed);
        let summary = aggregate(&holdings, &PlanConfig::default());
        if summary.total_value.is_zero() {
            continue;
        }

        let weight_sum: f64 = summary
            .asset_classes
            .iter()
            .map(|c| c.current_weight_pct)
            .sum();
        assert!((weight_sum - 100.0).abs() < 1e-6, "seed {seed}: {weight_sum}");
    }
}

// =============================================================================
// PROPERTY: FULLY UNLOCKED CLASSES SPLIT EVENLY
// =============================================================================

#[test]
fn property_unlocked_classes_split_evenly() {
    for seed in 0..25 {
        let holdings = generate_holdings(30, seed);
        let summary = aggregate(&holdings, &PlanConfig::default());
        let resolved = resolve(&summary, &AllocationRequest::new());

        let count = Decimal::from(summary.asset_classes.len());
        let expected = summary.total_value / count;

        for target in &resolved.classes {
            assert_close(target.target_value, expected);
            assert_eq!(target.basis, TargetBasis::EvenSplit);
        }
        assert_close(resolved.total_target(), summary.total_value);
    }
}

// =============================================================================
// PROPERTY: CONSISTENT LOCKED INPUTS NET TO ZERO
// =============================================================================

#[test]
fn property_consistent_locked_inputs_net_to_zero() {
    for seed in 0..25 {
        let holdings = generate_holdings(30, seed);
        let summary = aggregate(&holdings, &PlanConfig::default());

        // Lock every class at a dollar amount; the last one absorbs the rest.
        let mut request = AllocationRequest::new();
        let mut assigned = Decimal::ZERO;
        let last = summary.asset_classes.len() - 1;
        for (i, class) in summary.asset_classes.iter().enumerate() {
            let amount = if i == last {
                summary.total_value - assigned
            } else {
                let hash = simple_hash(seed, 1_000 + i as u64);
                (summary.total_value * Decimal::from(hash % 20) / dec!(100)).round_dp(2)
            };
            assigned += amount;
            request = request.with_class(class.asset_class.clone(), AllocationInput::dollars(amount).locked());
        }

        let resolved = resolve(&summary, &request);
        assert_eq!(resolved.total_target(), summary.total_value, "seed {seed}");
        assert!(resolved.net_buy_sell().is_zero(), "seed {seed}");
    }
}

// =============================================================================
// PROPERTY: PROPORTIONAL SECURITY SPLIT
// =============================================================================

#[test]
fn property_unlocked_securities_keep_proportions() {
    for seed in 0..25 {
        let holdings = generate_holdings(40, seed);
        let summary = aggregate(&holdings, &PlanConfig::default());

        // Shift every class target off its current value.
        let mut request = AllocationRequest::new();
        for class in &summary.asset_classes {
            request = request.with_class(
                class.asset_class.clone(),
                AllocationInput::delta(dec!(12_345.67)).locked(),
            );
        }

        let resolved = resolve(&summary, &request);

        for class in &resolved.classes {
            let securities: Vec<_> = summary.securities_in(&class.entity).collect();
            let subtotal: Decimal = securities.iter().map(|s| s.current_value).sum();
            if subtotal.is_zero() {
                continue;
            }

            for security in securities {
                let target = resolved
                    .security(&security.asset_class, &security.security_name)
                    .unwrap();
                let target_share = to_f64(target.target_value) / to_f64(class.target_value);
                let current_share = to_f64(security.current_value) / to_f64(subtotal);
                assert!(
                    (target_share - current_share).abs() < 1e-9,
                    "seed {seed}: {target_share} vs {current_share}"
                );
            }
        }
    }
}

#[test]
fn property_unlocked_securities_share_remainder_after_locks() {
    for seed in 0..25 {
        let holdings = generate_holdings(40, seed);
        let summary = aggregate(&holdings, &PlanConfig::default());
        let classes = resolve(&summary, &AllocationRequest::new()).classes;

        // Lock the first security of every class at 10% of its class target.
        let mut request = AllocationRequest::new();
        for class in &summary.asset_classes {
            if let Some(first) = summary.securities_in(&class.asset_class).next() {
                request = request.with_security(first.key(), AllocationInput::percent(dec!(10)).locked());
            }
        }

        let targets = resolve_securities(&summary.securities, &classes, &request);

        for class in &classes {
            let in_class: Vec<_> = targets
                .iter()
                .filter(|t| t.entity.asset_class == class.entity)
                .collect();
            let locked: Decimal = in_class
                .iter()
                .filter(|t| t.is_locked())
                .map(|t| t.target_value)
                .sum();
            let unlocked: Vec<_> = in_class.iter().filter(|t| !t.is_locked()).collect();
            let unlocked_subtotal: Decimal = unlocked.iter().map(|t| t.current_value).sum();
            if unlocked.is_empty() || unlocked_subtotal.is_zero() {
                continue;
            }

            let remaining = class.target_value - locked;
            for target in unlocked {
                let lhs = to_f64(target.target_value) / to_f64(remaining);
                let rhs = to_f64(target.current_value) / to_f64(unlocked_subtotal);
                assert!((lhs - rhs).abs() < 1e-9, "seed {seed}: {lhs} vs {rhs}");
            }
        }
    }
}

// =============================================================================
// PROPERTY: DETERMINISM
// =============================================================================

#[test]
fn property_resolution_is_idempotent() {
    for seed in 0..10 {
        let holdings = generate_holdings(25, seed);
        let summary = aggregate(&holdings, &PlanConfig::default());
        let request = AllocationRequest::template(&summary);

        let first = resolve(&summary, &request);
        let second = resolve(&summary, &request);
        assert_eq!(first, second, "seed {seed}");

        let plan_a = rebalance("Client", &holdings, &request, &PlanConfig::default()).unwrap();
        let plan_b = rebalance("Client", &holdings, &request, &PlanConfig::default()).unwrap();
        assert_eq!(plan_a, plan_b, "seed {seed}");
    }
}
