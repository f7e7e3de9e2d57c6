//! Target resolution for asset classes and securities.

use rebalancer_core::math::{mul_div, saturating_sum};
use rebalancer_core::AllocationInput;
use rust_decimal::Decimal;
use tracing::debug;

use super::{ClassTarget, ResolvedAllocation, ResolvedTarget, SecurityTarget, TargetBasis};
use crate::aggregation::{AssetClassSummary, PortfolioSummary, SecuritySummary};
use crate::types::AllocationRequest;

/// Resolves both tiers for one snapshot.
///
/// Pure: identical `(summary, request)` pairs always yield identical targets.
#[must_use]
pub fn resolve(summary: &PortfolioSummary, request: &AllocationRequest) -> ResolvedAllocation {
    let classes = resolve_asset_classes(&summary.asset_classes, summary.total_value, request);
    let securities = resolve_securities(&summary.securities, &classes, request);

    ResolvedAllocation {
        classes,
        securities,
    }
}

/// Resolves asset-class targets against the portfolio total.
///
/// Locked classes resolve their input against `total_value`. The value left
/// after locked targets is split evenly across unlocked classes, regardless
/// of their current size. With no unlocked classes the remainder stays
/// unassigned and the class targets may not add up to `total_value`.
#[must_use]
pub fn resolve_asset_classes(
    classes: &[AssetClassSummary],
    total_value: Decimal,
    request: &AllocationRequest,
) -> Vec<ClassTarget> {
    let inputs: Vec<AllocationInput> = classes
        .iter()
        .map(|c| request.class_input(&c.asset_class))
        .collect();

    let locked_total = saturating_sum(
        classes
            .iter()
            .zip(&inputs)
            .filter(|(_, input)| input.locked)
            .map(|(c, input)| input.target.resolve(total_value, c.current_value)),
    );

    let unlocked_count = inputs.iter().filter(|input| !input.locked).count();
    let remaining = total_value.saturating_sub(locked_total);

    let even_share = if unlocked_count == 0 {
        debug!(%remaining, "all asset classes locked; remainder left unassigned");
        Decimal::ZERO
    } else {
        remaining / Decimal::from(unlocked_count)
    };

    classes
        .iter()
        .zip(&inputs)
        .map(|(c, input)| {
            if input.locked {
                let target = input.target.resolve(total_value, c.current_value);
                ResolvedTarget::new(c.asset_class.clone(), c.current_value, target, TargetBasis::Locked)
            } else {
                ResolvedTarget::new(
                    c.asset_class.clone(),
                    c.current_value,
                    even_share,
                    TargetBasis::EvenSplit,
                )
            }
        })
        .collect()
}

/// Resolves security targets within each class against the class target.
///
/// Locked securities resolve their input with the class target as the
/// percentage base. The class remainder is split across unlocked securities
/// in proportion to their share of the unlocked current value. If that
/// unlocked value is zero, unlocked securities are left at zero.
#[must_use]
pub fn resolve_securities(
    securities: &[SecuritySummary],
    class_targets: &[ClassTarget],
    request: &AllocationRequest,
) -> Vec<SecurityTarget> {
    let mut result = Vec::with_capacity(securities.len());

    for class_target in class_targets {
        let asset_class = &class_target.entity;
        let class_value = class_target.target_value;

        let members: Vec<(&SecuritySummary, AllocationInput)> = securities
            .iter()
            .filter(|s| &s.asset_class == asset_class)
            .map(|s| (s, request.security_input(asset_class, &s.security_name)))
            .collect();

        let locked_total = saturating_sum(
            members
                .iter()
                .filter(|(_, input)| input.locked)
                .map(|(s, input)| input.target.resolve(class_value, s.current_value)),
        );

        let unlocked_subtotal = saturating_sum(
            members
                .iter()
                .filter(|(_, input)| !input.locked)
                .map(|(s, _)| s.current_value),
        );

        let remaining = class_value.saturating_sub(locked_total);
        let has_unlocked = members.iter().any(|(_, input)| !input.locked);

        if has_unlocked && unlocked_subtotal.is_zero() {
            debug!(
                asset_class = %asset_class,
                %remaining,
                "unlocked securities hold no value; remainder left unassigned"
            );
        }

        for (s, input) in members {
            let target = if input.locked {
                ResolvedTarget::new(
                    s.key(),
                    s.current_value,
                    input.target.resolve(class_value, s.current_value),
                    TargetBasis::Locked,
                )
            } else if unlocked_subtotal.is_zero() {
                ResolvedTarget::new(s.key(), s.current_value, Decimal::ZERO, TargetBasis::Unallocated)
            } else {
                ResolvedTarget::new(
                    s.key(),
                    s.current_value,
                    mul_div(remaining, s.current_value, unlocked_subtotal),
                    TargetBasis::Proportional,
                )
            };
            result.push(target);
        }
    }

    result
}
