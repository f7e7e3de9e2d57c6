//! Allocation consistency warnings.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::PlanConfig;

/// A non-fatal problem with the user's inputs.
///
/// The plan is still computed from the literal formulas; warnings only tell the
/// caller the inputs may need another look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlanWarning {
    /// Asset-class targets add up to more than 100% of the portfolio.
    OverAllocated {
        /// Sum of class targets as a percentage of the portfolio total.
        total_target_pct: f64,
        /// Allowed excess in percentage points.
        tolerance_pct: f64,
    },

    /// Asset-class targets add up to less than 100% of the portfolio.
    UnderAllocated {
        /// Sum of class targets as a percentage of the portfolio total.
        total_target_pct: f64,
        /// Allowed shortfall in percentage points.
        tolerance_pct: f64,
    },
}

impl fmt::Display for PlanWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverAllocated {
                total_target_pct, ..
            } => write!(
                f,
                "Total target allocation is {total_target_pct:.2}%, above 100%"
            ),
            Self::UnderAllocated {
                total_target_pct, ..
            } => write!(
                f,
                "Total target allocation is {total_target_pct:.2}%, below 100%"
            ),
        }
    }
}

/// Checks the asset-class target total against 100%.
///
/// Only over-allocation is reported unless
/// [`PlanConfig::warn_under_allocation`] is set. Security-level sums are not
/// checked.
#[must_use]
pub fn check_allocation_total(total_target_pct: f64, config: &PlanConfig) -> Option<PlanWarning> {
    let tolerance_pct = config.warn_tolerance_pct;

    if total_target_pct > 100.0 + tolerance_pct {
        return Some(PlanWarning::OverAllocated {
            total_target_pct,
            tolerance_pct,
        });
    }

    if config.warn_under_allocation && total_target_pct < 100.0 - tolerance_pct {
        return Some(PlanWarning::UnderAllocated {
            total_target_pct,
            tolerance_pct,
        });
    }

    None
}
