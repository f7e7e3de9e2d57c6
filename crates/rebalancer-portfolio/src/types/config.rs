//! Configuration for plan computation.

use rebalancer_core::CANONICAL_CLASS_ORDER;
use serde::{Deserialize, Serialize};

/// Configuration for plan computation.
///
/// Controls asset class ordering and when the allocation-total warning fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Asset classes in presentation order.
    /// Classes not listed follow in alphabetical order.
    pub class_order: Vec<String>,

    /// Percentage points the total target may exceed 100% before a warning.
    pub warn_tolerance_pct: f64,

    /// Also warn when the total target falls short of 100% by more than the tolerance.
    pub warn_under_allocation: bool,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            class_order: CANONICAL_CLASS_ORDER.iter().map(|s| (*s).to_string()).collect(),
            warn_tolerance_pct: 0.5,
            warn_under_allocation: false,
        }
    }
}

impl PlanConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the class order.
    #[must_use]
    pub fn with_class_order<S: Into<String>>(mut self, order: impl IntoIterator<Item = S>) -> Self {
        self.class_order = order.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the warning tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance_pct: f64) -> Self {
        self.warn_tolerance_pct = tolerance_pct;
        self
    }

    /// Sets whether under-allocation is reported.
    #[must_use]
    pub fn with_under_allocation_warning(mut self, enabled: bool) -> Self {
        self.warn_under_allocation = enabled;
        self
    }
}
