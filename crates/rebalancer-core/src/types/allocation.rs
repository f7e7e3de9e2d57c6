//! Allocation inputs.
//!
//! Every asset class and security accepts a `(method, value, locked)` triple.
//! The method and value travel together as an [`AllocationTarget`] so the three
//! target formulas are matched exhaustively.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};
use crate::math::mul_div;

/// How an entity's target value is expressed.
///
/// Deserializes through [`FromStr`], so request files accept the same
/// case-insensitive names and form symbols (`%`, `$`, `$ Δ`) as `parse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum AllocationMethod {
    /// Percentage of the total being distributed.
    #[default]
    Percent,

    /// Absolute dollar amount.
    AbsoluteDollar,

    /// Dollar change from the current value.
    DeltaDollar,
}

impl AllocationMethod {
    /// Returns the serialized name.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Percent => "percent",
            Self::AbsoluteDollar => "absolute_dollar",
            Self::DeltaDollar => "delta_dollar",
        }
    }
}

impl fmt::Display for AllocationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for AllocationMethod {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        value.parse()
    }
}

impl FromStr for AllocationMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percent" | "pct" | "%" => Ok(Self::Percent),
            "absolute_dollar" | "dollar" | "dollars" | "$" => Ok(Self::AbsoluteDollar),
            "delta_dollar" | "delta" | "$ Δ" | "$Δ" => Ok(Self::DeltaDollar),
            _ => Err(CoreError::invalid_method(s)),
        }
    }
}

/// A target expressed in one of the three supported ways.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationTarget {
    /// Percentage (0-100 scale) of the total being distributed.
    Percent(Decimal),
    /// Absolute target value.
    AbsoluteDollar(Decimal),
    /// Change applied to the current value.
    DeltaDollar(Decimal),
}

impl AllocationTarget {
    /// Builds a target from a method and its numeric value.
    #[must_use]
    pub fn new(method: AllocationMethod, value: Decimal) -> Self {
        match method {
            AllocationMethod::Percent => Self::Percent(value),
            AllocationMethod::AbsoluteDollar => Self::AbsoluteDollar(value),
            AllocationMethod::DeltaDollar => Self::DeltaDollar(value),
        }
    }

    /// Returns the method of this target.
    #[must_use]
    pub fn method(&self) -> AllocationMethod {
        match self {
            Self::Percent(_) => AllocationMethod::Percent,
            Self::AbsoluteDollar(_) => AllocationMethod::AbsoluteDollar,
            Self::DeltaDollar(_) => AllocationMethod::DeltaDollar,
        }
    }

    /// Returns the raw numeric value as entered.
    #[must_use]
    pub fn value(&self) -> Decimal {
        match self {
            Self::Percent(v) | Self::AbsoluteDollar(v) | Self::DeltaDollar(v) => *v,
        }
    }

    /// Computes the dollar target.
    ///
    /// `base_total` is what a percentage applies to (the portfolio total for an
    /// asset class, the class target for a security). `current` is the entity's
    /// current value. No sign or range checks are applied; results beyond the
    /// `Decimal` range clamp at its bounds.
    #[must_use]
    pub fn resolve(&self, base_total: Decimal, current: Decimal) -> Decimal {
        match self {
            Self::Percent(pct) => mul_div(base_total, *pct, Decimal::ONE_HUNDRED),
            Self::AbsoluteDollar(amount) => *amount,
            Self::DeltaDollar(delta) => current.saturating_add(*delta),
        }
    }
}

impl Default for AllocationTarget {
    fn default() -> Self {
        Self::Percent(Decimal::ZERO)
    }
}

/// A user-supplied target for one asset class or security.
///
/// Serialized as `{ "method": ..., "value": ..., "locked": ... }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawAllocationInput", into = "RawAllocationInput")]
pub struct AllocationInput {
    /// The requested target.
    pub target: AllocationTarget,
    /// When true the target is honored directly; otherwise the entity absorbs
    /// a share of the remaining value.
    pub locked: bool,
}

impl AllocationInput {
    /// Creates an unlocked input.
    #[must_use]
    pub fn new(target: AllocationTarget) -> Self {
        Self {
            target,
            locked: false,
        }
    }

    /// Unlocked percentage input.
    #[must_use]
    pub fn percent(value: Decimal) -> Self {
        Self::new(AllocationTarget::Percent(value))
    }

    /// Unlocked absolute dollar input.
    #[must_use]
    pub fn dollars(value: Decimal) -> Self {
        Self::new(AllocationTarget::AbsoluteDollar(value))
    }

    /// Unlocked dollar-change input.
    #[must_use]
    pub fn delta(value: Decimal) -> Self {
        Self::new(AllocationTarget::DeltaDollar(value))
    }

    /// Marks the input as locked.
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

}

/// Wire form of [`AllocationInput`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RawAllocationInput {
    #[serde(default)]
    method: AllocationMethod,
    #[serde(default)]
    value: Decimal,
    #[serde(default)]
    locked: bool,
}

impl From<RawAllocationInput> for AllocationInput {
    fn from(raw: RawAllocationInput) -> Self {
        Self {
            target: AllocationTarget::new(raw.method, raw.value),
            locked: raw.locked,
        }
    }
}

impl From<AllocationInput> for RawAllocationInput {
    fn from(input: AllocationInput) -> Self {
        Self {
            method: input.target.method(),
            value: input.target.value(),
            locked: input.locked,
        }
    }
}
