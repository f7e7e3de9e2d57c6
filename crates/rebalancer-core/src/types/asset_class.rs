//! Asset class labels and security identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Default presentation and processing order of asset classes.
pub const CANONICAL_CLASS_ORDER: [&str; 4] = [
    "Cash & Cash Equivalents",
    "Bonds",
    "Canadian Equity",
    "Global Equity",
];

/// A top-level portfolio category such as "Bonds" or "Global Equity".
///
/// Labels are trimmed on construction and may not be blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AssetClass(String);

impl AssetClass {
    /// Creates an asset class from a label, trimming surrounding whitespace.
    pub fn new(label: impl AsRef<str>) -> CoreResult<Self> {
        let trimmed = label.as_ref().trim();
        if trimmed.is_empty() {
            return Err(CoreError::invalid_asset_class(label.as_ref()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the label.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the position of this class in `order`, if listed.
    ///
    /// Entries are trimmed before comparison, like the label itself.
    #[must_use]
    pub fn rank_in<S: AsRef<str>>(&self, order: &[S]) -> Option<usize> {
        order.iter().position(|name| name.as_ref().trim() == self.0)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AssetClass {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AssetClass {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AssetClass> for String {
    fn from(value: AssetClass) -> Self {
        value.0
    }
}

impl AsRef<str> for AssetClass {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifies a security within its asset class.
///
/// The same security name may appear under two classes; each pairing is a
/// separate entity for allocation purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SecurityKey {
    /// Owning asset class.
    pub asset_class: AssetClass,
    /// Security name as it appears in the holdings sheet.
    pub security_name: String,
}

impl SecurityKey {
    /// Creates a new security key.
    #[must_use]
    pub fn new(asset_class: AssetClass, security_name: impl Into<String>) -> Self {
        Self {
            asset_class,
            security_name: security_name.into(),
        }
    }
}

impl fmt::Display for SecurityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.security_name, self.asset_class)
    }
}
