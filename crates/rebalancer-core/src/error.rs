//! Error types for the Rebalancer core types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing core domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Asset class label was blank after trimming.
    #[error("Invalid asset class label: '{label}'")]
    InvalidAssetClass {
        /// The rejected label.
        label: String,
    },

    /// Unrecognized allocation method name.
    #[error("Invalid allocation method: '{value}' (expected percent, absolute_dollar or delta_dollar)")]
    InvalidMethod {
        /// The rejected method text.
        value: String,
    },
}

impl CoreError {
    /// Create an invalid asset class error.
    #[must_use]
    pub fn invalid_asset_class(label: impl Into<String>) -> Self {
        Self::InvalidAssetClass {
            label: label.into(),
        }
    }

    /// Create an invalid method error.
    #[must_use]
    pub fn invalid_method(value: impl Into<String>) -> Self {
        Self::InvalidMethod {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_asset_class("   ");
        assert!(err.to_string().contains("asset class"));

        let err = CoreError::invalid_method("pct");
        assert!(err.to_string().contains("pct"));
        assert!(err.to_string().contains("delta_dollar"));
    }
}
