//! Error types for portfolio rebalancing.
//!
//! Resolution itself does not fail on numeric inputs; these errors cover an
//! empty snapshot and requests that name entities the holdings do not contain.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PortfolioError {
    /// No holdings to rebalance.
    #[error("Portfolio has no holdings")]
    EmptyPortfolio,

    /// Request references an asset class absent from the holdings.
    #[error("Unknown asset class in request: '{asset_class}'")]
    UnknownAssetClass {
        /// The class label from the request.
        asset_class: String,
    },

    /// Request references a security absent from its class.
    #[error("Unknown security in request: '{security}' in '{asset_class}'")]
    UnknownSecurity {
        /// The class label from the request.
        asset_class: String,
        /// The security name from the request.
        security: String,
    },
}

impl PortfolioError {
    /// Create an unknown asset class error.
    #[must_use]
    pub fn unknown_asset_class(asset_class: impl Into<String>) -> Self {
        Self::UnknownAssetClass {
            asset_class: asset_class.into(),
        }
    }

    /// Create an unknown security error.
    #[must_use]
    pub fn unknown_security(asset_class: impl Into<String>, security: impl Into<String>) -> Self {
        Self::UnknownSecurity {
            asset_class: asset_class.into(),
            security: security.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::EmptyPortfolio;
        assert!(err.to_string().contains("no holdings"));

        let err = PortfolioError::unknown_asset_class("Crypto");
        assert!(err.to_string().contains("Crypto"));

        let err = PortfolioError::unknown_security("Bonds", "XYZ");
        assert!(err.to_string().contains("XYZ"));
        assert!(err.to_string().contains("Bonds"));
    }
}
