//! Domain types for portfolio rebalancing.
//!
//! - [`Holding`]: A single parsed holdings row
//! - [`AssetClass`]: A validated asset class label
//! - [`SecurityKey`]: Identifies a security within its asset class
//! - [`AllocationInput`]: A user-supplied target for one entity

mod allocation;
mod asset_class;
mod holding;

pub use allocation::{AllocationInput, AllocationMethod, AllocationTarget};
pub use asset_class::{AssetClass, SecurityKey, CANONICAL_CLASS_ORDER};
pub use holding::Holding;
