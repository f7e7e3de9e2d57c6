//! Request and configuration types.
//!
//! - [`AllocationRequest`]: Allocation inputs keyed by asset class and security
//! - [`PlanConfig`]: Class ordering and warning thresholds

mod config;
mod request;

pub use config::PlanConfig;
pub use request::AllocationRequest;
