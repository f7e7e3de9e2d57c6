//! Two-tier allocation resolution.
//!
//! - **Asset-class tier**: locked classes take their input target against the
//!   portfolio total; unlocked classes share the remainder evenly.
//! - **Security tier**: within each class, locked securities take their input
//!   target against the class target; unlocked securities share the class
//!   remainder in proportion to their current market value.
//!
//! Neither tier fails. Zero divisors leave the affected targets at zero with
//! [`TargetBasis::Unallocated`].

mod resolver;
mod target;

pub use resolver::*;
pub use target::*;
