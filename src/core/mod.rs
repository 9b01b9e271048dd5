//! Constants and numeric helpers shared by the slot and session engines.

pub mod constants;
pub mod decimal;
pub mod math;

pub use constants::*;
pub use decimal::Decimal;
pub use math::*;
