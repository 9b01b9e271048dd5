//! Enhancement slots and the per-slot formulas.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::Slot;
