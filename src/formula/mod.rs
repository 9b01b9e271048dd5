//! Formula log: committed step history for undo, redo and display.

pub mod logic;
pub mod types;

pub use logic::FormulaLog;
pub use types::*;
