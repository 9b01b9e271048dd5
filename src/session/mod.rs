//! Crafting session: the state machine over slots, materials and the formula log.

pub mod errors;
pub mod logic;
pub mod materials;
pub mod penalty;
pub mod persistence;
pub mod types;

pub use errors::{Result, SessionError};
pub use logic::Session;
pub use materials::{
    material_warnings, EfficiencySuggestion, MaterialBudget, MaterialEfficiency, MaterialWarning,
    Severity,
};
pub use penalty::penalty_multiplier;
pub use persistence::{
    clear_saved_session, load_saved_session, restore_session, save_session, should_save_on_exit,
    SavedSession,
};
pub use types::*;
