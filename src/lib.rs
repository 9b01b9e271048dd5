//! fillstat - fill stat crafting simulator library
//!
//! This module exposes the engine for testing and for the terminal front end.

pub mod build_info;
pub mod catalog;
pub mod cli;
pub mod core;
pub mod formula;
pub mod session;
pub mod slot;
pub mod utils;

pub use catalog::{Catalog, ItemKind};
pub use session::{Session, SessionConfig, SessionError, SessionState, Snapshot};
