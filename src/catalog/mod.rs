//! Enhancement catalog: option definitions and the bundled table.

pub mod data;
pub mod types;

pub use data::default_catalog;
pub use types::*;
