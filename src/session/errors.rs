//! Errors returned by session operations.

use thiserror::Error;

/// Every variant leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("option id {id} is not in the catalog ({len} options)")]
    InvalidOptionReference { id: usize, len: usize },

    #[error("slot index {0} is out of range")]
    InvalidSlot(usize),
}

pub type Result<T> = std::result::Result<T, SessionError>;
