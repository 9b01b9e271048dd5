//! Autosave of the active session to ~/.fillstat/session.json.

use std::io;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::logic::Session;
use super::types::Snapshot;
use crate::catalog::Catalog;
use crate::core::constants::SESSION_SAVE_FILE;
use crate::utils::persistence::{load_json, remove_json, save_json};

/// On-disk autosave wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    /// Unix timestamp (seconds)
    pub saved_at: i64,
    pub snapshot: Snapshot,
}

impl SavedSession {
    pub fn new(session: &Session) -> Self {
        Self {
            saved_at: chrono::Utc::now().timestamp(),
            snapshot: session.snapshot(),
        }
    }

    /// `YYYY-MM-DD HH:MM` in UTC, or "unknown" for an invalid timestamp.
    pub fn saved_at_display(&self) -> String {
        chrono::DateTime::from_timestamp(self.saved_at, 0)
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

pub fn save_session(session: &Session) -> io::Result<()> {
    save_json(SESSION_SAVE_FILE, &SavedSession::new(session))?;
    debug!(steps = session.formula().len(), "session autosaved");
    Ok(())
}

/// Whether quitting should write the autosave. A fresh session that was
/// never edited must not replace an earlier save.
pub fn should_save_on_exit(session: &Session, edited: bool) -> bool {
    edited || !session.formula().is_empty()
}

pub fn load_saved_session() -> Option<SavedSession> {
    load_json(SESSION_SAVE_FILE)
}

/// Rebuilds the autosaved session. A missing, corrupt or
/// unreplayable save yields `None`.
pub fn restore_session(catalog: Arc<Catalog>) -> Option<Session> {
    let saved = load_saved_session()?;
    match Session::auto_load(catalog, saved.snapshot) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(error = %e, "discarding autosave that cannot be replayed");
            None
        }
    }
}

pub fn clear_saved_session() -> io::Result<()> {
    remove_json(SESSION_SAVE_FILE)
}
