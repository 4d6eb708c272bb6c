//! Repository contracts for saving and loading session state.

use escape_core::GameState;

use super::error::{RepositoryError, Result};

/// Repository for game state persistence and loading
///
/// This is for DYNAMIC data that changes during play. Each session id maps to
/// the latest saved [`GameState`]; static content lives in the catalog.
pub trait StateRepository: Send + Sync {
    /// Save (or overwrite) the state of a session
    fn save(&self, session_id: &str, state: &GameState) -> Result<()>;

    /// Load the state of a session
    fn load(&self, session_id: &str) -> Result<Option<GameState>>;

    /// Check if a session has a saved state
    fn exists(&self, session_id: &str) -> bool;

    /// Delete a session's saved state. Missing sessions are not an error.
    fn delete(&self, session_id: &str) -> Result<()>;

    /// List all saved session ids, sorted
    fn list_sessions(&self) -> Result<Vec<String>>;
}

/// Session ids double as file names, so only `[A-Za-z0-9_-]` is accepted.
pub fn validate_session_id(session_id: &str) -> Result<()> {
    let valid = !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(RepositoryError::InvalidSessionId(session_id.to_owned()))
    }
}
