//! In-memory StateRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use escape_core::GameState;

use super::error::{RepositoryError, Result};
use super::traits::{StateRepository, validate_session_id};

/// In-memory implementation of StateRepository.
///
/// Nothing survives the process; used when persistence is disabled and in tests.
pub struct InMemoryStateRepo {
    states: RwLock<HashMap<String, GameState>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            states: RwLock::new(HashMap::new()),
        }
    }

    /// Create with one session already saved.
    pub fn with_session(session_id: impl Into<String>, state: GameState) -> Self {
        let mut states = HashMap::new();
        states.insert(session_id.into(), state);
        Self {
            states: RwLock::new(states),
        }
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn save(&self, session_id: &str, state: &GameState) -> Result<()> {
        validate_session_id(session_id)?;
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.insert(session_id.to_owned(), state.clone());
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<GameState>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(states.get(session_id).cloned())
    }

    fn exists(&self, session_id: &str) -> bool {
        self.states
            .read()
            .map(|states| states.contains_key(session_id))
            .unwrap_or(false)
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let mut states = self
            .states
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        states.remove(session_id);
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let states = self
            .states
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut sessions: Vec<String> = states.keys().cloned().collect();
        sessions.sort_unstable();
        Ok(sessions)
    }
}
