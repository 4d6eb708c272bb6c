//! Traits describing read-only game content.
//!
//! The [`ContentOracle`] exposes the knowledge codex, item records, mini-game
//! challenges and room metadata. [`GameEnv`] hands it to transitions so the
//! engine never couples to a concrete catalog.
mod content;
mod error;

pub use content::{ContentOracle, RoomInfo};
pub use error::OracleError;

use crate::state::ItemRecord;

/// Read-only environment passed to every transition.
#[derive(Clone, Copy, Default)]
pub struct GameEnv<'a> {
    content: Option<&'a dyn ContentOracle>,
}

impl<'a> GameEnv<'a> {
    pub fn new(content: Option<&'a dyn ContentOracle>) -> Self {
        Self { content }
    }

    pub fn with_content(content: &'a dyn ContentOracle) -> Self {
        Self::new(Some(content))
    }

    pub fn empty() -> Self {
        Self { content: None }
    }

    /// Returns the ContentOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ContentNotAvailable` if no content oracle was provided.
    pub fn content(&self) -> Result<&'a dyn ContentOracle, OracleError> {
        self.content.ok_or(OracleError::ContentNotAvailable)
    }

    /// Item record for `id` from the content oracle, or a bare record carrying
    /// only the id when no oracle (or no definition) is available.
    pub fn item_record(&self, id: &str) -> ItemRecord {
        self.content
            .and_then(|content| content.item(id))
            .unwrap_or_else(|| ItemRecord::bare(id))
    }
}

impl core::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GameEnv")
            .field("content", &self.content.is_some())
            .finish()
    }
}
