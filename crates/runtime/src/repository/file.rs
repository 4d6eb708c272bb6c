//! File-based StateRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use escape_core::GameState;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::{RepositoryError, Result};
use super::traits::{StateRepository, validate_session_id};

const SAVE_VERSION: u32 = 1;

/// On-disk envelope around a saved state.
///
/// `checksum` is the hex SHA-256 of the compact JSON encoding of `state`, so a
/// hand-edited or truncated save is reported instead of silently loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub session_id: String,
    pub saved_at: DateTime<Utc>,
    pub nonce: u64,
    pub checksum: String,
    pub state: GameState,
}

impl SaveFile {
    fn new(session_id: &str, state: &GameState) -> Result<Self> {
        Ok(Self {
            version: SAVE_VERSION,
            session_id: session_id.to_owned(),
            saved_at: Utc::now(),
            nonce: state.nonce,
            checksum: state_checksum(state)?,
            state: state.clone(),
        })
    }

    fn verify(&self) -> Result<()> {
        if self.version != SAVE_VERSION {
            return Err(RepositoryError::UnsupportedVersion {
                found: self.version,
                expected: SAVE_VERSION,
            });
        }
        let actual = state_checksum(&self.state)?;
        if actual != self.checksum {
            return Err(RepositoryError::CorruptedData(format!(
                "checksum mismatch for session '{}'",
                self.session_id
            )));
        }
        Ok(())
    }
}

fn state_checksum(state: &GameState) -> Result<String> {
    let bytes = serde_json::to_vec(state).map_err(|e| RepositoryError::Json(e.to_string()))?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// File-based implementation of StateRepository.
///
/// Stores one pretty-printed JSON file per session (`{session_id}.json`).
/// Writes go to a temp file first and are renamed into place.
pub struct FileStateRepository {
    base_dir: PathBuf,
}

impl FileStateRepository {
    /// Create a new file-based state repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir).map_err(RepositoryError::Io)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a session file.
    fn session_path(&self, session_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", session_id))
    }

    /// Reads the full envelope, including save metadata.
    pub fn load_save_file(&self, session_id: &str) -> Result<Option<SaveFile>> {
        validate_session_id(session_id)?;
        let path = self.session_path(session_id);

        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path).map_err(RepositoryError::Io)?;
        let save: SaveFile =
            serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))?;
        save.verify()?;

        tracing::debug!("Loaded session '{}' from {}", session_id, path.display());

        Ok(Some(save))
    }
}

impl StateRepository for FileStateRepository {
    fn save(&self, session_id: &str, state: &GameState) -> Result<()> {
        validate_session_id(session_id)?;
        let path = self.session_path(session_id);
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(&SaveFile::new(session_id, state)?)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;

        // Write to temp file
        fs::write(&temp_path, json).map_err(RepositoryError::Io)?;

        // Atomic rename
        fs::rename(&temp_path, &path).map_err(RepositoryError::Io)?;

        tracing::debug!(
            "Saved session '{}' (nonce {}) to {}",
            session_id,
            state.nonce,
            path.display()
        );

        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<GameState>> {
        Ok(self.load_save_file(session_id)?.map(|save| save.state))
    }

    fn exists(&self, session_id: &str) -> bool {
        validate_session_id(session_id).is_ok() && self.session_path(session_id).exists()
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        validate_session_id(session_id)?;
        let path = self.session_path(session_id);

        if path.exists() {
            fs::remove_file(&path).map_err(RepositoryError::Io)?;
            tracing::debug!("Deleted session '{}'", session_id);
        }

        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let mut sessions = Vec::new();

        let entries = fs::read_dir(&self.base_dir).map_err(RepositoryError::Io)?;

        for entry in entries {
            let entry = entry.map_err(RepositoryError::Io)?;
            let path = entry.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(session_id) = filename.strip_suffix(".json")
                && validate_session_id(session_id).is_ok()
            {
                sessions.push(session_id.to_owned());
            }
        }

        sessions.sort_unstable();
        Ok(sessions)
    }
}
