//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use escape_core::{GameConfig, Language};
use escape_runtime::{FileStateRepository, RuntimeConfig, StateRepository};

/// Configuration required to bootstrap a session and the REPL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub session_id: String,
    pub enable_persistence: bool,
    /// Directory for save files. `None` when no platform data dir exists.
    pub save_dir: Option<PathBuf>,
    /// Language forced at startup. `None` keeps whatever the save holds.
    pub language: Option<Language>,
    pub transition_delay_ms: Option<u64>,
    /// Directory with `knowledge.ron`, `items.ron`, ... replacing the bundled content.
    pub content_dir: Option<PathBuf>,
    /// Directory for `client.log`. File logging is off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            session_id: Self::DEFAULT_SESSION_ID.to_owned(),
            enable_persistence: true,
            save_dir: default_save_dir(),
            language: None,
            transition_delay_ms: None,
            content_dir: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_SESSION_ID: &'static str = "default";

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ESCAPE_SESSION_ID` - Save slot name (default: `default`)
    /// - `ESCAPE_PERSISTENCE` - Save progress to disk (default: true)
    /// - `ESCAPE_SAVE_DIR` - Directory for save files (default: platform-specific)
    /// - `ESCAPE_LANGUAGE` - `en` or `vi`
    /// - `ESCAPE_TRANSITION_DELAY_MS` - Room transition delay (default: 500)
    /// - `ESCAPE_CONTENT_DIR` - Load content from this directory instead of the bundled files
    /// - `ESCAPE_LOG_DIR` - Also write logs to `client.log` in this directory
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(session_id) = lookup("ESCAPE_SESSION_ID").filter(|id| !id.trim().is_empty()) {
            config.session_id = session_id.trim().to_owned();
        }

        // Accept a bare `ESCAPE_PERSISTENCE=` as "on".
        if let Some(raw) = lookup("ESCAPE_PERSISTENCE") {
            config.enable_persistence = parse_flag(&raw).unwrap_or(true);
        }

        if let Some(dir) = lookup("ESCAPE_SAVE_DIR") {
            config.save_dir = Some(PathBuf::from(dir));
        }

        config.language = read_var::<Language, _>(&lookup, "ESCAPE_LANGUAGE");
        config.transition_delay_ms = read_var::<u64, _>(&lookup, "ESCAPE_TRANSITION_DELAY_MS");
        config.content_dir = lookup("ESCAPE_CONTENT_DIR").map(PathBuf::from);
        config.log_dir = lookup("ESCAPE_LOG_DIR").map(PathBuf::from);

        config
    }

    /// Applies the overrides on top of `base` (usually the loaded `config.toml`).
    pub fn game_config(&self, base: GameConfig) -> GameConfig {
        GameConfig {
            transition_delay_ms: self.transition_delay_ms.unwrap_or(base.transition_delay_ms),
            ..base
        }
    }

    /// Save backend for the session, or `None` when progress is not kept.
    ///
    /// Without a repository the runtime skips autosave and rejects `save`.
    pub fn open_repository(&self) -> anyhow::Result<Option<Arc<dyn StateRepository>>> {
        if !self.enable_persistence {
            return Ok(None);
        }
        let Some(dir) = &self.save_dir else {
            tracing::warn!("No save directory available; progress will not be kept");
            return Ok(None);
        };
        tracing::info!("Save directory: {}", dir.display());
        Ok(Some(Arc::new(FileStateRepository::new(dir)?)))
    }

    pub fn runtime_config(&self, base: GameConfig) -> RuntimeConfig {
        RuntimeConfig {
            game_config: self.game_config(base),
            autosave: self.enable_persistence,
            ..RuntimeConfig::default()
        }
    }
}

fn default_save_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "great-transition")
        .map(|dirs| dirs.data_dir().join("saves"))
}

fn read_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
