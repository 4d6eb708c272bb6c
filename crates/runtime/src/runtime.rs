//! High-level runtime orchestrator.
//!
//! The runtime owns the session worker, wires up command/event channels, and
//! exposes a builder-based API for clients to drive a session.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use escape_core::{ContentOracle, GameConfig, GameState};

use crate::api::{Result, RuntimeError, SessionHandle};
use crate::events::EventBus;
use crate::repository::{StateRepository, validate_session_id};
use crate::workers::{Command, SessionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Wall-clock length of one countdown second in timed mini-games.
    pub tick_interval: Duration,
    /// Save to the repository after every action that changed the state.
    pub autosave: bool,
    /// Seed for shuffling mini-game options; `None` seeds from entropy.
    pub shuffle_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
            tick_interval: Duration::from_secs(1),
            autosave: true,
            shuffle_seed: None,
        }
    }
}

/// Main runtime that hosts one game session
///
/// Design: Runtime owns the worker task; [`SessionHandle`] provides a
/// cloneable façade for clients.
pub struct Runtime {
    handle: SessionHandle,
    session_id: String,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this session
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker stops once this and every cloned handle are dropped.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle.await.map_err(RuntimeError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    session_id: String,
    state: Option<GameState>,
    content: Option<Arc<dyn ContentOracle>>,
    repository: Option<Arc<dyn StateRepository>>,
}

impl RuntimeBuilder {
    pub const DEFAULT_SESSION_ID: &'static str = "default";

    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            session_id: Self::DEFAULT_SESSION_ID.to_owned(),
            state: None,
            content: None,
            repository: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Session id used as the repository key
    pub fn session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    /// Provide the initial game state instead of loading or creating one
    pub fn initial_state(mut self, state: GameState) -> Self {
        self.state = Some(state);
        self
    }

    /// Set required game content
    pub fn content(mut self, content: Arc<dyn ContentOracle>) -> Self {
        self.content = Some(content);
        self
    }

    /// Set the state repository (optional; without one `save` fails and
    /// autosave is skipped)
    pub fn repository(mut self, repository: Arc<dyn StateRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Build the runtime
    ///
    /// The initial state is, in order: the one given to
    /// [`initial_state`](Self::initial_state), the session's saved state, or
    /// a fresh state built from the content.
    pub async fn build(self) -> Result<Runtime> {
        let content = self.content.ok_or(RuntimeError::MissingContent)?;
        validate_session_id(&self.session_id)?;

        let initial_state = match self.state {
            Some(state) => state,
            None => {
                let saved = match &self.repository {
                    Some(repository) => repository.load(&self.session_id)?,
                    None => None,
                };
                match saved {
                    Some(state) => {
                        tracing::info!(
                            session = %self.session_id,
                            nonce = state.nonce,
                            "Resuming saved session"
                        );
                        state
                    }
                    None => GameState::from_oracle(content.as_ref()),
                }
            }
        };

        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = SessionHandle::new(command_tx, event_bus.clone());

        let worker = SessionWorker::new(
            self.session_id.clone(),
            initial_state,
            self.config,
            content,
            self.repository,
            command_rx,
            event_bus,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            session_id: self.session_id,
            worker_handle,
        })
    }
}
