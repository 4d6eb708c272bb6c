//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the engine, the mini-game state machine, worker
//! coordination and repositories so clients can bubble them up with
//! consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use escape_core::{
    CoreId, ErrorSeverity, ExecuteError, GameError, MiniGameError, NavigationError, OracleError,
};

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error(transparent)]
    MiniGame(#[from] MiniGameError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("no mini-game is open")]
    NoActiveMiniGame,

    #[error("a mini-game for {core} is still running")]
    MiniGameAlreadyOpen { core: CoreId },

    #[error("session worker command channel closed")]
    CommandChannelClosed,

    #[error("session worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("session worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires content to be configured before building")]
    MissingContent,

    #[error("no state repository configured")]
    PersistenceDisabled,
}

impl RuntimeError {
    /// The navigation gate's rejection, if that is what this error is.
    pub fn as_navigation(&self) -> Option<&NavigationError> {
        match self {
            Self::Execute(error) => error.as_navigation(),
            _ => None,
        }
    }
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Execute(e) => e.severity(),
            Self::MiniGame(e) => e.severity(),
            Self::Oracle(e) => e.severity(),
            Self::NoActiveMiniGame | Self::MiniGameAlreadyOpen { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::PersistenceDisabled => ErrorSeverity::Validation,
            Self::CommandChannelClosed
            | Self::ReplyChannelClosed(_)
            | Self::WorkerJoin(_)
            | Self::Repository(_)
            | Self::MissingContent => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Execute(e) => e.error_code(),
            Self::MiniGame(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
            Self::NoActiveMiniGame => "RUNTIME_NO_ACTIVE_MINIGAME",
            Self::MiniGameAlreadyOpen { .. } => "RUNTIME_MINIGAME_ALREADY_OPEN",
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::Repository(_) => "RUNTIME_REPOSITORY",
            Self::MissingContent => "RUNTIME_MISSING_CONTENT",
            Self::PersistenceDisabled => "RUNTIME_PERSISTENCE_DISABLED",
        }
    }
}
