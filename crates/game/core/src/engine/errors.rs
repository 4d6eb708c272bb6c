//! Error types for action execution pipeline.

use crate::action::{ActionTransition, CoreAction, Room1Action, Room3Action, StoreAction};
use crate::error::{ErrorSeverity, GameError};
use crate::navigation::NavigationAction;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("store action failed: {0}")]
    Store(TransitionPhaseError<<StoreAction as ActionTransition>::Error>),

    #[error("room 1 action failed: {0}")]
    Room1(TransitionPhaseError<<Room1Action as ActionTransition>::Error>),

    #[error("core action failed: {0}")]
    Core(TransitionPhaseError<<CoreAction as ActionTransition>::Error>),

    #[error("room 3 action failed: {0}")]
    Room3(TransitionPhaseError<<Room3Action as ActionTransition>::Error>),

    #[error("navigation failed: {0}")]
    Navigation(TransitionPhaseError<<NavigationAction as ActionTransition>::Error>),
}

impl ExecuteError {
    /// Pipeline phase that rejected the action.
    pub fn phase(&self) -> TransitionPhase {
        match self {
            Self::Store(e) => e.phase,
            Self::Room1(e) => e.phase,
            Self::Core(e) => e.phase,
            Self::Room3(e) => e.phase,
            Self::Navigation(e) => e.phase,
        }
    }

    /// The navigation error, when the gate rejected the action.
    pub fn as_navigation(&self) -> Option<&<NavigationAction as ActionTransition>::Error> {
        match self {
            Self::Navigation(e) => Some(&e.error),
            _ => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Store(e) => e.error.severity(),
            Self::Room1(e) => e.error.severity(),
            Self::Core(e) => e.error.severity(),
            Self::Room3(e) => e.error.severity(),
            Self::Navigation(e) => e.error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Store(e) => e.error.error_code(),
            Self::Room1(e) => e.error.error_code(),
            Self::Core(e) => e.error.error_code(),
            Self::Room3(e) => e.error.error_code(),
            Self::Navigation(e) => e.error.error_code(),
        }
    }
}
