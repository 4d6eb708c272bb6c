//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when accessing oracle data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// No content oracle was provided to the environment.
    #[error("ContentOracle not available")]
    ContentNotAvailable,

    /// The oracle has no challenge bound to the requested core.
    #[error("no challenge defined for core '{0}'")]
    ChallengeNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ContentNotAvailable => ErrorSeverity::Internal,
            Self::ChallengeNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ContentNotAvailable => "ORACLE_CONTENT_NOT_AVAILABLE",
            Self::ChallengeNotFound(_) => "ORACLE_CHALLENGE_NOT_FOUND",
        }
    }
}
