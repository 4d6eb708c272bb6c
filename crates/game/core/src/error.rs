//! Common error infrastructure for escape-core.
//!
//! Every rejection in this crate is an expected rule violation (a gated action
//! whose gate is closed, an out-of-range index), never a system fault. The
//! domain-specific errors (`StoreError`, `Room1Error`, `CoreError`,
//! `NavigationError`, `MiniGameError`) live next to the actions they validate
//! and all implement [`GameError`] so hosts can classify them uniformly.

/// Severity level of an error, used for categorization and logging.
///
/// - **Recoverable**: the rule may pass later (room not complete yet, box still shut)
/// - **Validation**: malformed input that will never pass as-is (dial index 9)
/// - **Internal**: the state machine reached a configuration it should not
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same action may succeed after other progress.
    ///
    /// Examples: navigation blocked, core not yet unlocked
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: dial index out of range, core belongs to another room
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// These indicate bugs and should be investigated.
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all escape-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - Error codes are stable identifiers used in logs and tests
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
