//! Application-wide error taxonomy.
//!
//! Every module-level error in the core crate converts into one of these
//! variants at the call boundary, so callers can distinguish "user made a
//! mistake" (validation, balance, state) from "the ledger is inconsistent"
//! (integrity).

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error taxonomy.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input shape: missing account, negative amount, too few entries.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Debits do not equal credits.
    #[error("Balance error: {0}")]
    Balance(String),

    /// Operation not permitted in the record's current lifecycle state.
    #[error("State error: {0}")]
    State(String),

    /// Unknown account, transaction, or scope.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Generated code/number retries exhausted or a corrupt funding chain.
    /// Signals corrupted data, not user error.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Duplicate account name/code under concurrent creation.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Balance(_) => "BALANCE_ERROR",
            Self::State(_) => "STATE_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Integrity(_) => "INTEGRITY_ERROR",
            Self::Conflict(_) => "CONFLICT",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if this error signals inconsistent ledger data and
    /// should be surfaced to operators rather than end users.
    #[must_use]
    pub const fn is_integrity_alert(&self) -> bool {
        matches!(self, Self::Integrity(_) | Self::Internal(_))
    }
}
