//! Ledger error types for validation, state, funding, and integrity errors.

use rust_decimal::Decimal;
use thiserror::Error;

use botica_shared::types::{AccountId, GroupId};
use botica_shared::AppError;

use super::transaction::{FundingType, GroupStatus};

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // ========== Validation Errors ==========
    /// A transaction group must have at least 2 entries.
    #[error("Transaction must have at least 2 entries")]
    InsufficientEntries,

    /// An entry amount is zero.
    #[error("Entry {sequence} amount cannot be zero")]
    ZeroAmount {
        /// 1-based position of the offending entry.
        sequence: usize,
    },

    /// An entry amount is negative.
    #[error("Entry {sequence} amount cannot be negative")]
    NegativeAmount {
        /// 1-based position of the offending entry.
        sequence: usize,
    },

    /// All entries are on the same side.
    #[error("Transaction must have both debit and credit entries")]
    SingleSided,

    // ========== Balance Errors ==========
    /// Debits do not equal credits within the 0.01 tolerance.
    #[error("Transaction is not balanced. Debits: {debits}, Credits: {credits}")]
    Unbalanced {
        /// Total debit amount.
        debits: Decimal,
        /// Total credit amount.
        credits: Decimal,
    },

    // ========== Account Errors ==========
    /// An entry references an account that does not exist in the scope.
    #[error("Unknown account: {0}")]
    UnknownAccount(AccountId),

    /// An entry references a deactivated account.
    #[error("Account {0} is deactivated and cannot accept postings")]
    AccountInactive(AccountId),

    // ========== State Errors ==========
    /// The group is no longer editable.
    #[error("Transaction is {status:?} and cannot be modified")]
    Immutable {
        /// The group's current status.
        status: GroupStatus,
    },

    /// The group is already confirmed.
    #[error("Transaction is already confirmed")]
    AlreadyConfirmed,

    /// The group was cancelled and cannot be confirmed.
    #[error("Transaction is cancelled and cannot be confirmed")]
    Cancelled,

    // ========== Funding Errors ==========
    /// The named funding source is not confirmed.
    #[error("Funding source {0} is not confirmed")]
    SourceNotConfirmed(GroupId),

    /// The named funding source's type cannot fund other transactions.
    #[error("Funding source {id} has type {funding_type:?} and cannot fund other transactions")]
    SourceCannotFund {
        /// The source group.
        id: GroupId,
        /// The source's funding type.
        funding_type: FundingType,
    },

    /// The funding source does not have enough unallocated amount.
    ///
    /// The group field is named `source_id` rather than `source` so thiserror
    /// does not infer it as the error's cause chain.
    #[error(
        "Funding source {source_id} has only {available} available, {requested} requested"
    )]
    InsufficientFunding {
        /// The source group.
        source_id: GroupId,
        /// Its remaining unallocated amount.
        available: Decimal,
        /// The amount the new transaction would draw.
        requested: Decimal,
    },

    // ========== Not Found ==========
    /// Transaction group not found.
    #[error("Transaction not found: {0}")]
    GroupNotFound(GroupId),

    // ========== Integrity Errors ==========
    /// Group number generation kept colliding until the retry limit.
    #[error("Group number generation exhausted after {attempts} attempts")]
    NumberRetriesExhausted {
        /// How many candidate numbers were tried.
        attempts: u32,
    },

    /// A funding chain exceeded the depth cap; a true cycle is a
    /// data-integrity bug, not a valid state.
    #[error("Funding chain starting at {start} exceeded {depth} hops")]
    CorruptChain {
        /// The group whose chain was walked.
        start: GroupId,
        /// The depth cap that was hit.
        depth: usize,
    },

    // ========== Concurrency Errors ==========
    /// Concurrent modification detected.
    #[error("Concurrent modification detected, please retry")]
    ConcurrentModification,
}

impl LedgerError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InsufficientEntries => "INSUFFICIENT_ENTRIES",
            Self::ZeroAmount { .. } => "ZERO_AMOUNT",
            Self::NegativeAmount { .. } => "NEGATIVE_AMOUNT",
            Self::SingleSided => "SINGLE_SIDED",
            Self::Unbalanced { .. } => "UNBALANCED_TRANSACTION",
            Self::UnknownAccount(_) => "UNKNOWN_ACCOUNT",
            Self::AccountInactive(_) => "ACCOUNT_INACTIVE",
            Self::Immutable { .. } => "IMMUTABLE_TRANSACTION",
            Self::AlreadyConfirmed => "ALREADY_CONFIRMED",
            Self::Cancelled => "TRANSACTION_CANCELLED",
            Self::SourceNotConfirmed(_) => "SOURCE_NOT_CONFIRMED",
            Self::SourceCannotFund { .. } => "SOURCE_CANNOT_FUND",
            Self::InsufficientFunding { .. } => "INSUFFICIENT_FUNDING",
            Self::GroupNotFound(_) => "TRANSACTION_NOT_FOUND",
            Self::NumberRetriesExhausted { .. } => "NUMBER_RETRIES_EXHAUSTED",
            Self::CorruptChain { .. } => "CORRUPT_FUNDING_CHAIN",
            Self::ConcurrentModification => "CONCURRENT_MODIFICATION",
        }
    }

    /// Returns true if this error signals corrupted data rather than a
    /// caller mistake.
    #[must_use]
    pub const fn is_integrity(&self) -> bool {
        matches!(
            self,
            Self::NumberRetriesExhausted { .. } | Self::CorruptChain { .. }
        )
    }

    /// Returns true if retrying the operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConcurrentModification)
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        let message = err.to_string();
        match err {
            LedgerError::InsufficientEntries
            | LedgerError::ZeroAmount { .. }
            | LedgerError::NegativeAmount { .. }
            | LedgerError::SingleSided
            | LedgerError::AccountInactive(_)
            | LedgerError::SourceNotConfirmed(_)
            | LedgerError::SourceCannotFund { .. }
            | LedgerError::InsufficientFunding { .. } => Self::Validation(message),
            LedgerError::Unbalanced { .. } => Self::Balance(message),
            LedgerError::Immutable { .. }
            | LedgerError::AlreadyConfirmed
            | LedgerError::Cancelled => Self::State(message),
            LedgerError::UnknownAccount(_) | LedgerError::GroupNotFound(_) => {
                Self::NotFound(message)
            }
            LedgerError::NumberRetriesExhausted { .. } | LedgerError::CorruptChain { .. } => {
                Self::Integrity(message)
            }
            LedgerError::ConcurrentModification => Self::Conflict(message),
        }
    }
}
