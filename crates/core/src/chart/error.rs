//! Error types for chart of accounts operations.

use thiserror::Error;

use botica_shared::types::AccountId;
use botica_shared::AppError;

/// Errors that can occur during chart of accounts operations.
#[derive(Debug, Error)]
pub enum ChartError {
    /// An active account with this name already exists in the scope.
    #[error("An active account named '{0}' already exists in this scope")]
    DuplicateName(String),

    /// The account code already exists in the scope.
    #[error("Account code '{0}' already exists in this scope")]
    DuplicateCode(String),

    /// The parent does not resolve to an active account in the same scope.
    #[error("Invalid parent account: {0}")]
    InvalidParent(AccountId),

    /// The account has active children and cannot be deactivated.
    #[error("Account {0} has active children and cannot be deactivated")]
    HasChildren(AccountId),

    /// The account is deactivated.
    #[error("Account {0} is deactivated")]
    Deactivated(AccountId),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(AccountId),

    /// The code block for a type prefix is full.
    #[error("Account code space exhausted for prefix '{prefix}'")]
    CodeSpaceExhausted {
        /// The type's leading code digit.
        prefix: char,
    },

    /// Code generation kept colliding until the retry limit.
    #[error("Account code generation exhausted after {attempts} attempts")]
    CodeRetriesExhausted {
        /// How many candidate codes were tried.
        attempts: u32,
    },
}

impl ChartError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "DUPLICATE_NAME",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::InvalidParent(_) => "INVALID_PARENT",
            Self::HasChildren(_) => "HAS_CHILDREN",
            Self::Deactivated(_) => "ACCOUNT_DEACTIVATED",
            Self::NotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::CodeSpaceExhausted { .. } => "CODE_SPACE_EXHAUSTED",
            Self::CodeRetriesExhausted { .. } => "CODE_RETRIES_EXHAUSTED",
        }
    }

    /// Returns true if this error signals corrupted data rather than a
    /// caller mistake.
    #[must_use]
    pub const fn is_integrity(&self) -> bool {
        matches!(
            self,
            Self::CodeSpaceExhausted { .. } | Self::CodeRetriesExhausted { .. }
        )
    }
}

impl From<ChartError> for AppError {
    fn from(err: ChartError) -> Self {
        let message = err.to_string();
        match err {
            ChartError::DuplicateName(_) | ChartError::DuplicateCode(_) => Self::Conflict(message),
            ChartError::InvalidParent(_) => Self::Validation(message),
            ChartError::HasChildren(_) | ChartError::Deactivated(_) => Self::State(message),
            ChartError::NotFound(_) => Self::NotFound(message),
            ChartError::CodeSpaceExhausted { .. } | ChartError::CodeRetriesExhausted { .. } => {
                Self::Integrity(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            ChartError::DuplicateName("Cash".into()).error_code(),
            "DUPLICATE_NAME"
        );
        assert_eq!(
            ChartError::CodeRetriesExhausted { attempts: 5 }.error_code(),
            "CODE_RETRIES_EXHAUSTED"
        );
    }

    #[test]
    fn test_integrity_classification() {
        assert!(ChartError::CodeSpaceExhausted { prefix: '1' }.is_integrity());
        assert!(ChartError::CodeRetriesExhausted { attempts: 5 }.is_integrity());
        assert!(!ChartError::DuplicateName("Cash".into()).is_integrity());
        assert!(!ChartError::NotFound(AccountId::new()).is_integrity());
    }

    #[test]
    fn test_taxonomy_mapping() {
        assert!(matches!(
            AppError::from(ChartError::DuplicateName("Cash".into())),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(ChartError::HasChildren(AccountId::new())),
            AppError::State(_)
        ));
        let app = AppError::from(ChartError::CodeRetriesExhausted { attempts: 3 });
        assert!(app.is_integrity_alert());
    }
}
