//! Double-entry bookkeeping logic.
//!
//! This module implements the transactional side of the ledger:
//! - Ledger entries (debit/credit legs)
//! - The stateless double-entry validator
//! - The transaction-group aggregate and its state machine
//! - Date-prefixed group number generation
//! - Domain types for draft creation and patching
//! - Error types for ledger operations

pub mod entry;
pub mod error;
pub mod number;
pub mod transaction;
pub mod types;
pub mod validation;

#[cfg(test)]
mod validation_props;

pub use entry::{Entry, EntryInput, EntryLeg};
pub use error::LedgerError;
pub use number::{bump_group_number, next_group_number, GROUP_NUMBER_PREFIX};
pub use transaction::{FundingType, GroupStatus, TransactionGroup};
pub use types::{CreateDraftInput, DraftPatch, GroupTotals, TransactionFilter};
pub use validation::{balance_epsilon, validate_entries};
