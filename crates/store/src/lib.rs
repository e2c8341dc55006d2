//! In-memory transactional store for the Botica ledger.
//!
//! [`MemoryLedger`] holds the chart of accounts and the transaction groups
//! behind a single `RwLock`, playing the role of the document store the
//! core logic assumes. The operation surface is split repository-style:
//!
//! - `accounts` - chart of accounts management and the tree view
//! - `transactions` - draft lifecycle, confirmation, listing
//! - `balances` - as-of balances, trial balance, account history
//! - `funding` - provenance queries and funding-source validation
//!
//! The two read-then-write races the ledger cares about are both guarded
//! here: account-code generation retries against the unique code set, and
//! the draft -> confirmed transition runs as a status check-and-set under
//! the write lock.

pub mod accounts;
pub mod balances;
pub mod funding;
pub mod memory;
pub mod transactions;

pub use accounts::CreateAccountInput;
pub use funding::{AvailableSource, FundingFlow, FundingValidation};
pub use memory::MemoryLedger;
