//! Hierarchical chart of accounts.
//!
//! This module implements the account side of the ledger:
//! - Account domain types and normal-balance derivation
//! - Type-prefixed account code generation
//! - Tree construction with rolled-up balances
//! - The built-in standard chart for new pharmacies
//! - Error types for chart operations

pub mod account;
pub mod code;
pub mod error;
pub mod hierarchy;
pub mod standard;

#[cfg(test)]
mod hierarchy_props;

pub use account::{Account, AccountStatus, AccountType, NormalBalance};
pub use code::{bump_code, next_account_code};
pub use error::ChartError;
pub use hierarchy::{build_hierarchy, AccountNode};
pub use standard::{standard_chart, StandardAccountDef};
