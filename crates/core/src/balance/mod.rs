//! Balance computation and trial balance reporting.
//!
//! Balances come in two forms that must always agree: the cached running
//! balance adjusted at each confirmation, and the replayed balance computed
//! from scratch over confirmed history. The engine here implements the
//! replayed form; the store keeps the cache and tests the agreement.

pub mod engine;
pub mod types;

pub use engine::{account_activity, balances_by_type, replayed_balance, trial_balance};
pub use types::{AccountActivity, TrialBalance, TypeBalance};
