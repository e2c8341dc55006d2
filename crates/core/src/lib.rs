//! Core business logic for the Botica ledger.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `chart` - Hierarchical chart of accounts
//! - `ledger` - Double-entry transaction groups and validation
//! - `funding` - Funding provenance over transaction groups
//! - `balance` - As-of balances and trial balance

pub mod balance;
pub mod chart;
pub mod funding;
pub mod ledger;
