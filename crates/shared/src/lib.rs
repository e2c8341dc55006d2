//! Shared types, errors, and configuration for Botica.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Ledger scoping (personal vs. organization records)
//! - Pagination types for list operations
//! - Application-wide error taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::StoreConfig;
pub use error::{AppError, AppResult};
