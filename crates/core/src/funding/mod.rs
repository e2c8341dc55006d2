//! Funding provenance tracking.
//!
//! Answers "where did the money for this transaction come from, and where
//! did it go" by walking the single backward pointer each transaction group
//! carries. Forward fan-out is always derived by reverse lookup, never
//! stored, so the two directions cannot disagree.

pub mod tracker;
pub mod types;

#[cfg(test)]
mod tracker_props;

pub use tracker::{
    available_amount, funding_path, is_eligible_source, validate_funding_source,
    MAX_FUNDING_DEPTH,
};
pub use types::{FundingCheck, FundingHop, SourceAvailability};
