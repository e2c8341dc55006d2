//! Funding report types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use botica_shared::types::GroupId;

use crate::ledger::FundingType;

/// One step in a funding chain, ordered root-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingHop {
    /// The group at this step.
    pub group_id: GroupId,
    /// Its group number, for display.
    pub group_number: String,
    /// Its description.
    pub description: String,
    /// Its effective date.
    pub transaction_date: NaiveDate,
    /// Its total amount.
    pub total_amount: Decimal,
    /// Its funding classification.
    pub funding_type: FundingType,
}

/// A funding source's remaining capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceAvailability {
    /// The source group.
    pub group_id: GroupId,
    /// Its group number.
    pub group_number: String,
    /// Its description.
    pub description: String,
    /// Its total amount.
    pub total_amount: Decimal,
    /// How much has been drawn by non-cancelled dependents.
    pub allocated: Decimal,
    /// What remains available: `total_amount - allocated`.
    pub available: Decimal,
}

/// Verdict of a funding sufficiency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingCheck {
    /// Whether the source can cover the requested amount.
    pub is_sufficient: bool,
    /// The amount the dependent transaction needs.
    pub required: Decimal,
    /// The source's remaining capacity.
    pub available: Decimal,
    /// The source examined.
    pub source: SourceAvailability,
}
