//! Transaction group aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use botica_shared::types::{GroupId, Scope};

use super::entry::Entry;

/// Transaction group lifecycle.
///
/// `Draft -> Confirmed` is the single irreversible transition; `Draft ->
/// Cancelled` retains the record for audit. Confirmed groups are terminal
/// for mutation but stay readable and referenceable as funding sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupStatus {
    /// Being drafted; can be edited, cancelled, or deleted.
    Draft,
    /// Posted to the ledger; immutable.
    Confirmed,
    /// Withdrawn before confirmation; excluded from balances and funding.
    Cancelled,
}

impl GroupStatus {
    /// Returns true if the group can still be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the group counts toward balance computations.
    #[must_use]
    pub fn counts_in_balances(&self) -> bool {
        matches!(self, Self::Confirmed)
    }
}

/// How a transaction group relates to funding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundingType {
    /// An original receipt of funds; can fund later transactions.
    Original,
    /// An extension of existing funds; can fund later transactions.
    Extended,
    /// A movement between accounts; cannot fund other transactions.
    Transfer,
}

impl FundingType {
    /// Returns true if groups of this type may serve as funding sources.
    #[must_use]
    pub fn can_fund(&self) -> bool {
        matches!(self, Self::Original | Self::Extended)
    }
}

/// The atomic, balanced unit of posting: an ordered set of entries plus
/// lifecycle and funding-provenance state.
///
/// `source_transaction_id` is the single authoritative funding pointer;
/// forward fan-out (which groups draw from this one) is computed by reverse
/// lookup, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionGroup {
    /// Unique identifier.
    pub id: GroupId,
    /// Human-readable date-prefixed number, e.g. "TXN-20260831-0001".
    /// Unique and never reused, distinct from the primary key.
    pub group_number: String,
    /// Ownership scope.
    pub scope: Scope,
    /// Description of the transaction.
    pub description: String,
    /// The date the transaction is effective.
    pub transaction_date: NaiveDate,
    /// Sum of the debit legs (equals the credit sum once balanced).
    pub total_amount: Decimal,
    /// Optional link to a receipt image or document.
    pub receipt_url: Option<String>,
    /// Optional external invoice number.
    pub invoice_number: Option<String>,
    /// Lifecycle status.
    pub status: GroupStatus,
    /// Funding classification.
    pub funding_type: FundingType,
    /// The group this one draws funding from, if any. Always points to a
    /// group created strictly earlier, so chains cannot cycle.
    pub source_transaction_id: Option<GroupId>,
    /// Ordered entries (at least 2).
    pub entries: Vec<Entry>,
    /// When the group was created.
    pub created_at: DateTime<Utc>,
    /// When the group was last updated.
    pub updated_at: DateTime<Utc>,
}

impl TransactionGroup {
    /// Returns true if the group can still be edited or deleted.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    /// Returns true if the group is an eligible funding source:
    /// confirmed and of a funding type that can fund.
    #[must_use]
    pub fn is_funding_source(&self) -> bool {
        self.status == GroupStatus::Confirmed && self.funding_type.can_fund()
    }

    /// Returns true if the group contributes to balances as of the given
    /// date (confirmed, effective on or before it).
    #[must_use]
    pub fn posted_by(&self, as_of: Option<NaiveDate>) -> bool {
        self.status.counts_in_balances()
            && as_of.map_or(true, |date| self.transaction_date <= date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_editability() {
        assert!(GroupStatus::Draft.is_editable());
        assert!(!GroupStatus::Confirmed.is_editable());
        assert!(!GroupStatus::Cancelled.is_editable());
    }

    #[test]
    fn test_status_balance_inclusion() {
        assert!(GroupStatus::Confirmed.counts_in_balances());
        assert!(!GroupStatus::Draft.counts_in_balances());
        assert!(!GroupStatus::Cancelled.counts_in_balances());
    }

    #[test]
    fn test_funding_type_eligibility() {
        assert!(FundingType::Original.can_fund());
        assert!(FundingType::Extended.can_fund());
        assert!(!FundingType::Transfer.can_fund());
    }

    fn make_group(status: GroupStatus, funding_type: FundingType) -> TransactionGroup {
        let now = chrono::Utc::now();
        TransactionGroup {
            id: GroupId::new(),
            group_number: "TXN-20260115-0001".to_string(),
            scope: Scope::Personal,
            description: "Test".to_string(),
            transaction_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            total_amount: Decimal::new(10000, 2),
            receipt_url: None,
            invoice_number: None,
            status,
            funding_type,
            source_transaction_id: None,
            entries: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_funding_source_eligibility() {
        assert!(make_group(GroupStatus::Confirmed, FundingType::Original).is_funding_source());
        assert!(make_group(GroupStatus::Confirmed, FundingType::Extended).is_funding_source());
        assert!(!make_group(GroupStatus::Confirmed, FundingType::Transfer).is_funding_source());
        assert!(!make_group(GroupStatus::Draft, FundingType::Original).is_funding_source());
        assert!(!make_group(GroupStatus::Cancelled, FundingType::Original).is_funding_source());
    }

    #[test]
    fn test_posted_by_date_filter() {
        let group = make_group(GroupStatus::Confirmed, FundingType::Original);
        let before = NaiveDate::from_ymd_opt(2026, 1, 14).unwrap();
        let on = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();

        assert!(group.posted_by(None));
        assert!(group.posted_by(Some(on)));
        assert!(!group.posted_by(Some(before)));

        let draft = make_group(GroupStatus::Draft, FundingType::Original);
        assert!(!draft.posted_by(None));
    }
}
