//! Input and summary types for transaction operations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use botica_shared::types::{GroupId, Scope};

use super::entry::EntryInput;
use super::transaction::{FundingType, GroupStatus};
use super::validation::balance_epsilon;

/// Input for creating a draft transaction group.
#[derive(Debug, Clone)]
pub struct CreateDraftInput {
    /// Ownership scope.
    pub scope: Scope,
    /// Description of the transaction.
    pub description: String,
    /// Effective date.
    pub transaction_date: NaiveDate,
    /// Optional receipt link.
    pub receipt_url: Option<String>,
    /// Optional external invoice number.
    pub invoice_number: Option<String>,
    /// Funding classification.
    pub funding_type: FundingType,
    /// Group to draw funding from, if any.
    pub source_transaction_id: Option<GroupId>,
    /// The entry legs (at least 2, balanced).
    pub entries: Vec<EntryInput>,
}

/// Partial update for a draft group. `None` fields are left unchanged;
/// the double-wrapped optionals distinguish "leave as is" from "clear".
#[derive(Debug, Clone, Default)]
pub struct DraftPatch {
    /// New description.
    pub description: Option<String>,
    /// New effective date.
    pub transaction_date: Option<NaiveDate>,
    /// `Some(None)` clears the receipt link.
    pub receipt_url: Option<Option<String>>,
    /// `Some(None)` clears the invoice number.
    pub invoice_number: Option<Option<String>>,
    /// Full replacement entry set; validated and re-totaled atomically.
    pub entries: Option<Vec<EntryInput>>,
}

impl DraftPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.transaction_date.is_none()
            && self.receipt_url.is_none()
            && self.invoice_number.is_none()
            && self.entries.is_none()
    }
}

/// Filter for listing transaction groups. All criteria are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Restrict to one ownership scope.
    pub scope: Option<Scope>,
    /// Restrict to one lifecycle status.
    pub status: Option<GroupStatus>,
    /// Restrict to one funding type.
    pub funding_type: Option<FundingType>,
    /// Earliest effective date, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Latest effective date, inclusive.
    pub date_to: Option<NaiveDate>,
}

/// Debit and credit totals of an entry set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotals {
    /// Sum of all debit legs.
    pub debits: Decimal,
    /// Sum of all credit legs.
    pub credits: Decimal,
    /// Whether the totals agree within the balance tolerance.
    pub is_balanced: bool,
}

impl GroupTotals {
    /// Builds totals, deriving `is_balanced` from the tolerance.
    #[must_use]
    pub fn new(debits: Decimal, credits: Decimal) -> Self {
        Self {
            debits,
            credits,
            is_balanced: (debits - credits).abs() <= balance_epsilon(),
        }
    }

    /// Absolute difference between the two sides.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        (self.debits - self.credits).abs()
    }

    /// The group amount: the debit total of a balanced set.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.debits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_totals_balanced_within_tolerance() {
        let totals = GroupTotals::new(dec!(100.00), dec!(99.99));
        assert!(totals.is_balanced);
        assert_eq!(totals.difference(), dec!(0.01));
        assert_eq!(totals.total_amount(), dec!(100.00));
    }

    #[test]
    fn test_totals_unbalanced() {
        let totals = GroupTotals::new(dec!(100.00), dec!(90.00));
        assert!(!totals.is_balanced);
        assert_eq!(totals.difference(), dec!(10.00));
    }

    #[test]
    fn test_empty_patch() {
        assert!(DraftPatch::default().is_empty());

        let patch = DraftPatch {
            receipt_url: Some(None),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
