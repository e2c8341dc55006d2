//! Ledger entry domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use botica_shared::types::{AccountId, EntryId, GroupId};

use crate::chart::account::NormalBalance;

/// One leg of a ledger entry: exactly a debit or a credit, never both.
///
/// The sum type makes the "both legs set" and "neither leg set" shapes
/// unrepresentable; amount positivity is still checked by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryLeg {
    /// Debit leg (increases debit-normal balances).
    Debit(Decimal),
    /// Credit leg (increases credit-normal balances).
    Credit(Decimal),
}

impl EntryLeg {
    /// Returns the leg's unsigned amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        match self {
            Self::Debit(amount) | Self::Credit(amount) => *amount,
        }
    }

    /// Returns true if this is a debit leg.
    #[must_use]
    pub const fn is_debit(&self) -> bool {
        matches!(self, Self::Debit(_))
    }

    /// Returns the debit amount, zero for credit legs.
    #[must_use]
    pub fn debit_amount(&self) -> Decimal {
        match self {
            Self::Debit(amount) => *amount,
            Self::Credit(_) => Decimal::ZERO,
        }
    }

    /// Returns the credit amount, zero for debit legs.
    #[must_use]
    pub fn credit_amount(&self) -> Decimal {
        match self {
            Self::Debit(_) => Decimal::ZERO,
            Self::Credit(amount) => *amount,
        }
    }

    /// Returns the signed contribution of this leg toward a balance
    /// reported in the given polarity.
    ///
    /// Balances are always reported in the account's own natural polarity:
    /// `+debit - credit` for debit-normal accounts, `-debit + credit` for
    /// credit-normal ones.
    #[must_use]
    pub fn signed_toward(&self, normal: NormalBalance) -> Decimal {
        normal.signed_change(self.debit_amount(), self.credit_amount())
    }
}

/// A single entry within a transaction group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Unique identifier for this entry.
    pub id: EntryId,
    /// The transaction group this entry belongs to.
    pub group_id: GroupId,
    /// 1-based position within the group.
    pub sequence: u32,
    /// The account affected by this entry.
    pub account_id: AccountId,
    /// The debit or credit leg.
    pub leg: EntryLeg,
    /// Optional category tag for this line.
    pub category: Option<String>,
    /// Optional free-text description for this line.
    pub memo: Option<String>,
}

/// Input for one entry when creating or patching a draft.
#[derive(Debug, Clone)]
pub struct EntryInput {
    /// The account to post to.
    pub account_id: AccountId,
    /// The debit or credit leg.
    pub leg: EntryLeg,
    /// Optional category tag.
    pub category: Option<String>,
    /// Optional line description.
    pub memo: Option<String>,
}

impl EntryInput {
    /// Creates an input with no category or memo.
    #[must_use]
    pub const fn new(account_id: AccountId, leg: EntryLeg) -> Self {
        Self {
            account_id,
            leg,
            category: None,
            memo: None,
        }
    }
}
