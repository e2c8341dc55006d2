//! Account domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use botica_shared::types::{AccountId, Scope};

/// Classification of a chart of accounts entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Resources owned (cash, inventory, receivables).
    Asset,
    /// Obligations owed (payables, accrued expenses).
    Liability,
    /// Owner's residual interest.
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

impl AccountType {
    /// All five account types, in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Returns the normal balance polarity for this account type.
    ///
    /// Derived deterministically: debit for asset/expense, credit for
    /// liability/equity/revenue. Never independently settable.
    #[must_use]
    pub const fn normal_balance(&self) -> NormalBalance {
        match self {
            Self::Asset | Self::Expense => NormalBalance::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalBalance::Credit,
        }
    }

    /// Returns the leading digit of codes generated for this type.
    #[must_use]
    pub const fn code_prefix(&self) -> char {
        match self {
            Self::Asset => '1',
            Self::Liability => '2',
            Self::Equity => '3',
            Self::Revenue => '4',
            Self::Expense => '5',
        }
    }

    /// Returns the numeric value of the code prefix.
    #[must_use]
    pub(crate) const fn prefix_digit(&self) -> u32 {
        match self {
            Self::Asset => 1,
            Self::Liability => 2,
            Self::Equity => 3,
            Self::Revenue => 4,
            Self::Expense => 5,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Equity => write!(f, "equity"),
            Self::Revenue => write!(f, "revenue"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// The polarity in which an account's balance is naturally expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalBalance {
    /// Debit-normal accounts (asset, expense).
    Debit,
    /// Credit-normal accounts (liability, equity, revenue).
    Credit,
}

impl NormalBalance {
    /// Computes the signed contribution of a (debit, credit) pair toward a
    /// balance reported in this polarity.
    ///
    /// Debit-normal: `debit - credit`. Credit-normal: `credit - debit`.
    #[must_use]
    pub fn signed_change(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

/// Account lifecycle, independent of the transaction-group state machine.
///
/// Deactivation is a soft delete: it blocks future postings but never
/// invalidates history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Account accepts new postings.
    Active,
    /// Account is soft-deleted; historical entries remain readable.
    Deactivated,
}

/// A node in the chart of accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Type-prefixed numeric code, unique within scope (e.g. "1001").
    pub code: String,
    /// Human name, unique among active accounts within scope.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Normal balance polarity, derived from `account_type`.
    pub normal_balance: NormalBalance,
    /// Ownership scope.
    pub scope: Scope,
    /// Parent account within the same scope, if any.
    pub parent_id: Option<AccountId>,
    /// Depth in the hierarchy; roots are level 1.
    pub level: u32,
    /// Opening balance at account creation.
    pub initial_balance: Decimal,
    /// Cached running balance. Maintained on confirmation and adjustable as
    /// an administrative correction; the canonical balance for reporting is
    /// always `initial_balance` plus the replay of confirmed entries.
    pub balance: Decimal,
    /// Lifecycle status.
    pub status: AccountStatus,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Returns true if the account accepts new postings.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}
