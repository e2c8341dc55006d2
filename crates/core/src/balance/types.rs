//! Balance report types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use botica_shared::types::GroupId;

use crate::chart::AccountType;
use crate::ledger::EntryLeg;

/// Aggregate balance for one account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBalance {
    /// The account type aggregated.
    pub account_type: AccountType,
    /// Sum of the balances of all active accounts of this type.
    pub total_balance: Decimal,
    /// How many active accounts of this type exist.
    pub account_count: usize,
}

/// The trial balance report: per-type totals plus the accounting equation
/// check `assets = liabilities + equity + net income`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    /// The date the report is computed as of (`None` means today).
    pub as_of: Option<NaiveDate>,
    /// Asset accounts total.
    pub assets: TypeBalance,
    /// Liability accounts total.
    pub liabilities: TypeBalance,
    /// Equity accounts total.
    pub equity: TypeBalance,
    /// Revenue accounts total.
    pub revenue: TypeBalance,
    /// Expense accounts total.
    pub expenses: TypeBalance,
    /// `revenue - expenses`.
    pub net_income: Decimal,
    /// `assets - (liabilities + equity + net_income)`; zero when balanced.
    pub difference: Decimal,
    /// Whether the difference sits inside the balance tolerance.
    pub is_balanced: bool,
}

/// One posting affecting an account, with the running balance after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountActivity {
    /// The transaction group that carried the posting.
    pub group_id: GroupId,
    /// Its group number.
    pub group_number: String,
    /// Its description.
    pub description: String,
    /// Its effective date.
    pub transaction_date: NaiveDate,
    /// The leg posted to this account.
    pub leg: EntryLeg,
    /// Signed effect on the account, per its normal balance.
    pub signed_amount: Decimal,
    /// Account balance after this posting.
    pub running_balance: Decimal,
}
