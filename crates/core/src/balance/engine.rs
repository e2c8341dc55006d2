//! The balance replay engine.
//!
//! Replays confirmed history to produce balances for any date, independent
//! of the cached running balances maintained at confirmation time.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::chart::{Account, AccountType};
use crate::ledger::{balance_epsilon, TransactionGroup};

use super::types::{AccountActivity, TrialBalance, TypeBalance};

/// Recomputes an account's balance from scratch: initial balance plus the
/// signed effect of every entry in a confirmed group of the same scope
/// effective on or before `as_of`.
#[must_use]
pub fn replayed_balance(
    account: &Account,
    groups: &[TransactionGroup],
    as_of: Option<NaiveDate>,
) -> Decimal {
    let postings: Decimal = groups
        .iter()
        .filter(|group| group.scope == account.scope && group.posted_by(as_of))
        .flat_map(|group| &group.entries)
        .filter(|entry| entry.account_id == account.id)
        .map(|entry| entry.leg.signed_toward(account.normal_balance))
        .sum();

    account.initial_balance + postings
}

/// Lists the confirmed postings to an account newest-first, each with the
/// running balance after it, capped at `limit` rows.
#[must_use]
pub fn account_activity(
    account: &Account,
    groups: &[TransactionGroup],
    as_of: Option<NaiveDate>,
    limit: usize,
) -> Vec<AccountActivity> {
    let mut posted: Vec<&TransactionGroup> = groups
        .iter()
        .filter(|group| group.scope == account.scope && group.posted_by(as_of))
        .collect();
    // Replay order: effective date, then creation time for same-day groups.
    posted.sort_by(|a, b| {
        a.transaction_date
            .cmp(&b.transaction_date)
            .then(a.created_at.cmp(&b.created_at))
    });

    let mut running = account.initial_balance;
    let mut activity = Vec::new();
    for group in posted {
        for entry in &group.entries {
            if entry.account_id != account.id {
                continue;
            }
            let signed_amount = entry.leg.signed_toward(account.normal_balance);
            running += signed_amount;
            activity.push(AccountActivity {
                group_id: group.id,
                group_number: group.group_number.clone(),
                description: group.description.clone(),
                transaction_date: group.transaction_date,
                leg: entry.leg,
                signed_amount,
                running_balance: running,
            });
        }
    }

    activity.reverse();
    activity.truncate(limit);
    activity
}

/// Aggregates balances by account type over active accounts only. Returns
/// one row per type, in chart order, including types with no accounts.
#[must_use]
pub fn balances_by_type<'a>(
    accounts: impl IntoIterator<Item = (&'a Account, Decimal)>,
) -> Vec<TypeBalance> {
    let mut rows: Vec<TypeBalance> = AccountType::ALL
        .iter()
        .map(|&account_type| TypeBalance {
            account_type,
            total_balance: Decimal::ZERO,
            account_count: 0,
        })
        .collect();

    for (account, balance) in accounts {
        if !account.is_active() {
            continue;
        }
        let row = rows
            .iter_mut()
            .find(|row| row.account_type == account.account_type);
        if let Some(row) = row {
            row.total_balance += balance;
            row.account_count += 1;
        }
    }

    rows
}

/// Builds the trial balance report from per-account balances, checking the
/// accounting equation `assets = liabilities + equity + net income` within
/// the balance tolerance.
#[must_use]
pub fn trial_balance<'a>(
    as_of: Option<NaiveDate>,
    accounts: impl IntoIterator<Item = (&'a Account, Decimal)>,
) -> TrialBalance {
    let rows = balances_by_type(accounts);
    let by_type = |account_type: AccountType| -> TypeBalance {
        rows.iter()
            .copied()
            .find(|row| row.account_type == account_type)
            .unwrap_or(TypeBalance {
                account_type,
                total_balance: Decimal::ZERO,
                account_count: 0,
            })
    };

    let assets = by_type(AccountType::Asset);
    let liabilities = by_type(AccountType::Liability);
    let equity = by_type(AccountType::Equity);
    let revenue = by_type(AccountType::Revenue);
    let expenses = by_type(AccountType::Expense);

    let net_income = revenue.total_balance - expenses.total_balance;
    let difference = assets.total_balance
        - (liabilities.total_balance + equity.total_balance + net_income);

    TrialBalance {
        as_of,
        assets,
        liabilities,
        equity,
        revenue,
        expenses,
        net_income,
        difference,
        is_balanced: difference.abs() <= balance_epsilon(),
    }
}
