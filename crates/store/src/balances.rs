//! Balance and trial-balance queries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, error};

use botica_core::balance::{
    account_activity, balances_by_type, replayed_balance, trial_balance, AccountActivity,
    TrialBalance, TypeBalance,
};
use botica_core::chart::{Account, AccountType, ChartError};
use botica_shared::types::{AccountId, Scope};
use botica_shared::AppResult;

use crate::memory::MemoryLedger;

impl MemoryLedger {
    /// An account's balance as of a date, replayed from confirmed history:
    /// initial balance plus every confirmed entry dated on or before
    /// `as_of` (`None` means all confirmed history).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown account.
    pub fn account_balance(
        &self,
        scope: Scope,
        id: AccountId,
        as_of: Option<NaiveDate>,
    ) -> AppResult<Decimal> {
        let inner = self.read();
        let account = inner
            .accounts
            .get(&id)
            .filter(|account| account.scope == scope)
            .ok_or(ChartError::NotFound(id))?;
        let confirmed = inner.confirmed_snapshot(scope);
        Ok(replayed_balance(account, &confirmed, as_of))
    }

    /// Bulk variant of [`account_balance`](Self::account_balance), reading
    /// all requested accounts from one snapshot.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` on the first unknown account.
    pub fn account_balances(
        &self,
        scope: Scope,
        ids: &[AccountId],
        as_of: Option<NaiveDate>,
    ) -> AppResult<Vec<(AccountId, Decimal)>> {
        let inner = self.read();
        let confirmed = inner.confirmed_snapshot(scope);
        ids.iter()
            .map(|&id| {
                let account = inner
                    .accounts
                    .get(&id)
                    .filter(|account| account.scope == scope)
                    .ok_or(ChartError::NotFound(id))?;
                Ok((id, replayed_balance(account, &confirmed, as_of)))
            })
            .collect()
    }

    /// The cached running balance, maintained incrementally at each
    /// confirmation and by administrative adjustment. Reporting uses the
    /// replayed form; this is the cheap read.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown account.
    pub fn cached_balance(&self, scope: Scope, id: AccountId) -> AppResult<Decimal> {
        let inner = self.read();
        inner
            .accounts
            .get(&id)
            .filter(|account| account.scope == scope)
            .map(|account| account.balance)
            .ok_or_else(|| ChartError::NotFound(id).into())
    }

    /// Aggregate balance of all active accounts of one type as of a date.
    #[must_use]
    pub fn balance_by_type(
        &self,
        account_type: AccountType,
        scope: Scope,
        as_of: Option<NaiveDate>,
    ) -> TypeBalance {
        let inner = self.read();
        let confirmed = inner.confirmed_snapshot(scope);
        let balances: Vec<(&Account, Decimal)> = inner
            .scope_accounts(scope)
            .map(|account| (account, replayed_balance(account, &confirmed, as_of)))
            .collect();

        let rows = balances_by_type(balances);
        rows.into_iter()
            .find(|row| row.account_type == account_type)
            .unwrap_or(TypeBalance {
                account_type,
                total_balance: Decimal::ZERO,
                account_count: 0,
            })
    }

    /// The trial balance as of a date. All five type aggregates are read
    /// from one snapshot under a single lock acquisition, so concurrent
    /// writes can never produce a spurious imbalance. A genuinely
    /// unbalanced result is logged as an integrity alert.
    #[must_use]
    pub fn trial_balance(&self, scope: Scope, as_of: Option<NaiveDate>) -> TrialBalance {
        let inner = self.read();
        let confirmed = inner.confirmed_snapshot(scope);
        let balances: Vec<(&Account, Decimal)> = inner
            .scope_accounts(scope)
            .map(|account| (account, replayed_balance(account, &confirmed, as_of)))
            .collect();

        let report = trial_balance(as_of, balances);
        drop(inner);

        if report.is_balanced {
            debug!(net_income = %report.net_income, "trial balance computed");
        } else {
            error!(
                difference = %report.difference,
                "trial balance out of balance"
            );
        }
        report
    }

    /// Confirmed postings touching an account, newest first, with running
    /// balances. Bounded by `date_from`/`date_to` and capped at the
    /// smaller of `limit` and the configured history cap.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown account.
    pub fn account_history(
        &self,
        scope: Scope,
        id: AccountId,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
        limit: usize,
    ) -> AppResult<Vec<AccountActivity>> {
        let inner = self.read();
        let account = inner
            .accounts
            .get(&id)
            .filter(|account| account.scope == scope)
            .ok_or(ChartError::NotFound(id))?;
        let confirmed = inner.confirmed_snapshot(scope);

        let cap = limit.min(self.config.history_limit);
        let mut activity = account_activity(account, &confirmed, date_to, usize::MAX);
        if let Some(from) = date_from {
            activity.retain(|row| row.transaction_date >= from);
        }
        activity.truncate(cap);
        Ok(activity)
    }
}
