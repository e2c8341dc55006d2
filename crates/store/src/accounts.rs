//! Chart of accounts operations.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info};

use botica_core::balance::replayed_balance;
use botica_core::chart::{
    build_hierarchy, bump_code, next_account_code, standard_chart, Account, AccountNode,
    AccountStatus, AccountType, ChartError,
};
use botica_shared::types::{AccountId, Scope};
use botica_shared::{AppError, AppResult};

use crate::memory::MemoryLedger;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Ownership scope.
    pub scope: Scope,
    /// Account name, unique among active accounts in the scope.
    pub name: String,
    /// Account type; fixes the code prefix and normal balance.
    pub account_type: AccountType,
    /// Parent account for hierarchical placement; must share the type.
    pub parent_id: Option<AccountId>,
    /// Opening balance.
    pub initial_balance: Decimal,
}

impl MemoryLedger {
    /// Creates an account: validates name and parent, derives the normal
    /// balance from the type, and generates the next type-prefixed code,
    /// retrying against the unique code set up to the configured limit.
    ///
    /// # Errors
    ///
    /// Returns a [`ChartError`] mapped into [`AppError`] on duplicate name,
    /// bad parent, or code generation exhaustion.
    pub fn create_account(&self, input: CreateAccountInput) -> AppResult<Account> {
        let name = input.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::Validation("Account name cannot be empty".into()));
        }

        let mut inner = self.write();

        if inner
            .scope_accounts(input.scope)
            .any(|account| account.is_active() && account.name == name)
        {
            return Err(ChartError::DuplicateName(name).into());
        }

        // A parent must resolve to an active account of the same type in the
        // same scope; any miss is an invalid parent, not a lookup failure.
        let level = match input.parent_id {
            Some(parent_id) => {
                let parent = inner
                    .accounts
                    .get(&parent_id)
                    .filter(|account| account.scope == input.scope)
                    .filter(|account| account.is_active())
                    .ok_or(ChartError::InvalidParent(parent_id))?;
                if parent.account_type != input.account_type {
                    return Err(ChartError::InvalidParent(parent_id).into());
                }
                parent.level + 1
            }
            None => 1,
        };

        // Generate the next code, then retry against the unique code set.
        // Under the exclusive lock the first candidate is already free, but
        // the loop is the same guard a unique constraint would give us.
        let codes: Vec<String> = inner
            .scope_accounts(input.scope)
            .map(|account| account.code.clone())
            .collect();
        let mut code = next_account_code(input.account_type, codes.iter().map(String::as_str))?;
        let mut attempts: u32 = 1;
        while codes.iter().any(|existing| *existing == code) {
            if attempts >= self.config.code_retry_limit {
                let err = ChartError::CodeRetriesExhausted { attempts };
                error!(code = %code, error_code = err.error_code(), "account code generation exhausted retries");
                return Err(err.into());
            }
            code = bump_code(input.account_type, &code)?;
            attempts += 1;
        }

        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            code,
            name,
            account_type: input.account_type,
            normal_balance: input.account_type.normal_balance(),
            scope: input.scope,
            parent_id: input.parent_id,
            level,
            initial_balance: input.initial_balance,
            balance: input.initial_balance,
            status: AccountStatus::Active,
            created_at: now,
            updated_at: now,
        };

        inner.accounts.insert(account.id, account.clone());
        info!(account_id = %account.id, code = %account.code, "account created");
        Ok(account)
    }

    /// Fetches an account by id within a scope.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if it does not exist in the scope.
    pub fn get_account(&self, scope: Scope, id: AccountId) -> AppResult<Account> {
        let inner = self.read();
        inner
            .accounts
            .get(&id)
            .filter(|account| account.scope == scope)
            .cloned()
            .ok_or_else(|| ChartError::NotFound(id).into())
    }

    /// Soft-deletes an account. History referencing it stays intact; the
    /// account just stops accepting postings and frees its name for reuse.
    ///
    /// # Errors
    ///
    /// Fails if the account is missing, already deactivated, or still has
    /// active children.
    pub fn deactivate_account(&self, scope: Scope, id: AccountId) -> AppResult<Account> {
        let mut inner = self.write();

        let has_active_children = inner
            .scope_accounts(scope)
            .any(|account| account.parent_id == Some(id) && account.is_active());
        if has_active_children {
            return Err(ChartError::HasChildren(id).into());
        }

        let account = inner
            .accounts
            .get_mut(&id)
            .filter(|account| account.scope == scope)
            .ok_or(ChartError::NotFound(id))?;
        if !account.is_active() {
            return Err(ChartError::Deactivated(id).into());
        }

        account.status = AccountStatus::Deactivated;
        account.updated_at = Utc::now();
        info!(account_id = %id, "account deactivated");
        Ok(account.clone())
    }

    /// Administrative balance adjustment. Touches only the cached balance;
    /// replayed balances and the trial balance are unaffected.
    ///
    /// # Errors
    ///
    /// Fails if the account is missing or deactivated.
    pub fn adjust_balance(
        &self,
        scope: Scope,
        id: AccountId,
        new_balance: Decimal,
    ) -> AppResult<Account> {
        let mut inner = self.write();
        let account = inner
            .accounts
            .get_mut(&id)
            .filter(|account| account.scope == scope)
            .ok_or(ChartError::NotFound(id))?;
        if !account.is_active() {
            return Err(ChartError::Deactivated(id).into());
        }

        info!(account_id = %id, old = %account.balance, new = %new_balance, "balance adjusted");
        account.balance = new_balance;
        account.updated_at = Utc::now();
        Ok(account.clone())
    }

    /// Active accounts of one type within a scope, ordered by code.
    #[must_use]
    pub fn accounts_by_type(&self, account_type: AccountType, scope: Scope) -> Vec<Account> {
        let inner = self.read();
        let mut accounts: Vec<Account> = inner
            .scope_accounts(scope)
            .filter(|account| account.is_active() && account.account_type == account_type)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| a.code.cmp(&b.code));
        accounts
    }

    /// The scope's active accounts as a tree with rolled-up replayed
    /// balances: each node carries its own balance plus the recursive sum
    /// of its descendants.
    #[must_use]
    pub fn account_tree(&self, scope: Scope) -> Vec<AccountNode> {
        let inner = self.read();
        let confirmed = inner.confirmed_snapshot(scope);
        let accounts: Vec<(Account, Decimal)> = inner
            .scope_accounts(scope)
            .filter(|account| account.is_active())
            .map(|account| {
                let balance = replayed_balance(account, &confirmed, None);
                (account.clone(), balance)
            })
            .collect();
        drop(inner);

        build_hierarchy(accounts)
    }

    /// Seeds the built-in pharmacy chart into a scope in one pass, parents
    /// before children, skipping names that already exist among the
    /// scope's active accounts. Returns the accounts actually created.
    ///
    /// # Errors
    ///
    /// Propagates any creation failure; already-seeded names are not one.
    pub fn seed_standard_chart(&self, scope: Scope) -> AppResult<Vec<Account>> {
        let existing: HashMap<String, AccountId> = {
            let inner = self.read();
            inner
                .scope_accounts(scope)
                .filter(|account| account.is_active())
                .map(|account| (account.name.clone(), account.id))
                .collect()
        };

        let mut by_name = existing;
        let mut created = Vec::new();

        for def in standard_chart() {
            if by_name.contains_key(def.name) {
                continue;
            }
            let parent_id = def.parent.and_then(|parent| by_name.get(parent)).copied();
            let account = self.create_account(CreateAccountInput {
                scope,
                name: def.name.to_string(),
                account_type: def.account_type,
                parent_id,
                initial_balance: Decimal::ZERO,
            })?;
            by_name.insert(account.name.clone(), account.id);
            created.push(account);
        }

        info!(count = created.len(), "standard chart seeded");
        Ok(created)
    }
}
