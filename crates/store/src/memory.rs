//! The shared in-memory state and its lock discipline.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use botica_core::chart::Account;
use botica_core::ledger::TransactionGroup;
use botica_shared::types::{AccountId, GroupId, Scope};
use botica_shared::StoreConfig;

/// The in-memory ledger store.
///
/// All state sits behind one `RwLock`: reads take the shared lock, every
/// mutation takes the exclusive lock for its whole read-check-write span,
/// so the uniqueness checks and the status transitions are race-free.
pub struct MemoryLedger {
    pub(crate) config: StoreConfig,
    pub(crate) inner: RwLock<Inner>,
}

#[derive(Default)]
pub(crate) struct Inner {
    pub(crate) accounts: HashMap<AccountId, Account>,
    pub(crate) groups: HashMap<GroupId, TransactionGroup>,
    /// Every group number ever issued, including those of deleted drafts.
    /// Numbers are never reused, so generation consults this set rather
    /// than the live groups.
    pub(crate) issued_numbers: HashSet<String>,
}

impl Inner {
    /// All accounts in a scope.
    pub(crate) fn scope_accounts(&self, scope: Scope) -> impl Iterator<Item = &Account> {
        self.accounts
            .values()
            .filter(move |account| account.scope == scope)
    }

    /// All transaction groups in a scope.
    pub(crate) fn scope_groups(&self, scope: Scope) -> impl Iterator<Item = &TransactionGroup> {
        self.groups
            .values()
            .filter(move |group| group.scope == scope)
    }

    /// Confirmed groups in a scope, cloned into a snapshot for the replay
    /// engine.
    pub(crate) fn confirmed_snapshot(&self, scope: Scope) -> Vec<TransactionGroup> {
        self.scope_groups(scope)
            .filter(|group| group.status.counts_in_balances())
            .cloned()
            .collect()
    }
}

impl MemoryLedger {
    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Lock poisoning only happens after a panic in another holder; the
    /// data itself is still coherent, so recover the guard and continue.
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
