//! Account tree construction with rolled-up balances.
//!
//! A pure, memory-bound fold: the caller loads the active accounts of a
//! scope (with their computed self balances) and this module builds the
//! parent/children adjacency and post-order aggregates in one pass, with no
//! per-node lookups against storage.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use botica_shared::types::AccountId;

use super::account::Account;

/// A node in the account tree with derived aggregates.
#[derive(Debug, Clone, Serialize)]
pub struct AccountNode {
    /// The account at this node.
    pub account: Account,
    /// Balance of this account alone.
    pub self_balance: Decimal,
    /// `self_balance` plus the total balances of all children, recursively.
    pub total_balance: Decimal,
    /// Number of direct children.
    pub child_count: usize,
    /// Number of descendants at any depth.
    pub descendant_count: usize,
    /// Child nodes, ordered by code.
    pub children: Vec<AccountNode>,
}

/// Builds the account forest for one scope.
///
/// Input pairs are `(account, self_balance)`. Accounts whose `parent_id` is
/// `None` become roots; children attach under their parent and are ordered
/// by code. Cycles cannot occur because accounts are only created with an
/// already-persisted parent.
#[must_use]
pub fn build_hierarchy(accounts: Vec<(Account, Decimal)>) -> Vec<AccountNode> {
    let mut by_parent: HashMap<Option<AccountId>, Vec<(Account, Decimal)>> = HashMap::new();
    for pair in accounts {
        by_parent.entry(pair.0.parent_id).or_default().push(pair);
    }
    for bucket in by_parent.values_mut() {
        bucket.sort_by(|a, b| a.0.code.cmp(&b.0.code));
    }

    let roots = by_parent.remove(&None).unwrap_or_default();
    roots
        .into_iter()
        .map(|seed| build_node(seed, &mut by_parent))
        .collect()
}

fn build_node(
    (account, self_balance): (Account, Decimal),
    by_parent: &mut HashMap<Option<AccountId>, Vec<(Account, Decimal)>>,
) -> AccountNode {
    let seeds = by_parent.remove(&Some(account.id)).unwrap_or_default();
    let children: Vec<AccountNode> = seeds
        .into_iter()
        .map(|seed| build_node(seed, by_parent))
        .collect();

    let child_count = children.len();
    let descendant_count = child_count
        + children
            .iter()
            .map(|child| child.descendant_count)
            .sum::<usize>();
    let total_balance = self_balance
        + children
            .iter()
            .map(|child| child.total_balance)
            .sum::<Decimal>();

    AccountNode {
        account,
        self_balance,
        total_balance,
        child_count,
        descendant_count,
        children,
    }
}
