//! Property tests for the account tree fold.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::hierarchy::{build_hierarchy, AccountNode};

use crate::chart::account::{Account, AccountStatus, AccountType};
use botica_shared::types::{AccountId, Scope};

/// Strategy for self balances in cents.
fn balance_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for a random forest: for each account after the first, an
/// optional parent index among the accounts created before it (so cycles are
/// impossible by construction, as in the real store).
fn forest_strategy() -> impl Strategy<Value = Vec<(Account, Decimal)>> {
    prop::collection::vec((any::<u8>(), balance_strategy()), 1..30).prop_map(|seeds| {
        let mut accounts: Vec<(Account, Decimal)> = Vec::with_capacity(seeds.len());
        for (i, (parent_pick, balance)) in seeds.into_iter().enumerate() {
            let parent = if i == 0 {
                None
            } else {
                // Roughly half the nodes get a parent.
                let pick = usize::from(parent_pick);
                if pick % 2 == 0 {
                    Some(pick % i)
                } else {
                    None
                }
            };
            let (parent_id, level) = match parent {
                Some(idx) => (Some(accounts[idx].0.id), accounts[idx].0.level + 1),
                None => (None, 1),
            };
            let account_type = AccountType::Asset;
            let now = chrono::Utc::now();
            let account = Account {
                id: AccountId::new(),
                code: format!("{}", 1001 + i),
                name: format!("Account {i}"),
                account_type,
                normal_balance: account_type.normal_balance(),
                scope: Scope::Personal,
                parent_id,
                level,
                initial_balance: Decimal::ZERO,
                balance: Decimal::ZERO,
                status: AccountStatus::Active,
                created_at: now,
                updated_at: now,
            };
            accounts.push((account, balance));
        }
        accounts
    })
}

fn assert_rollup(node: &AccountNode) {
    let child_total: Decimal = node.children.iter().map(|c| c.total_balance).sum();
    assert_eq!(node.total_balance, node.self_balance + child_total);
    assert_eq!(node.child_count, node.children.len());
    let descendants: usize = node
        .children
        .iter()
        .map(|c| c.descendant_count + 1)
        .sum();
    assert_eq!(node.descendant_count, descendants);
    for child in &node.children {
        assert_rollup(child);
    }
}

fn count_nodes(node: &AccountNode) -> usize {
    1 + node.children.iter().map(count_nodes).sum::<usize>()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// For every node, `total_balance == self_balance + sum of children's
    /// total_balance`, and the counts match the actual children.
    #[test]
    fn prop_rollup_invariant(forest in forest_strategy()) {
        let tree = build_hierarchy(forest);
        for root in &tree {
            assert_rollup(root);
        }
    }

    /// The sum of root totals equals the sum of all self balances: the fold
    /// neither loses nor double-counts any account.
    #[test]
    fn prop_roots_conserve_total(forest in forest_strategy()) {
        let expected: Decimal = forest.iter().map(|(_, balance)| *balance).sum();
        let count = forest.len();

        let tree = build_hierarchy(forest);
        let total: Decimal = tree.iter().map(|root| root.total_balance).sum();
        prop_assert_eq!(total, expected);

        let nodes: usize = tree.iter().map(count_nodes).sum();
        prop_assert_eq!(nodes, count);
    }
}
