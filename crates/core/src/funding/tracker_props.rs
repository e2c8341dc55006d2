//! Property-based tests for funding availability.

use proptest::prelude::*;
use rust_decimal::Decimal;

use botica_shared::types::{GroupId, Scope};

use crate::ledger::{FundingType, GroupStatus, TransactionGroup};

use super::tracker::{available_amount, funding_path};

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn status_strategy() -> impl Strategy<Value = GroupStatus> {
    prop_oneof![
        Just(GroupStatus::Draft),
        Just(GroupStatus::Confirmed),
        Just(GroupStatus::Cancelled),
    ]
}

fn make_group(
    total: Decimal,
    status: GroupStatus,
    source: Option<GroupId>,
) -> TransactionGroup {
    let now = chrono::Utc::now();
    TransactionGroup {
        id: GroupId::new(),
        group_number: "TXN-20260110-0001".to_string(),
        scope: Scope::Personal,
        description: "prop".to_string(),
        transaction_date: chrono::NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        total_amount: total,
        receipt_url: None,
        invoice_number: None,
        status,
        funding_type: FundingType::Transfer,
        source_transaction_id: source,
        entries: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Conservation: for any set of dependents, allocated plus available
    /// always equals the source's total, and cancelled dependents never
    /// contribute to the allocated side.
    #[test]
    fn prop_allocation_conserves_total(
        source_total in amount_strategy(),
        dependents in prop::collection::vec((amount_strategy(), status_strategy()), 0..10),
    ) {
        let source = make_group(source_total, GroupStatus::Confirmed, None);
        let dependents: Vec<_> = dependents
            .into_iter()
            .map(|(total, status)| make_group(total, status, Some(source.id)))
            .collect();

        let availability = available_amount(&source, &dependents);

        prop_assert_eq!(
            availability.allocated + availability.available,
            source.total_amount
        );

        let live_total: Decimal = dependents
            .iter()
            .filter(|d| d.status != GroupStatus::Cancelled)
            .map(|d| d.total_amount)
            .sum();
        prop_assert_eq!(availability.allocated, live_total);
    }

    /// A linear chain of any length under the cap walks back to its root,
    /// and the path starts at the root and ends at the starting group.
    #[test]
    fn prop_chain_walks_to_root(
        totals in prop::collection::vec(amount_strategy(), 1..20),
    ) {
        let mut chain: Vec<TransactionGroup> = Vec::with_capacity(totals.len());
        for total in totals {
            let source = chain.last().map(|g| g.id);
            chain.push(make_group(total, GroupStatus::Confirmed, source));
        }

        let by_id: std::collections::HashMap<_, _> =
            chain.iter().map(|g| (g.id, g)).collect();
        let last = chain.last().unwrap();

        let path = funding_path(last, |id| by_id.get(&id).copied()).unwrap();

        prop_assert_eq!(path.len(), chain.len());
        prop_assert_eq!(path[0].group_id, chain[0].id);
        prop_assert_eq!(path[path.len() - 1].group_id, last.id);
    }
}
