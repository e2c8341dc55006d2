//! Property tests over the whole store: the cached balances, the replay
//! engine, and the trial balance must agree no matter what sequence of
//! balanced postings runs.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use botica_core::chart::AccountType;
use botica_core::ledger::{CreateDraftInput, EntryInput, EntryLeg, FundingType};
use botica_shared::types::{AccountId, Scope};
use botica_store::{CreateAccountInput, MemoryLedger};

/// What to do with a generated draft.
#[derive(Debug, Clone, Copy)]
enum Outcome {
    Leave,
    Confirm,
    Cancel,
}

#[derive(Debug, Clone)]
struct Posting {
    debit: usize,
    credit: usize,
    cents: i64,
    day: u32,
    outcome: Outcome,
}

fn outcome_strategy() -> impl Strategy<Value = Outcome> {
    prop_oneof![
        Just(Outcome::Leave),
        Just(Outcome::Confirm),
        Just(Outcome::Confirm),
        Just(Outcome::Cancel),
    ]
}

fn posting_strategy(account_count: usize) -> impl Strategy<Value = Posting> {
    (
        0..account_count,
        0..account_count,
        1i64..10_000_000i64,
        1u32..28u32,
        outcome_strategy(),
    )
        .prop_map(|(debit, credit, cents, day, outcome)| Posting {
            debit,
            credit,
            cents,
            day,
            outcome,
        })
}

/// One account per type, so postings can land anywhere in the equation.
fn seed_accounts(store: &MemoryLedger) -> Vec<AccountId> {
    AccountType::ALL
        .iter()
        .map(|&account_type| {
            store
                .create_account(CreateAccountInput {
                    scope: Scope::Personal,
                    name: format!("{account_type} main"),
                    account_type,
                    parent_id: None,
                    initial_balance: Decimal::ZERO,
                })
                .unwrap()
                .id
        })
        .collect()
}

fn apply_postings(store: &MemoryLedger, accounts: &[AccountId], postings: &[Posting]) {
    for posting in postings {
        let amount = Decimal::new(posting.cents, 2);
        let group = store
            .create_draft(CreateDraftInput {
                scope: Scope::Personal,
                description: "prop posting".to_string(),
                transaction_date: NaiveDate::from_ymd_opt(2026, 4, posting.day).unwrap(),
                receipt_url: None,
                invoice_number: None,
                funding_type: FundingType::Original,
                source_transaction_id: None,
                entries: vec![
                    EntryInput::new(accounts[posting.debit], EntryLeg::Debit(amount)),
                    EntryInput::new(accounts[posting.credit], EntryLeg::Credit(amount)),
                ],
            })
            .unwrap();

        match posting.outcome {
            Outcome::Leave => {}
            Outcome::Confirm => {
                store.confirm_transaction(Scope::Personal, group.id).unwrap();
            }
            Outcome::Cancel => {
                store.cancel_transaction(Scope::Personal, group.id).unwrap();
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The incrementally maintained cache and the from-scratch replay
    /// always agree, for every account, after any posting sequence.
    #[test]
    fn prop_cached_and_replayed_balances_agree(
        postings in prop::collection::vec(posting_strategy(5), 0..25),
    ) {
        let store = MemoryLedger::default();
        let accounts = seed_accounts(&store);
        apply_postings(&store, &accounts, &postings);

        for &id in &accounts {
            let cached = store.cached_balance(Scope::Personal, id).unwrap();
            let replayed = store.account_balance(Scope::Personal, id, None).unwrap();
            prop_assert_eq!(cached, replayed, "account {} diverged", id);
        }
    }

    /// The accounting equation holds after any sequence of balanced
    /// postings: the trial balance difference is exactly zero.
    #[test]
    fn prop_trial_balance_stays_balanced(
        postings in prop::collection::vec(posting_strategy(5), 0..25),
    ) {
        let store = MemoryLedger::default();
        let accounts = seed_accounts(&store);
        apply_postings(&store, &accounts, &postings);

        let report = store.trial_balance(Scope::Personal, None);
        prop_assert_eq!(report.difference, Decimal::ZERO);
        prop_assert!(report.is_balanced);
    }

    /// As-of reads are monotone snapshots: the balance at an earlier date
    /// never includes later postings, and the full balance equals the
    /// balance at the latest posting date.
    #[test]
    fn prop_as_of_reads_are_consistent(
        postings in prop::collection::vec(posting_strategy(5), 1..25),
    ) {
        let store = MemoryLedger::default();
        let accounts = seed_accounts(&store);
        apply_postings(&store, &accounts, &postings);

        let cutoff = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();
        for &id in &accounts {
            let full = store.account_balance(Scope::Personal, id, None).unwrap();
            let as_of = store
                .account_balance(Scope::Personal, id, Some(cutoff))
                .unwrap();
            prop_assert_eq!(full, as_of);
        }
    }

    /// Funding conservation through the store: whatever mix of dependents
    /// gets created, confirmed, or cancelled, allocated + available equals
    /// the source total, and available never goes negative because
    /// over-allocation is rejected up front.
    #[test]
    fn prop_funding_never_over_allocates(
        draws in prop::collection::vec((1i64..40_000i64, outcome_strategy()), 1..15),
    ) {
        let store = MemoryLedger::default();
        let accounts = seed_accounts(&store);

        let source_total = Decimal::new(100_000, 2);
        let source = store
            .create_draft(CreateDraftInput {
                scope: Scope::Personal,
                description: "source".to_string(),
                transaction_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
                receipt_url: None,
                invoice_number: None,
                funding_type: FundingType::Original,
                source_transaction_id: None,
                entries: vec![
                    EntryInput::new(accounts[0], EntryLeg::Debit(source_total)),
                    EntryInput::new(accounts[2], EntryLeg::Credit(source_total)),
                ],
            })
            .unwrap();
        store.confirm_transaction(Scope::Personal, source.id).unwrap();

        let mut reserved = Decimal::ZERO;
        for (cents, outcome) in draws {
            let amount = Decimal::new(cents, 2);
            let draft = store.create_draft(CreateDraftInput {
                scope: Scope::Personal,
                description: "draw".to_string(),
                transaction_date: NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
                receipt_url: None,
                invoice_number: None,
                funding_type: FundingType::Transfer,
                source_transaction_id: Some(source.id),
                entries: vec![
                    EntryInput::new(accounts[1], EntryLeg::Debit(amount)),
                    EntryInput::new(accounts[0], EntryLeg::Credit(amount)),
                ],
            });

            match draft {
                Ok(group) => {
                    // Accepted, so it fit the remaining capacity.
                    prop_assert!(reserved + amount <= source_total);
                    match outcome {
                        Outcome::Leave | Outcome::Confirm => {
                            if matches!(outcome, Outcome::Confirm) {
                                store
                                    .confirm_transaction(Scope::Personal, group.id)
                                    .unwrap();
                            }
                            reserved += amount;
                        }
                        Outcome::Cancel => {
                            store
                                .cancel_transaction(Scope::Personal, group.id)
                                .unwrap();
                        }
                    }
                }
                Err(_) => {
                    // Rejected, so it would have overdrawn the source.
                    prop_assert!(reserved + amount > source_total);
                }
            }
        }

        let sources = store.available_funding_sources(Scope::Personal, Decimal::ZERO);
        let remaining = sources
            .iter()
            .find(|candidate| candidate.group.id == source.id)
            .map(|candidate| candidate.available);
        if let Some(remaining) = remaining {
            prop_assert_eq!(remaining, source_total - reserved);
            prop_assert!(remaining >= Decimal::ZERO);
        }
    }
}
