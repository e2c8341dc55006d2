//! Property-based tests for the double-entry validator.

use proptest::prelude::*;
use rust_decimal::Decimal;

use botica_shared::types::AccountId;

use super::entry::{EntryInput, EntryLeg};
use super::error::LedgerError;
use super::validation::{balance_epsilon, validate_entries};

/// Strategy to generate a positive amount from 0.01 to 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate an arbitrary leg carrying a positive amount.
fn leg_strategy() -> impl Strategy<Value = EntryLeg> {
    (positive_amount(), any::<bool>()).prop_map(|(amount, is_debit)| {
        if is_debit {
            EntryLeg::Debit(amount)
        } else {
            EntryLeg::Credit(amount)
        }
    })
}

fn make_entry(leg: EntryLeg) -> EntryInput {
    EntryInput::new(AccountId::new(), leg)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// A one-debit-one-credit pair of equal amounts always validates, and
    /// the reported totals match the amount on both sides.
    #[test]
    fn prop_matched_pair_accepted(amount in positive_amount()) {
        let entries = vec![
            make_entry(EntryLeg::Debit(amount)),
            make_entry(EntryLeg::Credit(amount)),
        ];

        let totals = validate_entries(&entries);
        prop_assert!(totals.is_ok(), "matched pair rejected: {:?}", totals);
        let totals = totals.unwrap();
        prop_assert_eq!(totals.debits, amount);
        prop_assert_eq!(totals.credits, amount);
        prop_assert!(totals.is_balanced);
    }

    /// Splitting one side across several entries never changes the verdict:
    /// debits of a + b against a single credit of a + b always validate.
    #[test]
    fn prop_split_side_accepted(a in positive_amount(), b in positive_amount()) {
        let entries = vec![
            make_entry(EntryLeg::Debit(a)),
            make_entry(EntryLeg::Debit(b)),
            make_entry(EntryLeg::Credit(a + b)),
        ];

        prop_assert!(validate_entries(&entries).is_ok());
    }

    /// Any imbalance strictly beyond the tolerance is rejected, and the
    /// error reports the actual totals.
    #[test]
    fn prop_imbalance_beyond_epsilon_rejected(
        amount in positive_amount(),
        excess_cents in 2i64..1_000_000i64,
    ) {
        let excess = Decimal::new(excess_cents, 2);
        let entries = vec![
            make_entry(EntryLeg::Debit(amount + excess)),
            make_entry(EntryLeg::Credit(amount)),
        ];

        let result = validate_entries(&entries);
        match result {
            Err(LedgerError::Unbalanced { debits, credits }) => {
                prop_assert_eq!(debits, amount + excess);
                prop_assert_eq!(credits, amount);
                prop_assert!((debits - credits).abs() > balance_epsilon());
            }
            other => prop_assert!(false, "expected Unbalanced, got {:?}", other),
        }
    }

    /// A zero-amount leg is always rejected, regardless of side.
    #[test]
    fn prop_zero_amount_rejected(
        other in positive_amount(),
        zero_is_debit in any::<bool>(),
    ) {
        let zero = if zero_is_debit {
            EntryLeg::Debit(Decimal::ZERO)
        } else {
            EntryLeg::Credit(Decimal::ZERO)
        };
        let counter = if zero_is_debit {
            EntryLeg::Credit(other)
        } else {
            EntryLeg::Debit(other)
        };
        let entries = vec![make_entry(zero), make_entry(counter)];

        let result = validate_entries(&entries);
        match result {
            Err(LedgerError::ZeroAmount { sequence }) => prop_assert_eq!(sequence, 1),
            other => prop_assert!(false, "expected ZeroAmount, got {:?}", other),
        }
    }

    /// Fewer than two entries is always rejected, whatever the leg.
    #[test]
    fn prop_single_entry_rejected(leg in leg_strategy()) {
        prop_assert!(matches!(
            validate_entries(&[make_entry(leg)]),
            Err(LedgerError::InsufficientEntries)
        ));
    }

    /// Entries confined to one side never validate, even when the totals
    /// difference sits inside the tolerance.
    #[test]
    fn prop_single_sided_rejected(
        amounts in prop::collection::vec(positive_amount(), 2..6),
        debit_side in any::<bool>(),
    ) {
        let entries: Vec<_> = amounts
            .into_iter()
            .map(|amount| {
                make_entry(if debit_side {
                    EntryLeg::Debit(amount)
                } else {
                    EntryLeg::Credit(amount)
                })
            })
            .collect();

        prop_assert!(matches!(
            validate_entries(&entries),
            Err(LedgerError::SingleSided)
        ));
    }

    /// Validation is a pure function: running it twice on the same input
    /// yields the same totals.
    #[test]
    fn prop_validation_deterministic(amount in positive_amount()) {
        let entries = vec![
            make_entry(EntryLeg::Debit(amount)),
            make_entry(EntryLeg::Credit(amount)),
        ];

        let first = validate_entries(&entries).unwrap();
        let second = validate_entries(&entries).unwrap();
        prop_assert_eq!(first, second);
    }
}
