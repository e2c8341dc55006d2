//! The stateless double-entry validator.
//!
//! Invoked both before persisting a draft and again before the draft →
//! confirmed transition: the group may have been edited between the two
//! calls, so re-validation at confirmation is mandatory, not redundant.

use rust_decimal::Decimal;

use super::entry::EntryInput;
use super::error::LedgerError;
use super::types::GroupTotals;

/// The fixed tolerance absorbing rounding when comparing debit and credit
/// totals. No other rounding is applied anywhere in the ledger.
#[must_use]
pub fn balance_epsilon() -> Decimal {
    // 0.01 currency units
    Decimal::new(1, 2)
}

/// Validates that a set of proposed entries is balanced and well-formed.
///
/// Checks, in order:
/// 1. at least two entries;
/// 2. every leg amount is positive (the `EntryLeg` sum type already makes
///    "both legs" and "neither leg" unrepresentable);
/// 3. both sides are present;
/// 4. `|debits - credits| <= 0.01`.
///
/// Pure and side-effect free; returns the computed totals on success.
///
/// # Errors
///
/// Returns a [`LedgerError`] describing the first violated rule.
pub fn validate_entries(entries: &[EntryInput]) -> Result<GroupTotals, LedgerError> {
    if entries.len() < 2 {
        return Err(LedgerError::InsufficientEntries);
    }

    let mut debits = Decimal::ZERO;
    let mut credits = Decimal::ZERO;
    let mut has_debit = false;
    let mut has_credit = false;

    for (index, entry) in entries.iter().enumerate() {
        let sequence = index + 1;
        let amount = entry.leg.amount();
        if amount == Decimal::ZERO {
            return Err(LedgerError::ZeroAmount { sequence });
        }
        if amount < Decimal::ZERO {
            return Err(LedgerError::NegativeAmount { sequence });
        }

        if entry.leg.is_debit() {
            debits += amount;
            has_debit = true;
        } else {
            credits += amount;
            has_credit = true;
        }
    }

    if !has_debit || !has_credit {
        return Err(LedgerError::SingleSided);
    }

    if (debits - credits).abs() > balance_epsilon() {
        return Err(LedgerError::Unbalanced { debits, credits });
    }

    Ok(GroupTotals::new(debits, credits))
}
