//! Funding chain computation.
//!
//! All functions here are pure: the store supplies groups and dependents
//! through slices and lookup closures, so the logic stays testable without
//! any storage behind it.

use rust_decimal::Decimal;

use botica_shared::types::GroupId;

use crate::ledger::{GroupStatus, LedgerError, TransactionGroup};

use super::types::{FundingCheck, FundingHop, SourceAvailability};

/// Upper bound on funding chain length. Chains are acyclic by construction
/// (a source is always created strictly earlier), so hitting this cap means
/// the data is corrupt, not that the chain is merely long.
pub const MAX_FUNDING_DEPTH: usize = 64;

/// Checks that a group may serve as a funding source: it must be confirmed
/// and carry a funding type that can fund.
///
/// # Errors
///
/// Returns [`LedgerError::SourceNotConfirmed`] or
/// [`LedgerError::SourceCannotFund`].
pub fn is_eligible_source(source: &TransactionGroup) -> Result<(), LedgerError> {
    if source.status != GroupStatus::Confirmed {
        return Err(LedgerError::SourceNotConfirmed(source.id));
    }
    if !source.funding_type.can_fund() {
        return Err(LedgerError::SourceCannotFund {
            id: source.id,
            funding_type: source.funding_type,
        });
    }
    Ok(())
}

/// Computes a source's remaining capacity: its total minus the totals of
/// every non-cancelled dependent. Drafts reserve funding too, so two drafts
/// cannot both claim the same remainder.
pub fn available_amount<'a>(
    source: &TransactionGroup,
    dependents: impl IntoIterator<Item = &'a TransactionGroup>,
) -> SourceAvailability {
    let allocated: Decimal = dependents
        .into_iter()
        .filter(|dependent| dependent.status != GroupStatus::Cancelled)
        .map(|dependent| dependent.total_amount)
        .sum();

    SourceAvailability {
        group_id: source.id,
        group_number: source.group_number.clone(),
        description: source.description.clone(),
        total_amount: source.total_amount,
        allocated,
        available: source.total_amount - allocated,
    }
}

/// Validates that a source can fund a dependent drawing `required`,
/// given its precomputed availability.
///
/// When the dependent already exists (a draft being re-checked at
/// confirmation), its own reservation is part of `availability.allocated`;
/// pass its total as `already_reserved` so it is not counted against itself.
///
/// # Errors
///
/// Returns an eligibility error or [`LedgerError::InsufficientFunding`].
pub fn validate_funding_source(
    source: &TransactionGroup,
    availability: &SourceAvailability,
    required: Decimal,
    already_reserved: Decimal,
) -> Result<FundingCheck, LedgerError> {
    is_eligible_source(source)?;

    let available = availability.available + already_reserved;
    if required > available {
        return Err(LedgerError::InsufficientFunding {
            source_id: source.id,
            available,
            requested: required,
        });
    }

    Ok(FundingCheck {
        is_sufficient: true,
        required,
        available,
        source: availability.clone(),
    })
}

/// Walks the funding chain backward from `start` to its root and returns
/// the hops ordered root-first, `start` included as the last hop.
///
/// # Errors
///
/// Returns [`LedgerError::GroupNotFound`] if a source pointer dangles, or
/// [`LedgerError::CorruptChain`] if the walk exceeds
/// [`MAX_FUNDING_DEPTH`] hops.
pub fn funding_path<'a>(
    start: &'a TransactionGroup,
    lookup: impl Fn(GroupId) -> Option<&'a TransactionGroup>,
) -> Result<Vec<FundingHop>, LedgerError> {
    let mut hops = vec![hop_from(start)];
    let mut current = start;

    while let Some(source_id) = current.source_transaction_id {
        if hops.len() >= MAX_FUNDING_DEPTH {
            return Err(LedgerError::CorruptChain {
                start: start.id,
                depth: MAX_FUNDING_DEPTH,
            });
        }

        let source = lookup(source_id).ok_or(LedgerError::GroupNotFound(source_id))?;
        hops.push(hop_from(source));
        current = source;
    }

    hops.reverse();
    Ok(hops)
}

fn hop_from(group: &TransactionGroup) -> FundingHop {
    FundingHop {
        group_id: group.id,
        group_number: group.group_number.clone(),
        description: group.description.clone(),
        transaction_date: group.transaction_date,
        total_amount: group.total_amount,
        funding_type: group.funding_type,
    }
}
