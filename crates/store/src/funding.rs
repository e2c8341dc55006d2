//! Funding provenance queries.

use rust_decimal::Decimal;
use tracing::error;

use botica_core::funding::{
    available_amount, funding_path, is_eligible_source, FundingCheck, FundingHop,
    SourceAvailability,
};
use botica_core::ledger::{GroupStatus, LedgerError, TransactionGroup};
use botica_shared::types::{GroupId, Scope};
use botica_shared::AppResult;

use crate::memory::MemoryLedger;

/// A confirmed funding source with spare capacity.
#[derive(Debug, Clone)]
pub struct AvailableSource {
    /// The source group.
    pub group: TransactionGroup,
    /// Its remaining capacity after all non-cancelled dependents.
    pub available: Decimal,
}

/// Outcome of checking a set of candidate sources against a required
/// amount.
#[derive(Debug, Clone)]
pub struct FundingValidation {
    /// Whether the candidates' combined remaining capacity covers the
    /// requirement.
    pub is_sufficient: bool,
    /// The amount that must be covered.
    pub required: Decimal,
    /// Remaining capacity summed across all candidates.
    pub total_available: Decimal,
    /// Per-candidate breakdown; each check's own flag says whether that
    /// source alone would cover the requirement.
    pub sources: Vec<FundingCheck>,
}

/// Both directions of a group's funding provenance.
#[derive(Debug, Clone)]
pub struct FundingFlow {
    /// The chain from the funding root down to this group, root first,
    /// this group included as the last hop.
    pub source_path: Vec<FundingHop>,
    /// Non-cancelled groups drawing directly from this group, computed by
    /// reverse lookup.
    pub dependents: Vec<FundingHop>,
    /// Remaining capacity, when this group is an eligible source.
    pub availability: Option<SourceAvailability>,
}

impl MemoryLedger {
    /// Eligible funding sources in a scope with at least `min_amount`
    /// available, largest remaining capacity first.
    #[must_use]
    pub fn available_funding_sources(
        &self,
        scope: Scope,
        min_amount: Decimal,
    ) -> Vec<AvailableSource> {
        let inner = self.read();
        let mut sources: Vec<AvailableSource> = inner
            .scope_groups(scope)
            .filter(|group| group.is_funding_source())
            .filter_map(|source| {
                let dependents = inner
                    .groups
                    .values()
                    .filter(|group| group.source_transaction_id == Some(source.id));
                let availability = available_amount(source, dependents);
                (availability.available >= min_amount).then(|| AvailableSource {
                    group: source.clone(),
                    available: availability.available,
                })
            })
            .collect();
        drop(inner);

        sources.sort_by(|a, b| b.available.cmp(&a.available));
        sources
    }

    /// Traces a group's funding both ways: the backward chain to its
    /// funding root, and the forward fan-out of groups drawing from it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown group and an integrity error if
    /// the backward chain exceeds the depth cap.
    pub fn funding_flow(&self, scope: Scope, id: GroupId) -> AppResult<FundingFlow> {
        let inner = self.read();
        let group = inner
            .groups
            .get(&id)
            .filter(|group| group.scope == scope)
            .ok_or(LedgerError::GroupNotFound(id))?;

        let source_path = funding_path(group, |source_id| inner.groups.get(&source_id))
            .map_err(|err| {
                if err.is_integrity() {
                    error!(group_id = %id, error_code = err.error_code(), "corrupt funding chain");
                }
                err
            })?;

        let dependents: Vec<FundingHop> = inner
            .groups
            .values()
            .filter(|dependent| {
                dependent.source_transaction_id == Some(id)
                    && dependent.status != GroupStatus::Cancelled
            })
            .map(|dependent| FundingHop {
                group_id: dependent.id,
                group_number: dependent.group_number.clone(),
                description: dependent.description.clone(),
                transaction_date: dependent.transaction_date,
                total_amount: dependent.total_amount,
                funding_type: dependent.funding_type,
            })
            .collect();

        let availability = group.is_funding_source().then(|| {
            available_amount(
                group,
                inner
                    .groups
                    .values()
                    .filter(|dependent| dependent.source_transaction_id == Some(id)),
            )
        });

        Ok(FundingFlow {
            source_path,
            dependents,
            availability,
        })
    }

    /// Checks a set of candidate sources against a required amount: every
    /// candidate must be an eligible source, their remaining capacities are
    /// summed, and the sum is compared to the requirement. Each per-source
    /// check also reports whether that source alone would cover it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown candidate and a validation error
    /// for an ineligible one.
    pub fn validate_funding_sources(
        &self,
        scope: Scope,
        candidates: &[GroupId],
        required: Decimal,
    ) -> AppResult<FundingValidation> {
        let inner = self.read();
        let sources: Vec<FundingCheck> = candidates
            .iter()
            .map(|&candidate| {
                let source = inner
                    .groups
                    .get(&candidate)
                    .filter(|group| group.scope == scope)
                    .ok_or(LedgerError::GroupNotFound(candidate))?;
                is_eligible_source(source)?;

                let dependents = inner
                    .groups
                    .values()
                    .filter(|group| group.source_transaction_id == Some(candidate));
                let availability = available_amount(source, dependents);
                Ok(FundingCheck {
                    is_sufficient: availability.available >= required,
                    required,
                    available: availability.available,
                    source: availability,
                })
            })
            .collect::<AppResult<_>>()?;

        let total_available: Decimal = sources.iter().map(|check| check.available).sum();
        Ok(FundingValidation {
            is_sufficient: total_available >= required,
            required,
            total_available,
            sources,
        })
    }
}
