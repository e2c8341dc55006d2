//! Transaction group lifecycle operations.

use chrono::Utc;
use tracing::{error, info};

use botica_core::funding::{available_amount, validate_funding_source};
use botica_core::ledger::{
    bump_group_number, next_group_number, validate_entries, CreateDraftInput, DraftPatch, Entry,
    EntryInput, GroupStatus, LedgerError, TransactionFilter, TransactionGroup,
};
use botica_shared::types::{EntryId, GroupId, PageRequest, PageResponse, Scope};
use botica_shared::AppResult;
use rust_decimal::Decimal;

use crate::memory::{Inner, MemoryLedger};

impl MemoryLedger {
    /// Creates a draft transaction group: validates the entries, resolves
    /// every account, checks the funding source's remaining capacity, and
    /// issues the next group number with collision retry.
    ///
    /// # Errors
    ///
    /// Returns a [`LedgerError`] mapped into `AppError` on any failed
    /// validation; nothing is persisted in that case.
    pub fn create_draft(&self, input: CreateDraftInput) -> AppResult<TransactionGroup> {
        let totals = validate_entries(&input.entries)?;

        let mut inner = self.write();

        resolve_accounts(&inner, input.scope, &input.entries)?;

        if let Some(source_id) = input.source_transaction_id {
            check_funding(
                &inner,
                input.scope,
                source_id,
                totals.total_amount(),
                Decimal::ZERO,
            )?;
        }

        let group_number = self.issue_group_number(&mut inner, input.transaction_date)?;

        let now = Utc::now();
        let id = GroupId::new();
        let entries = materialize_entries(id, &input.entries);
        let group = TransactionGroup {
            id,
            group_number,
            scope: input.scope,
            description: input.description,
            transaction_date: input.transaction_date,
            total_amount: totals.total_amount(),
            receipt_url: input.receipt_url,
            invoice_number: input.invoice_number,
            status: GroupStatus::Draft,
            funding_type: input.funding_type,
            source_transaction_id: input.source_transaction_id,
            entries,
            created_at: now,
            updated_at: now,
        };

        inner.groups.insert(group.id, group.clone());
        info!(
            group_id = %group.id,
            group_number = %group.group_number,
            total = %group.total_amount,
            "draft created"
        );
        Ok(group)
    }

    /// Applies a partial update to a draft. A replacement entry set is
    /// validated and re-totaled atomically with the rest of the patch, and
    /// the funding source is re-checked against the new total.
    ///
    /// # Errors
    ///
    /// Fails with a state error when the group is no longer a draft; the
    /// group is untouched on any failure.
    pub fn update_draft(
        &self,
        scope: Scope,
        id: GroupId,
        patch: DraftPatch,
    ) -> AppResult<TransactionGroup> {
        let mut inner = self.write();

        let group = find_group(&inner, scope, id)?;
        if !group.is_editable() {
            return Err(LedgerError::Immutable {
                status: group.status,
            }
            .into());
        }
        let old_total = group.total_amount;
        let source_id = group.source_transaction_id;

        // Validate the replacement entries before mutating anything.
        let new_entries = match &patch.entries {
            Some(entries) => {
                let totals = validate_entries(entries)?;
                resolve_accounts(&inner, scope, entries)?;
                if let Some(source_id) = source_id {
                    // The draft's own reservation is released by the edit.
                    check_funding(&inner, scope, source_id, totals.total_amount(), old_total)?;
                }
                Some((materialize_entries(id, entries), totals.total_amount()))
            }
            None => None,
        };

        let group = find_group_mut(&mut inner, scope, id)?;
        if let Some(description) = patch.description {
            group.description = description;
        }
        if let Some(transaction_date) = patch.transaction_date {
            // The group number keeps its original date segment.
            group.transaction_date = transaction_date;
        }
        if let Some(receipt_url) = patch.receipt_url {
            group.receipt_url = receipt_url;
        }
        if let Some(invoice_number) = patch.invoice_number {
            group.invoice_number = invoice_number;
        }
        if let Some((entries, total)) = new_entries {
            group.entries = entries;
            group.total_amount = total;
        }
        group.updated_at = Utc::now();

        info!(group_id = %id, "draft updated");
        Ok(group.clone())
    }

    /// Confirms a draft, posting it to the ledger. Runs as a status
    /// check-and-set under the write lock: the draft is re-validated, the
    /// funding source re-checked, and only then does the status flip and
    /// the cached account balances absorb the entries.
    ///
    /// # Errors
    ///
    /// Fails with a state error on a non-draft group and never partially
    /// applies.
    pub fn confirm_transaction(&self, scope: Scope, id: GroupId) -> AppResult<TransactionGroup> {
        let mut inner = self.write();

        let group = find_group(&inner, scope, id)?;
        match group.status {
            GroupStatus::Draft => {}
            GroupStatus::Confirmed => return Err(LedgerError::AlreadyConfirmed.into()),
            GroupStatus::Cancelled => return Err(LedgerError::Cancelled.into()),
        }

        // The draft may have been edited since creation; validate again.
        let inputs: Vec<EntryInput> = group
            .entries
            .iter()
            .map(|entry| EntryInput {
                account_id: entry.account_id,
                leg: entry.leg,
                category: entry.category.clone(),
                memo: entry.memo.clone(),
            })
            .collect();
        let totals = validate_entries(&inputs)?;
        resolve_accounts(&inner, scope, &inputs)?;

        if let Some(source_id) = group.source_transaction_id {
            // This draft already reserves its own total among the
            // source's dependents; do not count it against itself.
            check_funding(&inner, scope, source_id, totals.total_amount(), group.total_amount)?;
        }

        let entries = group.entries.clone();
        let group = find_group_mut(&mut inner, scope, id)?;
        group.status = GroupStatus::Confirmed;
        group.updated_at = Utc::now();
        let confirmed = group.clone();

        // Fold the posting into the cached running balances.
        for entry in &entries {
            if let Some(account) = inner.accounts.get_mut(&entry.account_id) {
                account.balance += entry.leg.signed_toward(account.normal_balance);
                account.updated_at = Utc::now();
            }
        }

        info!(
            group_id = %id,
            group_number = %confirmed.group_number,
            total = %confirmed.total_amount,
            "transaction confirmed"
        );
        Ok(confirmed)
    }

    /// Cancels a draft, keeping the record for audit. Confirmed groups
    /// cannot be cancelled; corrections are a new compensating draft.
    ///
    /// # Errors
    ///
    /// Fails with a state error on a non-draft group.
    pub fn cancel_transaction(&self, scope: Scope, id: GroupId) -> AppResult<TransactionGroup> {
        let mut inner = self.write();

        let group = find_group_mut(&mut inner, scope, id)?;
        if !group.is_editable() {
            return Err(LedgerError::Immutable {
                status: group.status,
            }
            .into());
        }

        group.status = GroupStatus::Cancelled;
        group.updated_at = Utc::now();
        let cancelled = group.clone();
        info!(group_id = %id, "transaction cancelled");
        Ok(cancelled)
    }

    /// Physically removes a draft. Its group number stays retired.
    ///
    /// # Errors
    ///
    /// Fails with a state error on a non-draft group.
    pub fn delete_draft(&self, scope: Scope, id: GroupId) -> AppResult<()> {
        let mut inner = self.write();

        let group = find_group(&inner, scope, id)?;
        if !group.is_editable() {
            return Err(LedgerError::Immutable {
                status: group.status,
            }
            .into());
        }

        inner.groups.remove(&id);
        info!(group_id = %id, "draft deleted");
        Ok(())
    }

    /// Fetches a transaction group by id within a scope.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist in the scope.
    pub fn get_transaction(&self, scope: Scope, id: GroupId) -> AppResult<TransactionGroup> {
        let inner = self.read();
        Ok(find_group(&inner, scope, id)?.clone())
    }

    /// Lists transaction groups matching the filter, newest first by
    /// effective date, paginated.
    #[must_use]
    pub fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: &PageRequest,
    ) -> PageResponse<TransactionGroup> {
        let inner = self.read();
        let mut matching: Vec<TransactionGroup> = inner
            .groups
            .values()
            .filter(|group| filter.scope.map_or(true, |scope| group.scope == scope))
            .filter(|group| filter.status.map_or(true, |status| group.status == status))
            .filter(|group| {
                filter
                    .funding_type
                    .map_or(true, |funding_type| group.funding_type == funding_type)
            })
            .filter(|group| {
                filter
                    .date_from
                    .map_or(true, |from| group.transaction_date >= from)
            })
            .filter(|group| filter.date_to.map_or(true, |to| group.transaction_date <= to))
            .cloned()
            .collect();
        drop(inner);

        matching.sort_by(|a, b| {
            b.transaction_date
                .cmp(&a.transaction_date)
                .then(b.created_at.cmp(&a.created_at))
        });

        let per_page = if page.per_page == 0 {
            self.config.default_page_size
        } else {
            page.per_page
        };
        let effective = PageRequest {
            page: page.page,
            per_page,
        };

        let total = matching.len() as u64;
        let data: Vec<TransactionGroup> = matching
            .into_iter()
            .skip(effective.offset())
            .take(effective.limit())
            .collect();
        PageResponse::new(data, effective.page, per_page, total)
    }

    /// Issues the next unused group number for a date, bumping the
    /// sequence on collision up to the configured retry limit.
    fn issue_group_number(
        &self,
        inner: &mut Inner,
        date: chrono::NaiveDate,
    ) -> AppResult<String> {
        let mut number =
            next_group_number(date, inner.issued_numbers.iter().map(String::as_str))?;
        let mut attempts: u32 = 1;
        while inner.issued_numbers.contains(&number) {
            if attempts >= self.config.number_retry_limit {
                let err = LedgerError::NumberRetriesExhausted { attempts };
                error!(number = %number, error_code = err.error_code(), "group number generation exhausted retries");
                return Err(err.into());
            }
            number = bump_group_number(&number)?;
            attempts += 1;
        }
        inner.issued_numbers.insert(number.clone());
        Ok(number)
    }
}

/// Checks every entry against the chart: the account must exist in the
/// scope and be active.
fn resolve_accounts(inner: &Inner, scope: Scope, entries: &[EntryInput]) -> AppResult<()> {
    for entry in entries {
        let account = inner
            .accounts
            .get(&entry.account_id)
            .filter(|account| account.scope == scope)
            .ok_or(LedgerError::UnknownAccount(entry.account_id))?;
        if !account.is_active() {
            return Err(LedgerError::AccountInactive(entry.account_id).into());
        }
    }
    Ok(())
}

/// Checks that a funding source can cover `required`, with
/// `already_reserved` backing out the requesting draft's own reservation.
fn check_funding(
    inner: &Inner,
    scope: Scope,
    source_id: GroupId,
    required: Decimal,
    already_reserved: Decimal,
) -> AppResult<()> {
    let source = inner
        .groups
        .get(&source_id)
        .filter(|group| group.scope == scope)
        .ok_or(LedgerError::GroupNotFound(source_id))?;

    let dependents = inner
        .groups
        .values()
        .filter(|group| group.source_transaction_id == Some(source_id));
    let availability = available_amount(source, dependents);
    validate_funding_source(source, &availability, required, already_reserved)?;
    Ok(())
}

fn find_group<'a>(
    inner: &'a Inner,
    scope: Scope,
    id: GroupId,
) -> Result<&'a TransactionGroup, LedgerError> {
    inner
        .groups
        .get(&id)
        .filter(|group| group.scope == scope)
        .ok_or(LedgerError::GroupNotFound(id))
}

fn find_group_mut<'a>(
    inner: &'a mut Inner,
    scope: Scope,
    id: GroupId,
) -> Result<&'a mut TransactionGroup, LedgerError> {
    inner
        .groups
        .get_mut(&id)
        .filter(|group| group.scope == scope)
        .ok_or(LedgerError::GroupNotFound(id))
}

/// Builds persisted entries from inputs, assigning 1-based sequences.
fn materialize_entries(group_id: GroupId, inputs: &[EntryInput]) -> Vec<Entry> {
    inputs
        .iter()
        .enumerate()
        .map(|(index, input)| Entry {
            id: EntryId::new(),
            group_id,
            sequence: index as u32 + 1,
            account_id: input.account_id,
            leg: input.leg,
            category: input.category.clone(),
            memo: input.memo.clone(),
        })
        .collect()
}
