//! Circulation: the coordinator for check-out and check-in.
//!
//! The one component aware of both the Catalog and the Ledger. Each
//! operation performs two independently-persisted writes with no shared
//! transaction, so ordering and compensation carry the consistency
//! contract: the cheaper, reversible Ledger write goes first, and a failure
//! of the second write triggers an explicit compensating action against the
//! first.

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::Loan,
    services::SharedRepository,
};

#[derive(Clone)]
pub struct CirculationService {
    repository: SharedRepository,
}

impl CirculationService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    /// Check one unit of an item out to a holder.
    ///
    /// Validation order: `ItemNotFound`, `OutOfStock`, `DuplicateLoan`. The
    /// duplicate check happens here as well as in the Ledger, because the
    /// coordinator must decide the ordering of the two mutations before
    /// committing either. Then the loan is recorded first and the stock
    /// decrement second; if the stock write fails, the just-created loan is
    /// unwound before the failure is returned.
    pub fn check_out(&self, item_id: &str, holder: &str) -> AppResult<Loan> {
        let mut repo = self
            .repository
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let item = repo
            .catalog
            .get(item_id)
            .cloned()
            .ok_or_else(|| AppError::ItemNotFound(format!("Item {} not found", item_id)))?;

        if item.quantity == 0 {
            return Err(AppError::OutOfStock(format!(
                "No copies of {} available",
                item_id
            )));
        }

        if repo.ledger.find_open(item_id, holder).is_some() {
            return Err(AppError::DuplicateLoan(format!(
                "{} already holds an open loan for {}",
                holder, item_id
            )));
        }

        let loan = repo.ledger.record_check_out(item_id, holder, Utc::now())?;

        let mut updated = item;
        updated.quantity -= 1;
        if let Err(e) = repo.catalog.update(updated) {
            // Compensate: the loan became durable but the stock decrement
            // did not. Unwind the loan so the two stores keep agreeing.
            if let Err(unwind) = repo.ledger.reverse_check_out(&loan.id) {
                tracing::error!(
                    "Integrity alarm: loan {} could not be unwound after a failed \
                     stock write for {}: {}",
                    loan.id,
                    item_id,
                    unwind
                );
            }
            return Err(e);
        }

        tracing::info!("{} checked out {} as {}", holder, item_id, loan.id);
        Ok(loan)
    }

    /// Check a unit back in, closing the holder's open loan.
    ///
    /// The loan is closed first and the stock increment follows; if the
    /// restock write fails the loan is reopened, since a unit that is
    /// physically back must never stay recorded as on loan.
    pub fn check_in(&self, item_id: &str, holder: &str) -> AppResult<Loan> {
        let mut repo = self
            .repository
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if repo.ledger.find_open(item_id, holder).is_none() {
            return Err(AppError::NoOpenLoan(format!(
                "{} has no open loan for {}",
                holder, item_id
            )));
        }

        let item = repo.catalog.get(item_id).cloned().ok_or_else(|| {
            // The loan references an item the catalog no longer has.
            tracing::error!(
                "Integrity anomaly: open loan for missing item {}",
                item_id
            );
            AppError::ItemNotFound(format!("Item {} not found", item_id))
        })?;

        let loan = repo.ledger.record_check_in(item_id, holder, Utc::now())?;

        let mut updated = item;
        updated.quantity += 1;
        if let Err(e) = repo.catalog.update(updated) {
            if let Err(reopen) = repo.ledger.reopen(&loan.id) {
                tracing::error!(
                    "Integrity alarm: loan {} could not be reopened after a failed \
                     restock write for {}: {}",
                    loan.id,
                    item_id,
                    reopen
                );
            }
            return Err(e);
        }

        tracing::info!("{} checked in {} closing {}", holder, item_id, loan.id);
        Ok(loan)
    }

    /// All loans for a holder, open and closed, in insertion order.
    pub fn history_for(&self, holder: &str) -> Vec<Loan> {
        let repo = self
            .repository
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        repo.ledger.history_for(holder)
    }

    /// The holder's currently open loans.
    pub fn open_loans_for(&self, holder: &str) -> Vec<Loan> {
        let repo = self
            .repository
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        repo.ledger.open_loans_for(holder)
    }
}
