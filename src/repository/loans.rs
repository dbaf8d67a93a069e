//! Ledger: the repository owning loan records.
//!
//! Pure bookkeeping keyed by item and holder identifiers; it never inspects
//! catalog state. History is append-only: a closed loan stays forever, and
//! the only deletion is the coordinator unwinding a loan it just created
//! whose matching stock write failed.

use std::path::Path;

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::Loan,
    repository::store::{JsonStore, Snapshot},
};

pub struct Ledger {
    store: JsonStore<Loan>,
    loans: Vec<Loan>,
    next_seq: u64,
}

impl Ledger {
    /// Open the ledger backed by the given snapshot file.
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let store = JsonStore::new(path.as_ref());
        let snapshot = store.load()?;
        tracing::info!("Loaded {} loan records", snapshot.records.len());
        Ok(Self {
            store,
            loans: snapshot.records,
            next_seq: snapshot.next_seq,
        })
    }

    /// The unique open loan for an (item, holder) pair, if any. A linear
    /// scan: the at-most-one-open-loan invariant is what we enforce, not
    /// something we assume an index for.
    pub fn find_open(&self, item_id: &str, holder: &str) -> Option<&Loan> {
        self.loans
            .iter()
            .find(|loan| loan.item_id == item_id && loan.holder == holder && loan.is_open())
    }

    /// Record a check-out: allocate a fresh `BR######` identifier, append the
    /// open loan and persist. Fails with `DuplicateLoan` when the pair
    /// already has an open loan. A loan whose snapshot write failed is
    /// unwound from memory; it never became durable.
    pub fn record_check_out(
        &mut self,
        item_id: &str,
        holder: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Loan> {
        if self.find_open(item_id, holder).is_some() {
            return Err(AppError::DuplicateLoan(format!(
                "{} already holds an open loan for {}",
                holder, item_id
            )));
        }

        let loan = Loan {
            id: format!("BR{:06}", self.next_seq),
            item_id: item_id.to_string(),
            holder: holder.to_string(),
            opened_at: now,
            closed_at: None,
        };
        self.next_seq += 1;

        self.loans.push(loan.clone());
        if let Err(e) = self.save() {
            self.loans.pop();
            return Err(e);
        }
        Ok(loan)
    }

    /// Record a check-in: set the close timestamp on the matching open loan
    /// and persist. Fails with `NoOpenLoan` when there is nothing to close.
    pub fn record_check_in(
        &mut self,
        item_id: &str,
        holder: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Loan> {
        let index = self
            .loans
            .iter()
            .position(|loan| loan.item_id == item_id && loan.holder == holder && loan.is_open())
            .ok_or_else(|| {
                AppError::NoOpenLoan(format!("{} has no open loan for {}", holder, item_id))
            })?;

        self.loans[index].closed_at = Some(now);
        if let Err(e) = self.save() {
            self.loans[index].closed_at = None;
            return Err(e);
        }
        Ok(self.loans[index].clone())
    }

    /// Compensation only: delete a loan the coordinator just created, because
    /// the stock write that was supposed to follow it failed.
    pub fn reverse_check_out(&mut self, loan_id: &str) -> AppResult<()> {
        let index = self
            .loans
            .iter()
            .position(|loan| loan.id == loan_id)
            .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", loan_id)))?;

        let removed = self.loans.remove(index);
        if let Err(e) = self.save() {
            self.loans.insert(index, removed);
            return Err(e);
        }
        Ok(())
    }

    /// Compensation only: clear the close timestamp set by a check-in whose
    /// restock write failed. Internal recovery, not a caller-visible
    /// transition.
    pub fn reopen(&mut self, loan_id: &str) -> AppResult<()> {
        let index = self
            .loans
            .iter()
            .position(|loan| loan.id == loan_id)
            .ok_or_else(|| AppError::NotFound(format!("Loan {} not found", loan_id)))?;

        let previous = self.loans[index].closed_at.take();
        if let Err(e) = self.save() {
            self.loans[index].closed_at = previous;
            return Err(e);
        }
        Ok(())
    }

    /// All loans for a holder, open and closed, in insertion order.
    pub fn history_for(&self, holder: &str) -> Vec<Loan> {
        self.loans
            .iter()
            .filter(|loan| loan.holder == holder)
            .cloned()
            .collect()
    }

    /// The holder's loans that are still open.
    pub fn open_loans_for(&self, holder: &str) -> Vec<Loan> {
        self.loans
            .iter()
            .filter(|loan| loan.holder == holder && loan.is_open())
            .cloned()
            .collect()
    }

    /// Whether any holder still has an open loan on the item.
    pub fn has_open_loans_for_item(&self, item_id: &str) -> bool {
        self.loans
            .iter()
            .any(|loan| loan.item_id == item_id && loan.is_open())
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    fn save(&self) -> AppResult<()> {
        self.store.save(&Snapshot {
            next_seq: self.next_seq,
            records: self.loans.clone(),
        })
    }

    /// Test hook: repoint the backing store, e.g. at an unwritable path.
    #[cfg(test)]
    pub(crate) fn redirect_store(&mut self, path: impl Into<std::path::PathBuf>) {
        self.store = JsonStore::new(path.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 1, 10, 0, 0).unwrap()
    }

    fn open_ledger(dir: &tempfile::TempDir) -> Ledger {
        Ledger::open(dir.path().join("loans.json")).unwrap()
    }

    #[test]
    fn check_out_assigns_sequential_ids_and_rejects_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = open_ledger(&dir);

        let first = ledger.record_check_out("BK000001", "alice", now()).unwrap();
        assert_eq!(first.id, "BR000001");
        assert!(first.is_open());

        let err = ledger
            .record_check_out("BK000001", "alice", now())
            .unwrap_err();
        assert!(matches!(err, AppError::DuplicateLoan(_)));

        // Same item, different holder is a different pair.
        let second = ledger.record_check_out("BK000001", "bob", now()).unwrap();
        assert_eq!(second.id, "BR000002");
    }

    #[test]
    fn check_in_closes_exactly_once() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = open_ledger(&dir);

        ledger.record_check_out("BK000001", "alice", now()).unwrap();
        let closed = ledger.record_check_in("BK000001", "alice", now()).unwrap();
        assert!(closed.closed_at.is_some());
        assert!(ledger.find_open("BK000001", "alice").is_none());

        let err = ledger
            .record_check_in("BK000001", "alice", now())
            .unwrap_err();
        assert!(matches!(err, AppError::NoOpenLoan(_)));

        // The closed loan stays in history; checking out again is allowed.
        ledger.record_check_out("BK000001", "alice", now()).unwrap();
        assert_eq!(ledger.history_for("alice").len(), 2);
        assert_eq!(ledger.open_loans_for("alice").len(), 1);
    }

    #[test]
    fn history_survives_reload_and_ids_stay_monotonic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("loans.json");

        {
            let mut ledger = Ledger::open(&path).unwrap();
            ledger.record_check_out("BK000001", "alice", now()).unwrap();
            ledger.record_check_in("BK000001", "alice", now()).unwrap();
        }

        let mut ledger = Ledger::open(&path).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.history_for("alice").len(), 1);

        let next = ledger.record_check_out("BK000002", "alice", now()).unwrap();
        assert_eq!(next.id, "BR000002");
    }

    #[test]
    fn compensation_primitives_unwind_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = open_ledger(&dir);

        let loan = ledger.record_check_out("BK000001", "alice", now()).unwrap();
        ledger.reverse_check_out(&loan.id).unwrap();
        assert!(ledger.is_empty());

        let loan = ledger.record_check_out("BK000001", "alice", now()).unwrap();
        ledger.record_check_in("BK000001", "alice", now()).unwrap();
        ledger.reopen(&loan.id).unwrap();
        assert!(ledger.find_open("BK000001", "alice").is_some());
    }

    #[test]
    fn failed_write_leaves_no_phantom_loan() {
        let dir = tempfile::tempdir().unwrap();
        let mut ledger = open_ledger(&dir);
        ledger.redirect_store(dir.path());

        let err = ledger
            .record_check_out("BK000001", "alice", now())
            .unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
        assert!(ledger.is_empty());
        assert!(ledger.find_open("BK000001", "alice").is_none());
    }
}
