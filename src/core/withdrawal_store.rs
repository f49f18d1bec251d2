//! Withdrawal request storage
//!
//! This module provides the `WithdrawalStore`, which holds every
//! withdrawal request ever submitted and answers the reservation
//! question: how much of a trainer's balance is already spoken for by
//! outstanding Pending and Approved requests.
//!
//! Requests are never deleted; terminal requests stay for audit.

use crate::types::{
    BankDetails, EarningsError, RequestId, TrainerId, WithdrawalRequest, WithdrawalStatus,
};
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};

/// Store of all withdrawal requests
#[derive(Debug, Default)]
pub struct WithdrawalStore {
    /// Requests by id
    requests: DashMap<RequestId, WithdrawalRequest>,

    /// Monotonic request id counter
    next_id: AtomicU64,
}

impl WithdrawalStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh Pending request
    ///
    /// Callers are expected to have validated the amount against the
    /// trainer's available balance inside the trainer's critical section
    /// before inserting. Returns a copy of the stored request.
    pub fn insert(
        &self,
        trainer: TrainerId,
        amount: Decimal,
        upi_id: String,
        bank_details: Option<BankDetails>,
        reason: Option<String>,
    ) -> WithdrawalRequest {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let request = WithdrawalRequest {
            id,
            trainer,
            amount,
            upi_id,
            bank_details,
            reason,
            status: WithdrawalStatus::Pending,
            request_date: Utc::now(),
            decision_date: None,
        };

        self.requests.insert(id, request.clone());
        request
    }

    /// Get a copy of a request by id
    pub fn get(&self, id: RequestId) -> Option<WithdrawalRequest> {
        self.requests.get(&id).map(|entry| entry.clone())
    }

    /// Update a request under its entry lock
    ///
    /// The closure validates and mutates in one atomic step, so a status
    /// check and the transition it authorizes cannot be separated. If the
    /// closure fails, the request is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `RequestNotFound` for unknown ids; closure errors are
    /// passed through unchanged.
    pub fn update<F>(&self, id: RequestId, f: F) -> Result<WithdrawalRequest, EarningsError>
    where
        F: FnOnce(&mut WithdrawalRequest) -> Result<(), EarningsError>,
    {
        let mut entry = self
            .requests
            .get_mut(&id)
            .ok_or_else(|| EarningsError::request_not_found(id))?;

        // Validate against a copy so a failed closure cannot leave a
        // half-applied mutation behind.
        let mut candidate = entry.clone();
        f(&mut candidate)?;
        *entry.value_mut() = candidate.clone();
        Ok(candidate)
    }

    /// Sum of a trainer's outstanding reservations
    ///
    /// Pending and Approved requests reduce the trainer's available
    /// balance without yet being debited from the ledger.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the reservation sum would overflow.
    pub fn reserved(&self, trainer: TrainerId) -> Result<Decimal, EarningsError> {
        let mut reserved = Decimal::ZERO;
        for entry in self.requests.iter() {
            let request = entry.value();
            if request.trainer == trainer && request.status.reserves_balance() {
                reserved = reserved
                    .checked_add(request.amount)
                    .ok_or_else(|| EarningsError::arithmetic_overflow("reservations", trainer))?;
            }
        }
        Ok(reserved)
    }

    /// All of a trainer's requests, most recent first
    pub fn requests_for(&self, trainer: TrainerId) -> Vec<WithdrawalRequest> {
        let mut requests: Vec<WithdrawalRequest> = self
            .requests
            .iter()
            .filter(|entry| entry.value().trainer == trainer)
            .map(|entry| entry.value().clone())
            .collect();
        requests.sort_by(|a, b| b.id.cmp(&a.id));
        requests
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit(store: &WithdrawalStore, trainer: TrainerId, amount: i64) -> WithdrawalRequest {
        store.insert(
            trainer,
            Decimal::new(amount, 0),
            "trainer@upi".to_string(),
            None,
            None,
        )
    }

    #[test]
    fn test_insert_creates_pending_request() {
        let store = WithdrawalStore::new();

        let request = submit(&store, 1, 1500);

        assert_eq!(request.trainer, 1);
        assert_eq!(request.amount, Decimal::new(1500, 0));
        assert_eq!(request.status, WithdrawalStatus::Pending);
        assert!(request.decision_date.is_none());
        assert_eq!(store.get(request.id), Some(request));
    }

    #[test]
    fn test_insert_assigns_increasing_ids() {
        let store = WithdrawalStore::new();

        let first = submit(&store, 1, 600);
        let second = submit(&store, 1, 700);

        assert!(second.id > first.id);
    }

    #[test]
    fn test_get_unknown_request_is_none() {
        let store = WithdrawalStore::new();
        assert_eq!(store.get(999), None);
    }

    #[test]
    fn test_update_applies_closure() {
        let store = WithdrawalStore::new();
        let request = submit(&store, 1, 600);

        let updated = store
            .update(request.id, |r| {
                r.status = WithdrawalStatus::Approved;
                r.decision_date = Some(Utc::now());
                Ok(())
            })
            .unwrap();

        assert_eq!(updated.status, WithdrawalStatus::Approved);
        assert!(updated.decision_date.is_some());
        assert_eq!(store.get(request.id).unwrap().status, WithdrawalStatus::Approved);
    }

    #[test]
    fn test_update_failure_leaves_request_unchanged() {
        let store = WithdrawalStore::new();
        let request = submit(&store, 1, 600);

        let result = store.update(request.id, |r| {
            // Mutate before failing; the store must discard this
            r.status = WithdrawalStatus::Completed;
            Err(EarningsError::already_completed(r.id))
        });

        assert!(result.is_err());
        assert_eq!(store.get(request.id).unwrap().status, WithdrawalStatus::Pending);
    }

    #[test]
    fn test_update_unknown_request_fails() {
        let store = WithdrawalStore::new();

        let result = store.update(999, |_| Ok(()));
        assert!(matches!(
            result.unwrap_err(),
            EarningsError::RequestNotFound { request: 999 }
        ));
    }

    #[test]
    fn test_reserved_counts_pending_and_approved_only() {
        let store = WithdrawalStore::new();

        let pending = submit(&store, 1, 500);
        let approved = submit(&store, 1, 700);
        let rejected = submit(&store, 1, 900);
        let completed = submit(&store, 1, 1100);
        submit(&store, 2, 10_000); // other trainer, ignored

        store
            .update(approved.id, |r| {
                r.status = WithdrawalStatus::Approved;
                Ok(())
            })
            .unwrap();
        store
            .update(rejected.id, |r| {
                r.status = WithdrawalStatus::Rejected;
                Ok(())
            })
            .unwrap();
        store
            .update(completed.id, |r| {
                r.status = WithdrawalStatus::Completed;
                Ok(())
            })
            .unwrap();

        // Pending 500 + Approved 700
        assert_eq!(store.reserved(1).unwrap(), Decimal::new(1200, 0));
        let _ = pending;
    }

    #[test]
    fn test_reserved_is_zero_for_unknown_trainer() {
        let store = WithdrawalStore::new();
        assert_eq!(store.reserved(42).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_requests_for_returns_most_recent_first() {
        let store = WithdrawalStore::new();

        let first = submit(&store, 1, 500);
        let second = submit(&store, 1, 600);
        submit(&store, 2, 700);

        let requests = store.requests_for(1);
        let ids: Vec<RequestId> = requests.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }
}
