//! Withdrawal workflow state machine
//!
//! This module governs a trainer's withdrawal request from submission to
//! payout:
//!
//! ```text
//! Pending -> Approved -> Completed
//! Pending -> Rejected
//! ```
//!
//! A Pending or Approved request is a *reservation*: it reduces the
//! trainer's available balance without yet writing a ledger Debit. The
//! Debit is written exactly once, on the transition into Completed.
//!
//! Submission validates against `available balance = ledger balance -
//! outstanding reservations` inside the trainer's critical section, so of
//! two concurrent submissions whose amounts together exceed the balance,
//! the second always sees the first one's reservation and fails with
//! `InsufficientBalance`.

use crate::core::ledger_store::LedgerStore;
use crate::core::locks::TrainerLocks;
use crate::core::withdrawal_store::WithdrawalStore;
use crate::types::{
    BankDetails, EarningsError, EntryStatus, EntryType, RequestId, TrainerId, WithdrawalRequest,
    WithdrawalStatus,
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Default minimum withdrawal: ₹500
pub const DEFAULT_MIN_WITHDRAWAL: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// State machine driving withdrawal requests
///
/// Shares the ledger, request store and per-trainer locks with the rest
/// of the engine; cheap to clone via the inner Arcs.
#[derive(Debug, Clone)]
pub struct WithdrawalWorkflow {
    ledger: Arc<LedgerStore>,
    requests: Arc<WithdrawalStore>,
    locks: Arc<TrainerLocks>,
    min_withdrawal: Decimal,
}

impl WithdrawalWorkflow {
    /// Create a workflow over shared stores
    pub fn new(
        ledger: Arc<LedgerStore>,
        requests: Arc<WithdrawalStore>,
        locks: Arc<TrainerLocks>,
        min_withdrawal: Decimal,
    ) -> Self {
        WithdrawalWorkflow {
            ledger,
            requests,
            locks,
            min_withdrawal,
        }
    }

    /// A trainer's available balance: ledger balance minus reservations
    ///
    /// Callers that use this figure to authorize a write must invoke it
    /// inside the trainer's critical section; a free-standing call is a
    /// display value only.
    pub fn available_balance(&self, trainer: TrainerId) -> Result<Decimal, EarningsError> {
        let wallet = self.ledger.wallet(trainer)?;
        let reserved = self.requests.reserved(trainer)?;
        Ok(wallet.balance - reserved)
    }

    /// Submit a withdrawal request
    ///
    /// Creates a Pending request — a reservation, not yet a ledger
    /// Debit. Validation and insertion run as one atomic unit per
    /// trainer.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` when `amount <= 0`
    /// - `BelowMinimum` when `amount` is under the configured minimum
    /// - `InsufficientBalance` when `amount` exceeds the available
    ///   balance at decision time
    ///
    /// On any failure, no request is created.
    pub fn submit(
        &self,
        trainer: TrainerId,
        amount: Decimal,
        upi_id: String,
        bank_details: Option<BankDetails>,
        reason: Option<String>,
    ) -> Result<WithdrawalRequest, EarningsError> {
        if amount <= Decimal::ZERO {
            return Err(EarningsError::invalid_amount(amount));
        }
        if amount < self.min_withdrawal {
            return Err(EarningsError::below_minimum(amount, self.min_withdrawal));
        }

        self.locks.with(trainer, || {
            let available = self.available_balance(trainer)?;
            if amount > available {
                return Err(EarningsError::insufficient_balance(
                    trainer, available, amount,
                ));
            }

            let request = self
                .requests
                .insert(trainer, amount, upi_id, bank_details, reason);
            info!(
                request = request.id,
                trainer, %amount, "withdrawal submitted"
            );
            Ok(request)
        })
    }

    /// Approve a Pending request
    ///
    /// Admin intent marker: the reservation remains in effect and nothing
    /// is written to the ledger.
    ///
    /// # Errors
    ///
    /// - `RequestNotFound` for unknown ids
    /// - `InvalidTransition` unless the request is Pending
    pub fn approve(&self, id: RequestId) -> Result<WithdrawalRequest, EarningsError> {
        let trainer = self.trainer_of(id)?;

        self.locks.with(trainer, || {
            let request = self.requests.update(id, |request| {
                if request.status != WithdrawalStatus::Pending {
                    return Err(EarningsError::invalid_transition(
                        id,
                        request.status,
                        WithdrawalStatus::Approved,
                    ));
                }
                request.status = WithdrawalStatus::Approved;
                request.decision_date = Some(Utc::now());
                Ok(())
            })?;
            info!(request = id, trainer, "withdrawal approved");
            Ok(request)
        })
    }

    /// Reject a Pending request
    ///
    /// Terminal: the reservation is released and nothing is written to
    /// the ledger.
    ///
    /// # Errors
    ///
    /// - `RequestNotFound` for unknown ids
    /// - `InvalidTransition` unless the request is Pending
    pub fn reject(&self, id: RequestId) -> Result<WithdrawalRequest, EarningsError> {
        let trainer = self.trainer_of(id)?;

        self.locks.with(trainer, || {
            let request = self.requests.update(id, |request| {
                if request.status != WithdrawalStatus::Pending {
                    return Err(EarningsError::invalid_transition(
                        id,
                        request.status,
                        WithdrawalStatus::Rejected,
                    ));
                }
                request.status = WithdrawalStatus::Rejected;
                request.decision_date = Some(Utc::now());
                Ok(())
            })?;
            info!(request = id, trainer, "withdrawal rejected");
            Ok(request)
        })
    }

    /// Complete an Approved request, debiting the ledger exactly once
    ///
    /// Writes one Successful Debit tagged with the request id, then marks
    /// the request Completed. Both happen inside the trainer's critical
    /// section, so no other transition can interleave.
    ///
    /// # Errors
    ///
    /// - `RequestNotFound` for unknown ids
    /// - `AlreadyCompleted` if the request was completed before; the
    ///   ledger is not debited again
    /// - `InvalidTransition` if the request is Pending or Rejected
    pub fn complete(&self, id: RequestId) -> Result<WithdrawalRequest, EarningsError> {
        let trainer = self.trainer_of(id)?;

        self.locks.with(trainer, || {
            // Re-read under the lock; the unlocked read above only
            // located the trainer.
            let current = self
                .requests
                .get(id)
                .ok_or_else(|| EarningsError::request_not_found(id))?;

            match current.status {
                WithdrawalStatus::Approved => {}
                WithdrawalStatus::Completed => {
                    return Err(EarningsError::already_completed(id));
                }
                other => {
                    return Err(EarningsError::invalid_transition(
                        id,
                        other,
                        WithdrawalStatus::Completed,
                    ));
                }
            }

            // The amount was validated positive at submission, so the
            // append cannot fail validation.
            self.ledger.append(
                trainer,
                EntryType::Debit,
                current.amount,
                EntryStatus::Successful,
                format!("Withdrawal payout to {}", current.upi_id),
                Some(id),
            )?;

            let request = self.requests.update(id, |request| {
                request.status = WithdrawalStatus::Completed;
                request.decision_date = Some(Utc::now());
                Ok(())
            })?;
            info!(
                request = id,
                trainer,
                amount = %request.amount,
                "withdrawal completed"
            );
            Ok(request)
        })
    }

    /// Advance a request to the given status
    ///
    /// Dispatch used by the admin UI. `Pending` is never a legal target:
    /// there is no transition into the initial state.
    pub fn update_status(
        &self,
        id: RequestId,
        new_status: WithdrawalStatus,
    ) -> Result<WithdrawalRequest, EarningsError> {
        match new_status {
            WithdrawalStatus::Approved => self.approve(id),
            WithdrawalStatus::Rejected => self.reject(id),
            WithdrawalStatus::Completed => self.complete(id),
            WithdrawalStatus::Pending => {
                let current = self
                    .requests
                    .get(id)
                    .ok_or_else(|| EarningsError::request_not_found(id))?;
                Err(EarningsError::invalid_transition(
                    id,
                    current.status,
                    WithdrawalStatus::Pending,
                ))
            }
        }
    }

    fn trainer_of(&self, id: RequestId) -> Result<TrainerId, EarningsError> {
        self.requests
            .get(id)
            .map(|request| request.trainer)
            .ok_or_else(|| EarningsError::request_not_found(id))
    }
}
