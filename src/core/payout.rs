//! Bulk payout reconciliation
//!
//! This module provides the `PayoutReconciler`, the admin path for paying
//! out accrued-but-unwithdrawn earnings in bulk. The one rule it exists
//! to enforce: the amount is re-validated against a freshly derived
//! pending figure at commit time, never against whatever number the admin
//! screen displayed earlier. If the state moved between display and
//! action, the payout fails with `StalePayoutAmount` instead of
//! over-paying.

use crate::core::ledger_store::LedgerStore;
use crate::core::locks::TrainerLocks;
use crate::core::withdrawal_store::WithdrawalStore;
use crate::types::{EarningsError, EntryId, EntryStatus, EntryType, TrainerId};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Admin bulk-payout path over the shared stores
#[derive(Debug)]
pub struct PayoutReconciler {
    ledger: Arc<LedgerStore>,
    requests: Arc<WithdrawalStore>,
    locks: Arc<TrainerLocks>,

    /// Last bulk payout per trainer
    last_payout: DashMap<TrainerId, DateTime<Utc>>,
}

impl PayoutReconciler {
    /// Create a reconciler over shared stores
    pub fn new(
        ledger: Arc<LedgerStore>,
        requests: Arc<WithdrawalStore>,
        locks: Arc<TrainerLocks>,
    ) -> Self {
        PayoutReconciler {
            ledger,
            requests,
            locks,
            last_payout: DashMap::new(),
        }
    }

    /// Pay out part of a trainer's accrued earnings
    ///
    /// Re-derives the pending amount (`balance - reservations`) inside
    /// the trainer's critical section and commits a Successful Debit only
    /// if it still covers `amount`. Records `last_payout_date` on
    /// success.
    ///
    /// # Errors
    ///
    /// - `InvalidAmount` when `amount <= 0`
    /// - `StalePayoutAmount` when the recomputed pending amount no longer
    ///   covers `amount`; nothing is debited
    pub fn mark_paid(
        &self,
        trainer: TrainerId,
        amount: Decimal,
    ) -> Result<EntryId, EarningsError> {
        if amount <= Decimal::ZERO {
            return Err(EarningsError::invalid_amount(amount));
        }

        self.locks.with(trainer, || {
            let wallet = self.ledger.wallet(trainer)?;
            let reserved = self.requests.reserved(trainer)?;
            let pending = wallet.balance - reserved;

            if amount > pending {
                return Err(EarningsError::stale_payout_amount(
                    trainer, pending, amount,
                ));
            }

            let entry = self.ledger.append(
                trainer,
                EntryType::Debit,
                amount,
                EntryStatus::Successful,
                "Bulk payout of accrued earnings".to_string(),
                None,
            )?;
            self.last_payout.insert(trainer, Utc::now());
            info!(trainer, %amount, entry, "bulk payout committed");
            Ok(entry)
        })
    }

    /// When the trainer last received a bulk payout, if ever
    pub fn last_payout_date(&self, trainer: TrainerId) -> Option<DateTime<Utc>> {
        self.last_payout.get(&trainer).map(|entry| *entry.value())
    }
}
