//! Earnings engine facade
//!
//! This module provides the `EarningsEngine`, which wires the commission
//! calculator, the sale log, the wallet ledger, the withdrawal workflow,
//! the payout reconciler and the revenue aggregator together behind the
//! operations the UI collaborators call.
//!
//! The engine owns the per-trainer critical sections. Every
//! state-changing operation serializes per trainer, so a balance read
//! that authorizes a write can never be stale relative to that write.
//! Read-only queries take no lock.

use crate::core::commission::{CommissionCalculator, DEFAULT_COMMISSION_RATE};
use crate::core::ledger_store::LedgerStore;
use crate::core::locks::TrainerLocks;
use crate::core::payout::PayoutReconciler;
use crate::core::revenue::{RevenueAggregator, RevenueSummary};
use crate::core::transaction_log::TransactionLog;
use crate::core::withdrawal::{WithdrawalWorkflow, DEFAULT_MIN_WITHDRAWAL};
use crate::core::withdrawal_store::WithdrawalStore;
use crate::types::{
    BankDetails, EarningsError, EntryId, EntryStatus, EntryType, LedgerEntry, PaymentEvent,
    RequestId, TrainerId, TrainerWallet, Transaction, WithdrawalRequest, WithdrawalStatus,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Engine configuration
///
/// Invalid values fall back to the defaults rather than failing engine
/// construction: a misconfigured rate must never take payments down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Platform commission rate, in (0, 1)
    pub commission_rate: Decimal,

    /// Minimum withdrawal amount in rupees
    pub min_withdrawal: Decimal,
}

impl EngineConfig {
    /// Create a config, falling back to defaults for out-of-range values
    pub fn new(commission_rate: Decimal, min_withdrawal: Decimal) -> Self {
        let default = EngineConfig::default();
        EngineConfig {
            commission_rate: if commission_rate > Decimal::ZERO && commission_rate < Decimal::ONE {
                commission_rate
            } else {
                default.commission_rate
            },
            min_withdrawal: if min_withdrawal > Decimal::ZERO {
                min_withdrawal
            } else {
                default.min_withdrawal
            },
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            commission_rate: DEFAULT_COMMISSION_RATE,
            min_withdrawal: DEFAULT_MIN_WITHDRAWAL,
        }
    }
}

/// Facade over the earnings ledger and withdrawal workflow
///
/// Cheap to clone: all state lives behind Arcs, and clones share it. The
/// engine is safe to call from multiple threads concurrently.
#[derive(Debug, Clone)]
pub struct EarningsEngine {
    calculator: CommissionCalculator,
    sales: Arc<TransactionLog>,
    ledger: Arc<LedgerStore>,
    locks: Arc<TrainerLocks>,
    workflow: WithdrawalWorkflow,
    reconciler: Arc<PayoutReconciler>,
    aggregator: RevenueAggregator,
}

impl EarningsEngine {
    /// Create an engine with the default configuration
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with the given configuration
    pub fn with_config(config: EngineConfig) -> Self {
        let sales = Arc::new(TransactionLog::new());
        let ledger = Arc::new(LedgerStore::new());
        let requests = Arc::new(WithdrawalStore::new());
        let locks = Arc::new(TrainerLocks::new());

        let workflow = WithdrawalWorkflow::new(
            Arc::clone(&ledger),
            Arc::clone(&requests),
            Arc::clone(&locks),
            config.min_withdrawal,
        );
        let reconciler = Arc::new(PayoutReconciler::new(
            Arc::clone(&ledger),
            Arc::clone(&requests),
            Arc::clone(&locks),
        ));
        let aggregator = RevenueAggregator::new(Arc::clone(&sales), Arc::clone(&ledger));

        EarningsEngine {
            calculator: CommissionCalculator::new(config.commission_rate),
            sales,
            ledger,
            locks,
            workflow,
            reconciler,
            aggregator,
        }
    }

    /// Handle a completed-payment event from the gateway
    ///
    /// Splits the amount, records the sale and credits the trainer's
    /// share to the ledger, all inside the trainer's critical section.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` when the event amount is not positive;
    /// nothing is recorded.
    pub fn on_payment_completed(
        &self,
        event: PaymentEvent,
    ) -> Result<Transaction, EarningsError> {
        let split = self.calculator.split(event.amount)?;
        let trainer = event.trainer;

        self.locks.with(trainer, || {
            let sale = self.sales.record(event, split);
            self.ledger.append(
                trainer,
                EntryType::Credit,
                split.trainer_share,
                EntryStatus::Successful,
                format!(
                    "Earnings from {} (order {})",
                    sale.plan_name, sale.order_id
                ),
                None,
            )?;
            info!(
                sale = sale.id,
                trainer,
                amount = %sale.amount,
                share = %sale.trainer_share,
                "payment credited"
            );
            Ok(sale)
        })
    }

    /// Submit a withdrawal request for a trainer
    ///
    /// See [`WithdrawalWorkflow::submit`].
    pub fn submit_withdrawal(
        &self,
        trainer: TrainerId,
        amount: Decimal,
        upi_id: String,
        bank_details: Option<BankDetails>,
        reason: Option<String>,
    ) -> Result<WithdrawalRequest, EarningsError> {
        self.workflow
            .submit(trainer, amount, upi_id, bank_details, reason)
    }

    /// Advance a withdrawal request to a new status
    ///
    /// See [`WithdrawalWorkflow::update_status`].
    pub fn update_withdrawal_status(
        &self,
        request: RequestId,
        new_status: WithdrawalStatus,
    ) -> Result<WithdrawalRequest, EarningsError> {
        self.workflow.update_status(request, new_status)
    }

    /// Bulk-pay a trainer's accrued earnings
    ///
    /// See [`PayoutReconciler::mark_paid`].
    pub fn mark_payout_paid(
        &self,
        trainer: TrainerId,
        amount: Decimal,
    ) -> Result<EntryId, EarningsError> {
        self.reconciler.mark_paid(trainer, amount)
    }

    /// When the trainer last received a bulk payout, if ever
    pub fn last_payout_date(&self, trainer: TrainerId) -> Option<DateTime<Utc>> {
        self.reconciler.last_payout_date(trainer)
    }

    /// Derived wallet for a trainer
    ///
    /// # Errors
    ///
    /// Returns `TrainerNotFound` for a trainer with no ledger history; a
    /// trainer exists once their first sale has been credited.
    pub fn get_wallet(&self, trainer: TrainerId) -> Result<TrainerWallet, EarningsError> {
        if !self.ledger.contains(trainer) {
            return Err(EarningsError::trainer_not_found(trainer));
        }
        self.ledger.wallet(trainer)
    }

    /// A trainer's ledger entries, most recent first
    ///
    /// `offset`/`limit` make the listing restartable for paginated
    /// statement views.
    ///
    /// # Errors
    ///
    /// Returns `TrainerNotFound` for a trainer with no ledger history.
    pub fn list_transactions(
        &self,
        trainer: TrainerId,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<LedgerEntry>, EarningsError> {
        if !self.ledger.contains(trainer) {
            return Err(EarningsError::trainer_not_found(trainer));
        }
        Ok(self.ledger.entries_desc(trainer, offset, limit))
    }

    /// Platform-wide revenue report
    pub fn get_revenue_summary(&self) -> Result<RevenueSummary, EarningsError> {
        self.aggregator.summary()
    }

    /// Wallets of every trainer with ledger history, sorted by trainer id
    ///
    /// Used by the replay CLI for its summary output.
    pub fn wallets(&self) -> Result<Vec<TrainerWallet>, EarningsError> {
        let mut trainers = self.ledger.trainer_ids();
        trainers.sort_unstable();
        trainers
            .into_iter()
            .map(|trainer| self.ledger.wallet(trainer))
            .collect()
    }
}

impl Default for EarningsEngine {
    fn default() -> Self {
        Self::new()
    }
}
