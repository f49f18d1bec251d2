//! Completed-sale log
//!
//! This module provides the `TransactionLog`, the append-only record of
//! completed sales with the commission split applied. The revenue
//! aggregator reads it for totals and monthly trends; nothing ever
//! mutates or deletes a recorded sale.

use crate::core::commission::CommissionSplit;
use crate::types::{PaymentEvent, SaleId, Transaction};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Append-only record of completed sales
#[derive(Debug, Default)]
pub struct TransactionLog {
    /// Sales in arrival order
    sales: RwLock<Vec<Transaction>>,

    /// Monotonic sale id counter
    next_id: AtomicU64,
}

impl TransactionLog {
    /// Create a new empty sale log
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed sale
    ///
    /// Assigns the sale id, applies the already-computed split and appends
    /// the record. Returns a copy of the recorded sale.
    pub fn record(&self, event: PaymentEvent, split: CommissionSplit) -> Transaction {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let sale = Transaction {
            id,
            trainer: event.trainer,
            student: event.student,
            amount: event.amount,
            commission: split.commission,
            trainer_share: split.trainer_share,
            plan_name: event.plan_name,
            order_id: event.order_id,
            timestamp: event.timestamp,
        };

        // Entries are append-only, so a reader interrupted by a writer
        // panic still sees a consistent prefix.
        self.sales
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(sale.clone());
        sale
    }

    /// Snapshot of all recorded sales, in arrival order
    pub fn all(&self) -> Vec<Transaction> {
        self.sales
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded sales
    pub fn len(&self) -> usize {
        self.sales
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no sales have been recorded
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a sale by id
    pub fn get(&self, id: SaleId) -> Option<Transaction> {
        self.sales
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|sale| sale.id == id)
            .cloned()
    }
}
