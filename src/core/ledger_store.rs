//! Append-only wallet ledger
//!
//! This module provides the `LedgerStore`, the authoritative log of wallet
//! entries per trainer. Entries are immutable once written and every
//! balance is derived by folding them on demand — there is no writable
//! balance field to race on independently of the log itself.
//!
//! # Thread Safety
//!
//! The store uses `DashMap` for fine-grained per-trainer locking, so
//! appends and reads for different trainers never block each other. Note
//! that the entry-level lock only makes a *single* append or read atomic;
//! a balance check followed by an append must additionally run inside the
//! trainer's critical section (see `core::locks`).

use crate::types::{
    EarningsError, EntryId, EntryStatus, EntryType, LedgerEntry, RequestId, TrainerId,
    TrainerWallet,
};
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};

/// Append-only log of wallet entries per trainer
#[derive(Debug, Default)]
pub struct LedgerStore {
    /// Entries per trainer, in append (chronological) order
    entries: DashMap<TrainerId, Vec<LedgerEntry>>,

    /// Monotonic entry id counter
    next_id: AtomicU64,
}

impl LedgerStore {
    /// Create a new empty ledger store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to a trainer's ledger
    ///
    /// Entries are immutable once written; there is no update or delete.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` when `amount <= 0`. The sign of an entry is
    /// carried by its type, never by its amount.
    pub fn append(
        &self,
        trainer: TrainerId,
        entry_type: EntryType,
        amount: Decimal,
        status: EntryStatus,
        description: String,
        related_request: Option<RequestId>,
    ) -> Result<EntryId, EarningsError> {
        if amount <= Decimal::ZERO {
            return Err(EarningsError::invalid_amount(amount));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let entry = LedgerEntry {
            id,
            trainer,
            entry_type,
            amount,
            description,
            status,
            related_request,
            timestamp: Utc::now(),
        };

        self.entries.entry(trainer).or_default().push(entry);
        Ok(id)
    }

    /// Compute a trainer's wallet by folding their ledger entries
    ///
    /// Only Successful entries participate: earnings are the sum of
    /// Successful Credits, withdrawals the sum of Successful Debits, and
    /// the balance is their difference. The wallet is recomputed from the
    /// log on every call, never cached.
    ///
    /// A trainer with no ledger history yields an empty wallet; use
    /// [`contains`](Self::contains) to distinguish that from an unknown
    /// trainer.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if a fold would overflow `Decimal`.
    pub fn wallet(&self, trainer: TrainerId) -> Result<TrainerWallet, EarningsError> {
        let mut total_earnings = Decimal::ZERO;
        let mut total_withdrawn = Decimal::ZERO;

        if let Some(entries) = self.entries.get(&trainer) {
            for entry in entries.iter() {
                if entry.status != EntryStatus::Successful {
                    continue;
                }
                match entry.entry_type {
                    EntryType::Credit => {
                        total_earnings = total_earnings.checked_add(entry.amount).ok_or_else(
                            || EarningsError::arithmetic_overflow("wallet fold", trainer),
                        )?;
                    }
                    EntryType::Debit => {
                        total_withdrawn = total_withdrawn.checked_add(entry.amount).ok_or_else(
                            || EarningsError::arithmetic_overflow("wallet fold", trainer),
                        )?;
                    }
                }
            }
        }

        Ok(TrainerWallet {
            trainer,
            balance: total_earnings - total_withdrawn,
            total_earnings,
            total_withdrawn,
        })
    }

    /// List a trainer's entries, most recent first
    ///
    /// `offset` and `limit` make the listing finite and restartable for
    /// paginated statement views.
    pub fn entries_desc(
        &self,
        trainer: TrainerId,
        offset: usize,
        limit: usize,
    ) -> Vec<LedgerEntry> {
        match self.entries.get(&trainer) {
            Some(entries) => entries
                .iter()
                .rev()
                .skip(offset)
                .take(limit)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    /// Whether the trainer has any ledger history
    pub fn contains(&self, trainer: TrainerId) -> bool {
        self.entries.contains_key(&trainer)
    }

    /// All trainer ids with ledger history
    ///
    /// Snapshot for report aggregation; order is arbitrary.
    pub fn trainer_ids(&self) -> Vec<TrainerId> {
        self.entries.iter().map(|entry| *entry.key()).collect()
    }
}
