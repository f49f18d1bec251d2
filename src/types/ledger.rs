//! Ledger entry types for the Trainer Earnings Engine
//!
//! This module defines the append-only wallet ledger entry and the derived
//! wallet view computed by folding a trainer's entries.

use super::transaction::TrainerId;
use super::withdrawal::RequestId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Ledger entry identifier
///
/// Assigned monotonically by the ledger store.
pub type EntryId = u64;

/// Direction of a wallet ledger entry
///
/// Credits are created from a sale's trainer share; Debits are created
/// only when a withdrawal request reaches Completed or an admin commits a
/// bulk payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Funds credited to the trainer's wallet
    Credit,

    /// Funds debited from the trainer's wallet
    Debit,
}

/// Settlement status of a ledger entry
///
/// Only Successful entries participate in balance folds. Pending and
/// Failed entries are retained for audit but carry no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Recorded but not yet settled
    Pending,

    /// Settled; counts toward the balance
    Successful,

    /// Settlement failed; kept for audit only
    Failed,
}

/// Immutable wallet ledger entry
///
/// Entries are append-only: once written they are never mutated or
/// deleted, and every balance is derived by folding them. There is no
/// separately-stored balance field to race on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    /// Ledger entry identifier
    pub id: EntryId,

    /// The trainer this entry belongs to
    pub trainer: TrainerId,

    /// Credit or Debit
    pub entry_type: EntryType,

    /// Entry amount in rupees, always positive; the sign is carried by
    /// `entry_type`
    pub amount: Decimal,

    /// Human-readable description shown in the trainer's statement
    pub description: String,

    /// Settlement status
    pub status: EntryStatus,

    /// The withdrawal request that produced this Debit, if any
    pub related_request: Option<RequestId>,

    /// When the engine recorded the entry
    pub timestamp: DateTime<Utc>,
}

/// Derived wallet view for a trainer
///
/// Never persisted as mutable state: every field is recomputed by folding
/// the trainer's ledger entries, so `total_earnings - total_withdrawn ==
/// balance` holds by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainerWallet {
    /// The trainer this wallet belongs to
    pub trainer: TrainerId,

    /// Current balance (`total_earnings - total_withdrawn`)
    pub balance: Decimal,

    /// Sum of all Successful Credits
    pub total_earnings: Decimal,

    /// Sum of all Successful Debits
    pub total_withdrawn: Decimal,
}

impl TrainerWallet {
    /// Create an empty wallet for a trainer with no ledger history
    pub fn empty(trainer: TrainerId) -> Self {
        TrainerWallet {
            trainer,
            balance: Decimal::ZERO,
            total_earnings: Decimal::ZERO,
            total_withdrawn: Decimal::ZERO,
        }
    }
}
