//! Trainer Earnings Engine Library
//! # Overview
//!
//! This library is the authoritative core of a driving-school platform's
//! trainer earnings: the commission split, the append-only wallet ledger,
//! the withdrawal approval workflow and the revenue reports.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, LedgerEntry, WithdrawalRequest, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::engine`] - Facade wiring the components together
//!   - [`core::commission`] - Platform/trainer revenue split
//!   - [`core::ledger_store`] - Append-only wallet ledger with derived balances
//!   - [`core::withdrawal`] - Withdrawal workflow state machine
//!   - [`core::payout`] - Admin bulk-payout reconciliation
//!   - [`core::revenue`] - Read-only reporting rollups
//! - [`io`] - CSV handling for the replay CLI
//! - [`replay`] - Payment-event export replay
//!
//! # Design Rules
//!
//! - Balances are always *derived* by folding the ledger; there is no
//!   writable balance field anywhere.
//! - A Pending or Approved withdrawal is a reservation: it reduces the
//!   available balance before any ledger Debit exists.
//! - Every state-changing operation runs inside its trainer's critical
//!   section, so a balance check and the write it authorizes are atomic.
//! - Failures carry their specific kind ([`types::EarningsError`]); no
//!   operation reports a bare boolean.
//!
//! # Withdrawal States
//!
//! ```text
//! Pending -> Approved -> Completed
//! Pending -> Rejected
//! ```
//!
//! Completion writes exactly one ledger Debit; completing twice is
//! refused without a second debit.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod replay;
pub mod types;

pub use crate::core::{
    CommissionCalculator, EarningsEngine, EngineConfig, LedgerStore, PayoutReconciler,
    RevenueAggregator, RevenueSummary, WithdrawalWorkflow,
};
pub use crate::io::write_wallets_csv;
pub use crate::replay::{Replayer, ReplayStats};
pub use crate::types::{
    EarningsError, EntryId, EntryStatus, EntryType, LedgerEntry, PaymentEvent, RequestId,
    TrainerId, TrainerWallet, Transaction, WithdrawalRequest, WithdrawalStatus,
};
