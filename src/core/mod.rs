//! Core business logic module
//!
//! This module contains the earnings-ledger components:
//! - `commission` - Platform/trainer revenue split
//! - `ledger_store` - Append-only wallet ledger with derived balances
//! - `transaction_log` - Append-only record of completed sales
//! - `locks` - Per-trainer critical sections
//! - `withdrawal_store` - Withdrawal request storage and reservations
//! - `withdrawal` - Withdrawal workflow state machine
//! - `payout` - Admin bulk-payout reconciliation
//! - `revenue` - Read-only reporting rollups
//! - `engine` - Facade wiring the components together

pub mod commission;
pub mod engine;
pub mod ledger_store;
pub mod locks;
pub mod payout;
pub mod revenue;
pub mod transaction_log;
pub mod withdrawal;
pub mod withdrawal_store;

pub use commission::{CommissionCalculator, CommissionSplit};
pub use engine::{EarningsEngine, EngineConfig};
pub use ledger_store::LedgerStore;
pub use locks::TrainerLocks;
pub use payout::PayoutReconciler;
pub use revenue::{MonthlyRevenue, RevenueAggregator, RevenueSummary};
pub use transaction_log::TransactionLog;
pub use withdrawal::WithdrawalWorkflow;
pub use withdrawal_store::WithdrawalStore;
