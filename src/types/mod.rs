//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Payment events and completed-sale records
//! - `ledger`: Wallet ledger entries and the derived wallet view
//! - `withdrawal`: Withdrawal requests and their status state machine
//! - `error`: Error types for the earnings engine

pub mod error;
pub mod ledger;
pub mod transaction;
pub mod withdrawal;

pub use error::EarningsError;
pub use ledger::{EntryId, EntryStatus, EntryType, LedgerEntry, TrainerWallet};
pub use transaction::{PaymentEvent, SaleId, StudentId, TrainerId, Transaction};
pub use withdrawal::{BankDetails, RequestId, WithdrawalRequest, WithdrawalStatus};
