//! Error types for the Trainer Earnings Engine
//!
//! This module defines all error types that can occur while processing
//! payments, withdrawals and payouts. Every failure carries the specific
//! kind and enough context to act on; nothing is reported as a bare
//! boolean.
//!
//! # Error Categories
//!
//! - **Validation errors**: invalid amounts, below-minimum withdrawals
//! - **Balance errors**: insufficient available balance, stale payout amounts
//! - **State-machine errors**: illegal transitions, repeated completion
//! - **Lookup errors**: unknown trainer or request ids
//! - **Aggregation errors**: malformed timestamps (recoverable, skipped)
//! - **Replay I/O errors**: file not found, CSV parse failures

use crate::types::withdrawal::WithdrawalStatus;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the earnings engine
///
/// Validation and state-machine errors never partially mutate state:
/// either the whole transition succeeds, or nothing is written.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EarningsError {
    /// Amount is zero or negative
    ///
    /// Raised by the commission split, ledger appends and withdrawal
    /// submission. Nothing is written.
    #[error("Invalid amount {amount}: must be positive")]
    InvalidAmount {
        /// The offending amount
        amount: Decimal,
    },

    /// Withdrawal amount is below the configured minimum
    #[error("Withdrawal of {amount} is below the minimum of {minimum}")]
    BelowMinimum {
        /// The requested amount
        amount: Decimal,
        /// The configured minimum withdrawal
        minimum: Decimal,
    },

    /// Requested amount exceeds the trainer's available balance
    ///
    /// Available balance is the ledger balance minus the trainer's
    /// outstanding Pending and Approved reservations.
    #[error("Insufficient balance for trainer {trainer}: available {available}, requested {requested}")]
    InsufficientBalance {
        /// Trainer ID
        trainer: u32,
        /// Available balance at decision time
        available: Decimal,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// Attempted an illegal state-machine transition
    ///
    /// The request is left unchanged.
    #[error("Invalid transition for request {request}: {from} -> {to}")]
    InvalidTransition {
        /// Withdrawal request ID
        request: u64,
        /// Status the request is currently in
        from: WithdrawalStatus,
        /// Status the caller tried to move to
        to: WithdrawalStatus,
    },

    /// `complete` called on an already-Completed request
    ///
    /// The first completion already debited the ledger; this call is a
    /// no-op signalled explicitly so callers can distinguish it from a
    /// fresh success.
    #[error("Request {request} is already completed")]
    AlreadyCompleted {
        /// Withdrawal request ID
        request: u64,
    },

    /// Bulk payout amount no longer covered by the recomputed pending amount
    ///
    /// The state changed between display and action; nothing is debited.
    #[error("Stale payout amount for trainer {trainer}: pending {pending}, requested {requested}")]
    StalePayoutAmount {
        /// Trainer ID
        trainer: u32,
        /// Pending amount recomputed at commit time
        pending: Decimal,
        /// Amount the admin tried to pay out
        requested: Decimal,
    },

    /// The trainer's critical section is poisoned
    ///
    /// A writer panicked mid-transition. The call is safe to retry.
    #[error("Concurrent update conflict for trainer {trainer}; retry the operation")]
    ConcurrencyConflict {
        /// Trainer ID
        trainer: u32,
    },

    /// Unknown withdrawal request ID
    #[error("Withdrawal request {request} not found")]
    RequestNotFound {
        /// Withdrawal request ID
        request: u64,
    },

    /// Unknown trainer ID
    ///
    /// A trainer exists once their first sale has been credited.
    #[error("Trainer {trainer} not found")]
    TrainerNotFound {
        /// Trainer ID
        trainer: u32,
    },

    /// Sale timestamp could not be parsed during report aggregation
    ///
    /// Recoverable: the sale is skipped from the monthly buckets and
    /// logged; the report still completes.
    #[error("Malformed timestamp '{timestamp}' on order {order_id}")]
    MalformedTimestamp {
        /// Gateway order ID of the affected sale
        order_id: String,
        /// The raw timestamp value
        timestamp: String,
    },

    /// Arithmetic overflow while folding ledger entries
    #[error("Arithmetic overflow in {operation} for trainer {trainer}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Trainer ID
        trainer: u32,
    },

    /// Replay input file not found
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while reading or writing replay files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error in the replay input
    ///
    /// Recoverable: the malformed row is skipped and replay continues.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

impl From<std::io::Error> for EarningsError {
    fn from(error: std::io::Error) -> Self {
        EarningsError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for EarningsError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        EarningsError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl EarningsError {
    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Decimal) -> Self {
        EarningsError::InvalidAmount { amount }
    }

    /// Create a BelowMinimum error
    pub fn below_minimum(amount: Decimal, minimum: Decimal) -> Self {
        EarningsError::BelowMinimum { amount, minimum }
    }

    /// Create an InsufficientBalance error
    pub fn insufficient_balance(trainer: u32, available: Decimal, requested: Decimal) -> Self {
        EarningsError::InsufficientBalance {
            trainer,
            available,
            requested,
        }
    }

    /// Create an InvalidTransition error
    pub fn invalid_transition(request: u64, from: WithdrawalStatus, to: WithdrawalStatus) -> Self {
        EarningsError::InvalidTransition { request, from, to }
    }

    /// Create an AlreadyCompleted error
    pub fn already_completed(request: u64) -> Self {
        EarningsError::AlreadyCompleted { request }
    }

    /// Create a StalePayoutAmount error
    pub fn stale_payout_amount(trainer: u32, pending: Decimal, requested: Decimal) -> Self {
        EarningsError::StalePayoutAmount {
            trainer,
            pending,
            requested,
        }
    }

    /// Create a ConcurrencyConflict error
    pub fn concurrency_conflict(trainer: u32) -> Self {
        EarningsError::ConcurrencyConflict { trainer }
    }

    /// Create a RequestNotFound error
    pub fn request_not_found(request: u64) -> Self {
        EarningsError::RequestNotFound { request }
    }

    /// Create a TrainerNotFound error
    pub fn trainer_not_found(trainer: u32) -> Self {
        EarningsError::TrainerNotFound { trainer }
    }

    /// Create a MalformedTimestamp error
    pub fn malformed_timestamp(order_id: &str, timestamp: &str) -> Self {
        EarningsError::MalformedTimestamp {
            order_id: order_id.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, trainer: u32) -> Self {
        EarningsError::ArithmeticOverflow {
            operation: operation.to_string(),
            trainer,
        }
    }
}
