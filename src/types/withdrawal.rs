//! Withdrawal request types for the Trainer Earnings Engine
//!
//! This module defines the withdrawal request record and its status
//! state machine. A Pending or Approved request is a *reservation*: it
//! reduces the trainer's available balance without yet writing a ledger
//! Debit, so two competing requests cannot double-spend the same funds.

use super::transaction::TrainerId;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Withdrawal request identifier
///
/// Assigned monotonically by the withdrawal store.
pub type RequestId = u64;

/// Status of a withdrawal request
///
/// Legal transitions:
///
/// ```text
/// Pending -> Approved -> Completed
/// Pending -> Rejected
/// ```
///
/// Rejected and Completed are terminal. Any other transition is refused
/// with `InvalidTransition` and leaves the request unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WithdrawalStatus {
    /// Submitted by the trainer, awaiting an admin decision
    Pending,

    /// Accepted by an admin; the reservation remains until payout
    Approved,

    /// Declined by an admin; the reservation is released
    Rejected,

    /// Paid out; exactly one ledger Debit exists for this request
    Completed,
}

impl WithdrawalStatus {
    /// Whether this status admits no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, WithdrawalStatus::Rejected | WithdrawalStatus::Completed)
    }

    /// Whether a request in this status reserves available balance
    pub fn reserves_balance(self) -> bool {
        matches!(self, WithdrawalStatus::Pending | WithdrawalStatus::Approved)
    }
}

impl fmt::Display for WithdrawalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WithdrawalStatus::Pending => "pending",
            WithdrawalStatus::Approved => "approved",
            WithdrawalStatus::Rejected => "rejected",
            WithdrawalStatus::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Bank account details optionally attached to a withdrawal request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BankDetails {
    /// Name on the account
    pub account_holder: String,

    /// Bank account number
    pub account_number: String,

    /// IFSC branch code
    pub ifsc: String,
}

/// A trainer's withdrawal request
///
/// Created Pending by trainer action; its status advances only through
/// the transitions defined on [`WithdrawalStatus`]; never deleted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithdrawalRequest {
    /// Withdrawal request identifier
    pub id: RequestId,

    /// The trainer who requested the withdrawal
    pub trainer: TrainerId,

    /// Requested amount in rupees
    pub amount: Decimal,

    /// UPI address the payout should be sent to
    pub upi_id: String,

    /// Optional bank account fallback
    pub bank_details: Option<BankDetails>,

    /// Optional free-text reason supplied by the trainer
    pub reason: Option<String>,

    /// Current state-machine status
    pub status: WithdrawalStatus,

    /// When the trainer submitted the request
    pub request_date: DateTime<Utc>,

    /// When an admin last acted on the request; restamped on every
    /// transition
    pub decision_date: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(WithdrawalStatus::Pending, false, true)]
    #[case(WithdrawalStatus::Approved, false, true)]
    #[case(WithdrawalStatus::Rejected, true, false)]
    #[case(WithdrawalStatus::Completed, true, false)]
    fn test_status_predicates(
        #[case] status: WithdrawalStatus,
        #[case] terminal: bool,
        #[case] reserves: bool,
    ) {
        assert_eq!(status.is_terminal(), terminal);
        assert_eq!(status.reserves_balance(), reserves);
    }

    #[rstest]
    #[case(WithdrawalStatus::Pending, "pending")]
    #[case(WithdrawalStatus::Approved, "approved")]
    #[case(WithdrawalStatus::Rejected, "rejected")]
    #[case(WithdrawalStatus::Completed, "completed")]
    fn test_status_display(#[case] status: WithdrawalStatus, #[case] expected: &str) {
        assert_eq!(status.to_string(), expected);
    }
}
