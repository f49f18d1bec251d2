//! Sale transaction types for the Trainer Earnings Engine
//!
//! This module defines the payment event consumed from the payment gateway
//! and the immutable sale record the engine derives from it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Trainer identifier
///
/// Supports trainer IDs from 0 to 4,294,967,295
pub type TrainerId = u32;

/// Student identifier
///
/// Supports student IDs from 0 to 4,294,967,295
pub type StudentId = u32;

/// Sale transaction identifier, assigned by the engine
pub type SaleId = u64;

/// Completed-payment event received from the payment gateway
///
/// This is the inbound boundary of the engine: the gateway reports a
/// completed subscription sale and the engine turns it into a
/// [`Transaction`] plus a Credit ledger entry for the trainer's share.
///
/// The timestamp is carried verbatim as the gateway sent it (RFC 3339
/// wall-clock). It is parsed lazily by the revenue aggregator so a
/// malformed value can never reject a payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentEvent {
    /// The trainer whose plan was purchased
    pub trainer: TrainerId,

    /// The student who paid
    pub student: StudentId,

    /// Gross sale amount in rupees
    pub amount: Decimal,

    /// Name of the subscription plan that was purchased
    pub plan_name: String,

    /// Gateway-assigned order identifier
    pub order_id: String,

    /// Gateway wall-clock timestamp, RFC 3339
    pub timestamp: String,
}

/// Immutable record of a completed sale
///
/// Created exactly once from a [`PaymentEvent`] with the commission split
/// applied; never mutated or deleted afterwards. The invariant
/// `commission + trainer_share == amount` holds for every record because
/// the trainer share is computed as the complement of the rounded
/// commission, never rounded independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Engine-assigned sale identifier
    pub id: SaleId,

    /// The trainer whose plan was purchased
    pub trainer: TrainerId,

    /// The student who paid
    pub student: StudentId,

    /// Gross sale amount in rupees
    pub amount: Decimal,

    /// Platform commission taken from the sale
    pub commission: Decimal,

    /// Trainer's share of the sale (`amount - commission`)
    pub trainer_share: Decimal,

    /// Name of the subscription plan that was purchased
    pub plan_name: String,

    /// Gateway-assigned order identifier
    pub order_id: String,

    /// Gateway wall-clock timestamp, carried verbatim from the event
    pub timestamp: String,
}
