//! CSV format handling for payment-event replay
//!
//! This module centralizes the CSV format concerns of the replay CLI:
//! - `CsvEventRecord` structure for deserialization
//! - Conversion from CSV records to `PaymentEvent`
//! - Wallet summary output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{EarningsError, PaymentEvent, StudentId, TrainerId, TrainerWallet};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the payment-gateway export format with columns:
/// `order_id, trainer, student, amount, plan, timestamp`.
/// The amount is kept as a string so a malformed value produces a
/// line-level error instead of a serde type failure.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvEventRecord {
    pub order_id: String,
    pub trainer: TrainerId,
    pub student: StudentId,
    pub amount: String,
    pub plan: String,
    pub timestamp: String,
}

/// Convert a CsvEventRecord to a PaymentEvent
///
/// Parses and validates the amount; the timestamp is passed through
/// verbatim because the aggregator parses it lazily.
///
/// # Errors
///
/// Returns `ParseError` for a missing or unparsable amount. Amount sign
/// is not checked here; the engine rejects non-positive amounts with
/// `InvalidAmount` so the replay log shows the business error.
pub fn convert_event_record(record: CsvEventRecord) -> Result<PaymentEvent, EarningsError> {
    let raw_amount = record.amount.trim();
    if raw_amount.is_empty() {
        return Err(EarningsError::ParseError {
            line: None,
            message: format!("order {} is missing an amount", record.order_id),
        });
    }

    let amount = Decimal::from_str(raw_amount).map_err(|_| EarningsError::ParseError {
        line: None,
        message: format!("invalid amount '{}' for order {}", raw_amount, record.order_id),
    })?;

    Ok(PaymentEvent {
        trainer: record.trainer,
        student: record.student,
        amount,
        plan_name: record.plan,
        order_id: record.order_id,
        timestamp: record.timestamp,
    })
}

/// Write wallet summaries to CSV format
///
/// Columns: `trainer, total_earnings, total_withdrawn, balance`, sorted
/// by trainer id for deterministic output. Amounts are printed with two
/// decimal places (rupees and paise).
pub fn write_wallets_csv(
    wallets: &[TrainerWallet],
    output: &mut dyn Write,
) -> Result<(), EarningsError> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["trainer", "total_earnings", "total_withdrawn", "balance"])
        .map_err(EarningsError::from)?;

    let mut sorted = wallets.to_vec();
    sorted.sort_by_key(|wallet| wallet.trainer);

    for wallet in sorted {
        writer
            .write_record(&[
                wallet.trainer.to_string(),
                format!("{:.2}", wallet.total_earnings),
                format!("{:.2}", wallet.total_withdrawn),
                format!("{:.2}", wallet.balance),
            ])
            .map_err(EarningsError::from)?;
    }

    writer.flush().map_err(EarningsError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn record(order_id: &str, amount: &str) -> CsvEventRecord {
        CsvEventRecord {
            order_id: order_id.to_string(),
            trainer: 1,
            student: 2,
            amount: amount.to_string(),
            plan: "City Driving".to_string(),
            timestamp: "2025-06-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_convert_valid_record() {
        let event = convert_event_record(record("ORD-1", "1000")).unwrap();

        assert_eq!(event.trainer, 1);
        assert_eq!(event.student, 2);
        assert_eq!(event.amount, Decimal::new(1000, 0));
        assert_eq!(event.plan_name, "City Driving");
        assert_eq!(event.order_id, "ORD-1");
        assert_eq!(event.timestamp, "2025-06-01T10:00:00Z");
    }

    #[rstest]
    #[case::trimmed("  1000.50  ", Decimal::new(100050, 2))]
    #[case::paise("99.99", Decimal::new(9999, 2))]
    fn test_convert_amount_parsing(#[case] raw: &str, #[case] expected: Decimal) {
        let event = convert_event_record(record("ORD-1", raw)).unwrap();
        assert_eq!(event.amount, expected);
    }

    #[rstest]
    #[case::empty("", "missing an amount")]
    #[case::whitespace("   ", "missing an amount")]
    #[case::not_a_number("ten rupees", "invalid amount")]
    fn test_convert_errors(#[case] raw: &str, #[case] expected_error: &str) {
        let result = convert_event_record(record("ORD-1", raw));
        let error = result.unwrap_err();
        assert!(matches!(error, EarningsError::ParseError { .. }));
        assert!(error.to_string().contains(expected_error));
    }

    #[test]
    fn test_negative_amount_passes_parsing() {
        // The engine owns the business validation; conversion only parses
        let event = convert_event_record(record("ORD-1", "-500")).unwrap();
        assert_eq!(event.amount, Decimal::new(-500, 0));
    }

    #[rstest]
    #[case::empty(vec![], "trainer,total_earnings,total_withdrawn,balance\n")]
    #[case::single(
        vec![TrainerWallet {
            trainer: 1,
            balance: Decimal::new(50000, 2),
            total_earnings: Decimal::new(80000, 2),
            total_withdrawn: Decimal::new(30000, 2),
        }],
        "trainer,total_earnings,total_withdrawn,balance\n1,800.00,300.00,500.00\n"
    )]
    #[case::sorted_by_trainer(
        vec![
            TrainerWallet {
                trainer: 2,
                balance: Decimal::new(200, 0),
                total_earnings: Decimal::new(200, 0),
                total_withdrawn: Decimal::ZERO,
            },
            TrainerWallet {
                trainer: 1,
                balance: Decimal::new(100, 0),
                total_earnings: Decimal::new(100, 0),
                total_withdrawn: Decimal::ZERO,
            },
        ],
        "trainer,total_earnings,total_withdrawn,balance\n1,100.00,0.00,100.00\n2,200.00,0.00,200.00\n"
    )]
    fn test_write_wallets_csv(#[case] wallets: Vec<TrainerWallet>, #[case] expected: &str) {
        let mut output = Vec::new();
        write_wallets_csv(&wallets, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }
}
