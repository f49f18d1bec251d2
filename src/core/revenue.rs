//! Revenue reporting rollups
//!
//! This module provides the `RevenueAggregator`, the read-only reporting
//! side of the engine: platform-wide totals and a monthly revenue trend
//! over the sale log, plus the sum of balances not yet paid out.
//!
//! Reports are snapshots and tolerate eventual consistency; they are
//! never the basis for an authorization decision. A sale whose gateway
//! timestamp fails to parse is excluded from the monthly buckets and
//! logged — one bad record cannot abort a report.

use crate::core::ledger_store::LedgerStore;
use crate::core::transaction_log::TransactionLog;
use crate::types::{EarningsError, Transaction};
use chrono::{DateTime, Datelike};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Revenue for one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    /// Calendar year
    pub year: i32,

    /// Calendar month, 1-12
    pub month: u32,

    /// Gross sale revenue recorded in that month
    pub revenue: Decimal,
}

/// Platform-wide revenue report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueSummary {
    /// Σ sale amounts
    pub total_revenue: Decimal,

    /// Σ platform commissions
    pub total_commission: Decimal,

    /// Σ trainer shares
    pub total_trainer_earnings: Decimal,

    /// Σ wallet balances not yet withdrawn or paid out
    pub pending_payouts: Decimal,

    /// Revenue per calendar month, oldest first
    pub monthly_revenue: Vec<MonthlyRevenue>,
}

/// Read-only rollups over the sale log and ledger
#[derive(Debug, Clone)]
pub struct RevenueAggregator {
    sales: Arc<TransactionLog>,
    ledger: Arc<LedgerStore>,
}

impl RevenueAggregator {
    /// Create an aggregator over shared stores
    pub fn new(sales: Arc<TransactionLog>, ledger: Arc<LedgerStore>) -> Self {
        RevenueAggregator { sales, ledger }
    }

    /// Build the platform-wide revenue report
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if a balance fold overflows. Sales
    /// with malformed timestamps are skipped from the monthly buckets and
    /// logged at `warn`; they still count toward the totals.
    pub fn summary(&self) -> Result<RevenueSummary, EarningsError> {
        let mut total_revenue = Decimal::ZERO;
        let mut total_commission = Decimal::ZERO;
        let mut total_trainer_earnings = Decimal::ZERO;
        let mut months: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();

        for sale in self.sales.all() {
            total_revenue += sale.amount;
            total_commission += sale.commission;
            total_trainer_earnings += sale.trainer_share;

            match sale_month(&sale) {
                Ok(key) => {
                    *months.entry(key).or_insert(Decimal::ZERO) += sale.amount;
                }
                Err(error) => {
                    // Recoverable: the sale keeps its totals but cannot
                    // be bucketed into a month.
                    warn!(sale = sale.id, "{error}");
                }
            }
        }

        let mut pending_payouts = Decimal::ZERO;
        for trainer in self.ledger.trainer_ids() {
            pending_payouts += self.ledger.wallet(trainer)?.balance;
        }

        let monthly_revenue = months
            .into_iter()
            .map(|((year, month), revenue)| MonthlyRevenue {
                year,
                month,
                revenue,
            })
            .collect();

        Ok(RevenueSummary {
            total_revenue,
            total_commission,
            total_trainer_earnings,
            pending_payouts,
            monthly_revenue,
        })
    }
}

/// Calendar month of a sale, from its gateway timestamp
fn sale_month(sale: &Transaction) -> Result<(i32, u32), EarningsError> {
    let parsed = DateTime::parse_from_rfc3339(&sale.timestamp)
        .map_err(|_| EarningsError::malformed_timestamp(&sale.order_id, &sale.timestamp))?;
    Ok((parsed.year(), parsed.month()))
}
