//! Commission split calculation
//!
//! This module computes the platform/trainer revenue split for a completed
//! sale. The commission is rounded half-up to the nearest whole rupee and
//! the trainer share is defined as the exact complement, so the two always
//! sum back to the original amount with no rounding leak.

use crate::types::EarningsError;
use rust_decimal::{Decimal, RoundingStrategy};

/// Default platform commission rate: 20% of every sale
pub const DEFAULT_COMMISSION_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 2);

/// Result of splitting a sale amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommissionSplit {
    /// Platform commission, rounded half-up to the whole rupee
    pub commission: Decimal,

    /// Trainer's share: `amount - commission`, never rounded independently
    pub trainer_share: Decimal,
}

/// Computes the platform/trainer split of a sale amount
///
/// The calculator is pure: it holds only the configured rate and touches
/// no shared state.
#[derive(Debug, Clone, Copy)]
pub struct CommissionCalculator {
    rate: Decimal,
}

impl CommissionCalculator {
    /// Create a calculator with the given commission rate
    ///
    /// Rates outside the open interval (0, 1) fall back to the default
    /// rate, matching the fallback behavior of the engine configuration.
    pub fn new(rate: Decimal) -> Self {
        let rate = if rate > Decimal::ZERO && rate < Decimal::ONE {
            rate
        } else {
            DEFAULT_COMMISSION_RATE
        };
        CommissionCalculator { rate }
    }

    /// The configured commission rate
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Split a sale amount into platform commission and trainer share
    ///
    /// The commission is `amount * rate` rounded half-up to the nearest
    /// whole rupee; the trainer share is the complement. This guarantees
    /// `commission + trainer_share == amount` exactly for every input.
    ///
    /// # Errors
    ///
    /// Returns `InvalidAmount` when `amount <= 0`.
    pub fn split(&self, amount: Decimal) -> Result<CommissionSplit, EarningsError> {
        if amount <= Decimal::ZERO {
            return Err(EarningsError::invalid_amount(amount));
        }

        let commission = (amount * self.rate)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let trainer_share = amount - commission;

        Ok(CommissionSplit {
            commission,
            trainer_share,
        })
    }
}

impl Default for CommissionCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_COMMISSION_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::round_sum(Decimal::new(1000, 0), Decimal::new(200, 0), Decimal::new(800, 0))]
    #[case::half_rounds_up(Decimal::new(9999, 0), Decimal::new(2000, 0), Decimal::new(7999, 0))]
    #[case::small_amount(Decimal::new(1, 0), Decimal::ZERO, Decimal::new(1, 0))]
    #[case::paise_amount(Decimal::new(10050, 2), Decimal::new(20, 0), Decimal::new(8050, 2))]
    #[case::below_half_rounds_down(Decimal::new(9990, 0), Decimal::new(1998, 0), Decimal::new(7992, 0))]
    fn test_split_cases(
        #[case] amount: Decimal,
        #[case] expected_commission: Decimal,
        #[case] expected_share: Decimal,
    ) {
        let calc = CommissionCalculator::default();
        let split = calc.split(amount).unwrap();

        assert_eq!(split.commission, expected_commission);
        assert_eq!(split.trainer_share, expected_share);
    }

    #[rstest]
    #[case(Decimal::new(9999, 0))]
    #[case(Decimal::new(1, 0))]
    #[case(Decimal::new(12345678, 2))]
    #[case(Decimal::new(333, 0))]
    #[case(Decimal::new(999999999, 0))]
    fn test_split_sum_invariant(#[case] amount: Decimal) {
        let calc = CommissionCalculator::default();
        let split = calc.split(amount).unwrap();

        assert_eq!(split.commission + split.trainer_share, amount);
    }

    #[rstest]
    #[case(Decimal::ZERO)]
    #[case(Decimal::new(-100, 0))]
    fn test_split_rejects_non_positive_amounts(#[case] amount: Decimal) {
        let calc = CommissionCalculator::default();
        let result = calc.split(amount);

        assert!(matches!(
            result.unwrap_err(),
            EarningsError::InvalidAmount { .. }
        ));
    }

    #[test]
    fn test_custom_rate() {
        // 10% of 1000 = 100
        let calc = CommissionCalculator::new(Decimal::new(10, 2));
        let split = calc.split(Decimal::new(1000, 0)).unwrap();

        assert_eq!(split.commission, Decimal::new(100, 0));
        assert_eq!(split.trainer_share, Decimal::new(900, 0));
    }

    #[rstest]
    #[case::zero_rate(Decimal::ZERO)]
    #[case::negative_rate(Decimal::new(-20, 2))]
    #[case::full_rate(Decimal::ONE)]
    #[case::above_one(Decimal::new(150, 2))]
    fn test_out_of_range_rate_falls_back_to_default(#[case] rate: Decimal) {
        let calc = CommissionCalculator::new(rate);
        assert_eq!(calc.rate(), DEFAULT_COMMISSION_RATE);
    }
}
