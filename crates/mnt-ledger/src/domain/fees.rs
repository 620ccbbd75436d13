//! # Fee Calculator
//!
//! Proportional transfer fee. The fee is added on top of the nominal amount:
//! the sender pays `amount + fee` and the recipient receives `amount + fee`,
//! so supply is unaffected.

use super::errors::{FeeScheduleError, LedgerError};
use super::value_objects::U256;
use serde::{Deserialize, Serialize};

/// A fee rate `numerator / denominator`, at most 100%.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFeeSchedule")]
pub struct FeeSchedule {
    numerator: u64,
    denominator: u64,
}

#[derive(Deserialize)]
struct RawFeeSchedule {
    numerator: u64,
    denominator: u64,
}

impl TryFrom<RawFeeSchedule> for FeeSchedule {
    type Error = FeeScheduleError;

    fn try_from(raw: RawFeeSchedule) -> Result<Self, Self::Error> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl FeeSchedule {
    /// 2%.
    pub const REFERENCE: Self = Self {
        numerator: 2,
        denominator: 100,
    };

    /// No fee.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Build a schedule, rejecting a zero denominator and rates above 100%.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self, FeeScheduleError> {
        if denominator == 0 {
            return Err(FeeScheduleError::ZeroDenominator);
        }
        if numerator > denominator {
            return Err(FeeScheduleError::RateAboveOne {
                numerator,
                denominator,
            });
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Rate numerator.
    #[must_use]
    pub const fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Rate denominator.
    #[must_use]
    pub const fn denominator(&self) -> u64 {
        self.denominator
    }

    /// `floor(amount * numerator / denominator)`.
    ///
    /// Split as `amount = q * d + r` so that `q * n <= amount` and
    /// `r * n < d * n` both fit in 256 bits.
    #[must_use]
    pub fn fee(&self, amount: U256) -> U256 {
        let numerator = U256::from(self.numerator);
        let denominator = U256::from(self.denominator);
        let quotient = amount / denominator;
        let remainder = amount % denominator;
        quotient * numerator + remainder * numerator / denominator
    }

    /// The fee-inflated amount `amount + fee(amount)` that actually moves.
    pub fn inflate(&self, amount: U256) -> Result<U256, LedgerError> {
        amount
            .checked_add(self.fee(amount))
            .ok_or_else(|| LedgerError::overflow("fee inflation"))
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::REFERENCE
    }
}
