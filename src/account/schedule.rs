use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::error::AccountError;

/// The balance band a tier owns, together with the interest it pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub interest_rate: Decimal,
    pub lower_limit: Decimal,
    pub upper_limit: Decimal,
}

impl Band {
    pub const fn new(interest_rate: Decimal, lower_limit: Decimal, upper_limit: Decimal) -> Self {
        Self {
            interest_rate,
            lower_limit,
            upper_limit,
        }
    }

    fn validate(&self, tier: &str) -> Result<(), AccountError> {
        if self.interest_rate.is_sign_negative() {
            return Err(AccountError::InvalidSchedule(format!(
                "{tier} interest rate {} is negative",
                self.interest_rate
            )));
        }

        if self.lower_limit > self.upper_limit {
            return Err(AccountError::InvalidSchedule(format!(
                "{tier} lower limit {} is above upper limit {}",
                self.lower_limit, self.upper_limit
            )));
        }

        Ok(())
    }
}

/// Overdrawn band plus the fee charged against withdrawal attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverdrawnTerms {
    #[serde(flatten)]
    pub band: Band,
    pub service_fee: Decimal,
}

/// Thresholds for every tier. A standing built from a schedule keeps its band until the next
/// tier change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub overdrawn: OverdrawnTerms,
    pub standard: Band,
    pub premium: Band,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            overdrawn: OverdrawnTerms {
                band: Band::new(Decimal::ZERO, Decimal::from(-100), Decimal::ZERO),
                service_fee: Decimal::from(15),
            },
            standard: Band::new(Decimal::ZERO, Decimal::ZERO, Decimal::from(1000)),
            premium: Band::new(Decimal::new(5, 2), Decimal::from(1000), Decimal::from(10_000_000)),
        }
    }
}

impl Schedule {
    /// Parses and validates a schedule from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, AccountError> {
        let schedule: Self = serde_json::from_str(json)?;
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn validate(&self) -> Result<(), AccountError> {
        self.overdrawn.band.validate("overdrawn")?;
        self.standard.validate("standard")?;
        self.premium.validate("premium")?;

        // Adjacent bands meet exactly.
        if self.overdrawn.band.upper_limit != self.standard.lower_limit {
            return Err(AccountError::InvalidSchedule(format!(
                "overdrawn upper limit {} does not meet standard lower limit {}",
                self.overdrawn.band.upper_limit, self.standard.lower_limit
            )));
        }

        if self.standard.upper_limit != self.premium.lower_limit {
            return Err(AccountError::InvalidSchedule(format!(
                "standard upper limit {} does not meet premium lower limit {}",
                self.standard.upper_limit, self.premium.lower_limit
            )));
        }

        if self.overdrawn.service_fee.is_sign_negative() {
            return Err(AccountError::InvalidSchedule(format!(
                "overdrawn service fee {} is negative",
                self.overdrawn.service_fee
            )));
        }

        Ok(())
    }
}
