use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::error::AccountError;
use crate::account::schedule::{Band, Schedule};

/// Tag of a [`Standing`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    Overdrawn,
    Standard,
    Premium,
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::Overdrawn => write!(f, "Overdrawn"),
            Tier::Standard => write!(f, "Standard"),
            Tier::Premium => write!(f, "Premium"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overdrawn {
    pub balance: Decimal,
    pub band: Band,
    pub service_fee: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Standard {
    pub balance: Decimal,
    pub band: Band,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Premium {
    pub balance: Decimal,
    pub band: Band,
}

/// The active tier of an account together with its balance and the thresholds it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    Overdrawn(Overdrawn),
    Standard(Standard),
    Premium(Premium),
}

/// What a dispatch did to the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Withdrawals are refused while overdrawn. The fee-adjusted amount is computed and discarded.
    WithdrawalRefused { fee_adjusted: Decimal },
    /// Overdrawn accounts earn nothing and skip the transition check.
    NoInterest,
}

/// Result of dispatching one operation: the standing after the transition check, and the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub standing: Standing,
    pub outcome: Outcome,
}

impl Step {
    const fn applied(standing: Standing) -> Self {
        Self {
            standing,
            outcome: Outcome::Applied,
        }
    }
}

impl Standing {
    /// New accounts start as Standard with nothing in them.
    pub fn open(schedule: &Schedule) -> Self {
        Self::enter(Tier::Standard, Decimal::ZERO, schedule)
    }

    /// Builds a fresh variant of `tier`, carrying `balance` over as is.
    pub fn enter(tier: Tier, balance: Decimal, schedule: &Schedule) -> Self {
        match tier {
            Tier::Overdrawn => Standing::Overdrawn(Overdrawn {
                balance,
                band: schedule.overdrawn.band,
                service_fee: schedule.overdrawn.service_fee,
            }),
            Tier::Standard => Standing::Standard(Standard {
                balance,
                band: schedule.standard,
            }),
            Tier::Premium => Standing::Premium(Premium {
                balance,
                band: schedule.premium,
            }),
        }
    }

    pub const fn tier(&self) -> Tier {
        match self {
            Standing::Overdrawn(_) => Tier::Overdrawn,
            Standing::Standard(_) => Tier::Standard,
            Standing::Premium(_) => Tier::Premium,
        }
    }

    pub const fn balance(&self) -> Decimal {
        match self {
            Standing::Overdrawn(Overdrawn { balance, .. })
            | Standing::Standard(Standard { balance, .. })
            | Standing::Premium(Premium { balance, .. }) => *balance,
        }
    }

    pub const fn band(&self) -> &Band {
        match self {
            Standing::Overdrawn(Overdrawn { band, .. })
            | Standing::Standard(Standard { band, .. })
            | Standing::Premium(Premium { band, .. }) => band,
        }
    }

    /// Same variant, same band, new balance. No transition check.
    #[must_use]
    pub fn with_balance(self, balance: Decimal) -> Self {
        match self {
            Standing::Overdrawn(state) => Standing::Overdrawn(Overdrawn { balance, ..state }),
            Standing::Standard(state) => Standing::Standard(Standard { balance, ..state }),
            Standing::Premium(state) => Standing::Premium(Premium { balance, ..state }),
        }
    }

    /// Credits `amount`, then runs the transition check. Fails only when the balance cannot be represented.
    pub fn apply_deposit(&self, amount: Decimal, schedule: &Schedule) -> Result<Step, AccountError> {
        let balance = self.balance().checked_add(amount).ok_or(AccountError::Overflow)?;
        Ok(Step::applied(self.with_balance(balance).settle(schedule)))
    }

    pub fn apply_withdraw(&self, amount: Decimal, schedule: &Schedule) -> Result<Step, AccountError> {
        match self {
            Standing::Overdrawn(overdrawn) => Ok(Step {
                standing: *self,
                outcome: Outcome::WithdrawalRefused {
                    fee_adjusted: amount.checked_sub(overdrawn.service_fee).ok_or(AccountError::Overflow)?,
                },
            }),
            Standing::Standard(_) | Standing::Premium(_) => {
                let balance = self.balance().checked_sub(amount).ok_or(AccountError::Overflow)?;
                Ok(Step::applied(self.with_balance(balance).settle(schedule)))
            }
        }
    }

    pub fn apply_interest(&self, schedule: &Schedule) -> Result<Step, AccountError> {
        match self {
            Standing::Overdrawn(_) => Ok(Step {
                standing: *self,
                outcome: Outcome::NoInterest,
            }),
            Standing::Standard(Standard { balance, band }) | Standing::Premium(Premium { balance, band }) => {
                let balance = band
                    .interest_rate
                    .checked_mul(*balance)
                    .and_then(|interest| balance.checked_add(interest))
                    .ok_or(AccountError::Overflow)?;
                Ok(Step::applied(self.with_balance(balance).settle(schedule)))
            }
        }
    }

    /// Transition check against the band this standing was built with. Comparisons are strict: a
    /// balance sitting exactly on a limit stays where it is.
    #[must_use]
    pub fn settle(self, schedule: &Schedule) -> Self {
        let balance = self.balance();
        let band = *self.band();

        match self.tier() {
            Tier::Overdrawn if balance > band.upper_limit => Self::enter(Tier::Standard, balance, schedule),
            Tier::Standard if balance < band.lower_limit => Self::enter(Tier::Overdrawn, balance, schedule),
            Tier::Standard if balance > band.upper_limit => Self::enter(Tier::Premium, balance, schedule),
            Tier::Premium if balance < Decimal::ZERO => Self::enter(Tier::Overdrawn, balance, schedule),
            Tier::Premium if balance < band.lower_limit => Self::enter(Tier::Standard, balance, schedule),
            _ => self,
        }
    }
}
