use rust_decimal::Decimal;

use crate::account::schedule::Schedule;
use crate::account::standing::{Standing, Tier};

/// Aggregate state of an account: the schedule it was opened under and its current standing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountState {
    schedule: Schedule,
    standing: Standing,
}

impl Default for AccountState {
    fn default() -> Self {
        Self::new(Schedule::default())
    }
}

impl AccountState {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            standing: Standing::open(&schedule),
            schedule,
        }
    }

    pub const fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub const fn standing(&self) -> &Standing {
        &self.standing
    }

    pub const fn balance(&self) -> Decimal {
        self.standing.balance()
    }

    pub const fn tier(&self) -> Tier {
        self.standing.tier()
    }

    pub(crate) fn with_standing(self, standing: Standing) -> Self {
        Self { standing, ..self }
    }
}
