use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::standing::Tier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountEvent {
    Deposited {
        amount: Decimal,
        balance: Decimal,
    },
    Withdrawn {
        amount: Decimal,
        balance: Decimal,
    },
    /// The withdrawal was refused. `fee_adjusted` is the requested amount less the service fee; it is
    /// recorded but never charged.
    WithdrawalRefused {
        requested: Decimal,
        fee_adjusted: Decimal,
    },
    InterestPaid {
        interest: Decimal,
        balance: Decimal,
    },
    TierChanged {
        from: Tier,
        to: Tier,
    },
}

impl std::fmt::Display for AccountEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountEvent::Deposited { amount, balance } => {
                write!(f, "deposited {:.2}, balance {:.2}", amount, balance)
            }
            AccountEvent::Withdrawn { amount, balance } => {
                write!(f, "withdrew {:.2}, balance {:.2}", amount, balance)
            }
            AccountEvent::WithdrawalRefused { requested, .. } => {
                write!(f, "refused withdrawal of {:.2}: no funds available", requested)
            }
            AccountEvent::InterestPaid { interest, balance } => {
                write!(f, "interest paid {:.2}, balance {:.2}", interest, balance)
            }
            AccountEvent::TierChanged { from, to } => write!(f, "moved from {} to {}", from, to),
        }
    }
}
