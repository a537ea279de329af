//! A bank account whose behavior depends on its balance tier.
//!
//! Every operation is forwarded to the active [`Standing`]: the standing computes the new balance and
//! then decides, with strict comparisons against its own band, whether the account moves to another
//! tier. Negative balances are legal and are what puts an account in the Overdrawn tier.

use std::fmt::{Display, Formatter};

use rust_decimal::Decimal;
use uuid::Uuid;

pub use aggregate::AccountAggregate;
pub use command::AccountCommand;
pub use error::AccountError;
pub use event::AccountEvent;
pub use schedule::{Band, OverdrawnTerms, Schedule};
pub use standing::{Outcome, Standing, Step, Tier};
pub use state::AccountState;
pub use statement::Statement;

use crate::{Aggregate, AggregateState};

mod aggregate;
mod command;
mod error;
mod event;
mod schedule;
mod standing;
mod state;
mod statement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Deposit,
    Withdraw,
    PayInterest,
}

/// What the caller gets back after each operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub operation: Operation,
    pub amount: Option<Decimal>,
    pub balance: Decimal,
    pub tier: Tier,
    /// `false` when the active tier refused the operation and left the balance alone.
    pub applied: bool,
    pub message: String,
}

impl Display for Receipt {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} --- ", self.message)?;
        writeln!(f, " Balance = {:.2}", self.balance)?;
        writeln!(f, " Status = {}", self.tier)
    }
}

/// The account context. It owns exactly one standing at a time; only applied events replace it.
#[derive(Debug, Clone)]
pub struct Account {
    owner: String,
    state: AggregateState<AccountState>,
}

impl Account {
    /// Opens a Standard account with a zero balance under the default schedule.
    pub fn new(owner: impl Into<String>) -> Self {
        Self::with_schedule(owner, Schedule::default())
    }

    pub fn with_schedule(owner: impl Into<String>, schedule: Schedule) -> Self {
        Self {
            owner: owner.into(),
            state: AggregateState::with_inner(Uuid::new_v4(), AccountState::new(schedule)),
        }
    }

    pub fn id(&self) -> &Uuid {
        self.state.id()
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn balance(&self) -> Decimal {
        self.state.inner().balance()
    }

    pub fn tier(&self) -> Tier {
        self.state.inner().tier()
    }

    pub fn state(&self) -> &AggregateState<AccountState> {
        &self.state
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Receipt, AccountError> {
        self.execute(AccountCommand::Deposit { amount }).map(|(receipt, _)| receipt)
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<Receipt, AccountError> {
        self.execute(AccountCommand::Withdraw { amount }).map(|(receipt, _)| receipt)
    }

    pub fn pay_interest(&mut self) -> Result<Receipt, AccountError> {
        self.execute(AccountCommand::PayInterest).map(|(receipt, _)| receipt)
    }

    /// Runs `command` against the active standing and applies the resulting events.
    ///
    /// The events are handed back so that a caller keeping a journal can persist exactly what was applied.
    pub fn execute(&mut self, command: AccountCommand) -> Result<(Receipt, Vec<AccountEvent>), AccountError> {
        let (operation, amount) = match command {
            AccountCommand::Deposit { amount } => (Operation::Deposit, Some(amount)),
            AccountCommand::Withdraw { amount } => (Operation::Withdraw, Some(amount)),
            AccountCommand::PayInterest => (Operation::PayInterest, None),
        };

        let events: Vec<AccountEvent> = AccountAggregate::handle_command(self.state.inner(), command)?;
        let (applied, message) = describe(operation, amount, &events);

        self.state = self
            .state
            .clone()
            .apply_events(events.clone(), AccountAggregate::apply_event);

        tracing::debug!(
            owner = %self.owner,
            aggregate_id = %self.state.id(),
            balance = %self.balance(),
            tier = %self.tier(),
            applied,
            "account operation"
        );

        let receipt = Receipt {
            operation,
            amount,
            balance: self.balance(),
            tier: self.tier(),
            applied,
            message,
        };

        Ok((receipt, events))
    }
}

fn describe(operation: Operation, amount: Option<Decimal>, events: &[AccountEvent]) -> (bool, String) {
    let amount = amount.unwrap_or_default();

    match (operation, events.first()) {
        (_, Some(AccountEvent::WithdrawalRefused { .. })) => (false, "No funds available for withdrawal!".to_string()),
        (Operation::PayInterest, None) => (false, "No interest is paid while overdrawn".to_string()),
        (Operation::Deposit, _) => (true, format!("Deposited {:.2}", amount)),
        (Operation::Withdraw, _) => (true, format!("Withdrew {:.2}", amount)),
        (Operation::PayInterest, _) => (true, "Interest Paid".to_string()),
    }
}
