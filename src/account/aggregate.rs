use rust_decimal::Decimal;

use crate::account::command::AccountCommand;
use crate::account::error::AccountError;
use crate::account::event::AccountEvent;
use crate::account::standing::{Outcome, Standing, Step};
use crate::account::state::AccountState;
use crate::Aggregate;

pub struct AccountAggregate;

impl Aggregate for AccountAggregate {
    const NAME: &'static str = "account";
    type State = AccountState;
    type Command = AccountCommand;
    type Event = AccountEvent;
    type Error = AccountError;

    fn handle_command(state: &Self::State, command: Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        let standing: &Standing = state.standing();
        let schedule = state.schedule();

        let events = match command {
            AccountCommand::Deposit { amount } => {
                ensure_positive(amount)?;
                let step: Step = standing.apply_deposit(amount, schedule)?;
                settled(
                    standing,
                    &step,
                    AccountEvent::Deposited {
                        amount,
                        balance: step.standing.balance(),
                    },
                )
            }
            AccountCommand::Withdraw { amount } => {
                ensure_positive(amount)?;
                let step: Step = standing.apply_withdraw(amount, schedule)?;
                match step.outcome {
                    Outcome::WithdrawalRefused { fee_adjusted } => vec![AccountEvent::WithdrawalRefused {
                        requested: amount,
                        fee_adjusted,
                    }],
                    _ => settled(
                        standing,
                        &step,
                        AccountEvent::Withdrawn {
                            amount,
                            balance: step.standing.balance(),
                        },
                    ),
                }
            }
            AccountCommand::PayInterest => {
                let step: Step = standing.apply_interest(schedule)?;
                match step.outcome {
                    Outcome::NoInterest => vec![],
                    _ => settled(
                        standing,
                        &step,
                        AccountEvent::InterestPaid {
                            interest: step.standing.balance() - standing.balance(),
                            balance: step.standing.balance(),
                        },
                    ),
                }
            }
        };

        tracing::debug!(aggregate = Self::NAME, ?command, ?events, "command decided");

        Ok(events)
    }

    fn apply_event(state: Self::State, payload: Self::Event) -> Self::State {
        let standing: Standing = *state.standing();

        match payload {
            AccountEvent::Deposited { balance, .. }
            | AccountEvent::Withdrawn { balance, .. }
            | AccountEvent::InterestPaid { balance, .. } => state.with_standing(standing.with_balance(balance)),
            AccountEvent::WithdrawalRefused { .. } => state,
            AccountEvent::TierChanged { to, .. } => {
                let entered = Standing::enter(to, standing.balance(), state.schedule());
                state.with_standing(entered)
            }
        }
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), AccountError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        tracing::warn!(%amount, "rejecting non-positive amount");
        Err(AccountError::InvalidAmount(amount))
    }
}

/// The balance event, followed by a tier change when the transition check swapped variants.
fn settled(before: &Standing, step: &Step, event: AccountEvent) -> Vec<AccountEvent> {
    let mut events = vec![event];

    let (from, to) = (before.tier(), step.standing.tier());
    if from != to {
        tracing::info!(%from, %to, balance = %step.standing.balance(), "account changed tier");
        events.push(AccountEvent::TierChanged { from, to });
    }

    events
}
