use std::rc::Rc;

use rust_decimal::Decimal;
use uuid::Uuid;

use tiered_account::account::{
    Account, AccountAggregate, AccountCommand, AccountError, AccountEvent, AccountState, Statement, Tier,
};
use tiered_account::{AggregateManager, AggregateState, EventStore, InMemoryStore, ManagerError, StoreError};

type AccountManager = AggregateManager<AccountAggregate, InMemoryStore<AccountAggregate>>;

fn script() -> Vec<AccountCommand> {
    vec![
        AccountCommand::Deposit {
            amount: Decimal::from(490),
        },
        AccountCommand::Deposit {
            amount: Decimal::from(390),
        },
        AccountCommand::Deposit {
            amount: Decimal::from(540),
        },
        AccountCommand::PayInterest,
        AccountCommand::Withdraw {
            amount: Decimal::from(2200),
        },
        AccountCommand::Withdraw {
            amount: Decimal::from(1300),
        },
    ]
}

fn run_script(manager: &mut AccountManager) -> AggregateState<AccountState> {
    script()
        .into_iter()
        .fold(AggregateState::new(), |state, command| {
            manager.handle_command(state, command).unwrap()
        })
}

#[test]
fn handle_command_persists_every_fact() {
    let mut manager: AccountManager = AggregateManager::new(InMemoryStore::new());

    let state = run_script(&mut manager);

    assert_eq!(state.inner().balance(), Decimal::from(-709));
    assert_eq!(state.inner().tier(), Tier::Overdrawn);

    let payloads: Vec<AccountEvent> = manager
        .event_store()
        .by_aggregate_id(*state.id())
        .unwrap()
        .into_iter()
        .map(|event| event.payload)
        .collect();

    assert_eq!(
        payloads,
        vec![
            AccountEvent::Deposited {
                amount: Decimal::from(490),
                balance: Decimal::from(490),
            },
            AccountEvent::Deposited {
                amount: Decimal::from(390),
                balance: Decimal::from(880),
            },
            AccountEvent::Deposited {
                amount: Decimal::from(540),
                balance: Decimal::from(1420),
            },
            AccountEvent::TierChanged {
                from: Tier::Standard,
                to: Tier::Premium,
            },
            AccountEvent::InterestPaid {
                interest: Decimal::from(71),
                balance: Decimal::from(1491),
            },
            AccountEvent::Withdrawn {
                amount: Decimal::from(2200),
                balance: Decimal::from(-709),
            },
            AccountEvent::TierChanged {
                from: Tier::Premium,
                to: Tier::Overdrawn,
            },
            AccountEvent::WithdrawalRefused {
                requested: Decimal::from(1300),
                fee_adjusted: Decimal::from(1285),
            },
        ]
    );
    assert_eq!(*state.sequence_number(), 8);
}

#[test]
fn load_replays_to_the_live_state() {
    let mut manager: AccountManager = AggregateManager::new(InMemoryStore::new());
    let state = run_script(&mut manager);

    let loaded = manager.load(*state.id()).unwrap().unwrap();

    assert_eq!(loaded.id(), state.id());
    assert_eq!(loaded.sequence_number(), state.sequence_number());
    assert_eq!(loaded.inner(), state.inner());
}

#[test]
fn manager_and_account_agree() {
    let mut manager: AccountManager = AggregateManager::new(InMemoryStore::new());
    let state = run_script(&mut manager);

    let mut account = Account::new("owner");
    account.deposit(Decimal::from(490)).unwrap();
    account.deposit(Decimal::from(390)).unwrap();
    account.deposit(Decimal::from(540)).unwrap();
    account.pay_interest().unwrap();
    account.withdraw(Decimal::from(2200)).unwrap();
    account.withdraw(Decimal::from(1300)).unwrap();

    assert_eq!(account.state().inner(), state.inner());
    assert_eq!(account.state().sequence_number(), state.sequence_number());
}

#[test]
fn load_of_unknown_aggregate_is_none() {
    let manager: AccountManager = AggregateManager::new(InMemoryStore::new());

    assert!(manager.load(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn rejected_command_persists_nothing() {
    let mut manager: AccountManager = AggregateManager::new(InMemoryStore::new());
    let state: AggregateState<AccountState> = AggregateState::new();
    let id = *state.id();

    let result = manager.handle_command(
        state,
        AccountCommand::Withdraw {
            amount: Decimal::ZERO,
        },
    );

    assert!(matches!(
        result,
        Err(ManagerError::Aggregate(AccountError::InvalidAmount(_)))
    ));
    assert!(manager.load(id).unwrap().is_none());
}

#[test]
fn stale_state_is_a_store_conflict() {
    let mut manager: AccountManager = AggregateManager::new(InMemoryStore::new());
    let state: AggregateState<AccountState> = AggregateState::new();
    let deposit = AccountCommand::Deposit {
        amount: Decimal::from(10),
    };

    manager.handle_command(state.clone(), deposit).unwrap();
    let result = manager.handle_command(state, deposit);

    assert!(matches!(
        result,
        Err(ManagerError::Store(StoreError::SequenceConflict { .. }))
    ));
}

#[test]
fn statement_receives_every_persisted_event() {
    let statement: Rc<Statement> = Rc::new(Statement::new());
    let mut manager: AccountManager = AggregateManager::new(InMemoryStore::new());
    manager.add_event_handler(statement.clone());

    let state = run_script(&mut manager);
    let lines = statement.lines_for(state.id());

    assert_eq!(lines.len(), 8);
    assert!(lines[0].starts_with("#1 "));
    assert!(lines[0].ends_with("deposited 490.00, balance 490.00"));
    assert!(lines[3].ends_with("moved from Standard to Premium"));
    assert!(lines[7].ends_with("refused withdrawal of 1300.00: no funds available"));
}

#[test]
fn delete_drops_events_and_statement_lines() {
    let statement: Rc<Statement> = Rc::new(Statement::new());
    let mut manager: AccountManager = AggregateManager::new(InMemoryStore::new());
    manager.add_event_handler(statement.clone());

    let state = run_script(&mut manager);
    let id = *state.id();

    manager.delete(id).unwrap();

    assert!(manager.load(id).unwrap().is_none());
    assert!(statement.lines_for(&id).is_empty());
}

#[test]
fn manager_error_forwards_message_of_the_wrapped_error() {
    let mut manager: AccountManager = AggregateManager::new(InMemoryStore::new());
    let state: AggregateState<AccountState> = AggregateState::new();
    let deposit = AccountCommand::Deposit {
        amount: Decimal::from(10),
    };

    let rejected = manager
        .handle_command(
            state.clone(),
            AccountCommand::Deposit {
                amount: Decimal::from(-3),
            },
        )
        .unwrap_err();
    assert_eq!(rejected.to_string(), AccountError::InvalidAmount(Decimal::from(-3)).to_string());

    manager.handle_command(state.clone(), deposit).unwrap();
    let conflict = manager.handle_command(state, deposit).unwrap_err();
    assert!(conflict.to_string().starts_with("sequence conflict on aggregate"));

    let as_error: &dyn std::error::Error = &conflict;
    assert!(as_error.source().is_none());
}

#[test]
fn account_events_stored_as_they_are_applied_share_one_history() {
    let statement: Rc<Statement> = Rc::new(Statement::new());
    let mut manager: AccountManager = AggregateManager::new(InMemoryStore::new());
    manager.add_event_handler(statement.clone());

    let mut account = Account::new("owner");
    let mut receipts = vec![];
    for command in script() {
        let before = account.state().clone();
        let (receipt, events) = account.execute(command).unwrap();
        manager.store_events(&before, events).unwrap();
        receipts.push(receipt);
    }

    assert_eq!(receipts.len(), 6);
    assert!(!receipts[5].applied);

    let lines = statement.lines_for(account.id());
    assert_eq!(lines.len(), 8);
    assert!(lines[7].ends_with("refused withdrawal of 1300.00: no funds available"));

    let loaded = manager.load(*account.id()).unwrap().unwrap();
    assert_eq!(loaded.inner(), account.state().inner());
    assert_eq!(loaded.sequence_number(), account.state().sequence_number());
}
