use std::error::Error;
use std::rc::Rc;

use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use tiered_account::account::{Account, AccountAggregate, AccountCommand, Schedule, Statement};
use tiered_account::{AggregateManager, InMemoryStore};

fn schedule() -> Result<Schedule, Box<dyn Error>> {
    match std::env::var("ACCOUNT_SCHEDULE") {
        Ok(path) => {
            tracing::info!(%path, "loading schedule");
            Ok(Schedule::from_json(&std::fs::read_to_string(path)?)?)
        }
        Err(_) => Ok(Schedule::default()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("\n======================================================== START\n");

    let mut account: Account = Account::with_schedule("Reynald Adolphe", schedule()?);

    let statement: Rc<Statement> = Rc::new(Statement::new());
    let mut manager: AggregateManager<AccountAggregate, InMemoryStore<AccountAggregate>> =
        AggregateManager::new(InMemoryStore::new());
    manager.add_event_handler(statement.clone());

    println!("===> Opened an account for {}\n", account.owner());

    let commands = [
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
    ];

    for command in commands {
        let before = account.state().clone();
        let (receipt, events) = account.execute(command)?;
        manager.store_events(&before, events)?;

        println!("{}", receipt);
    }

    println!("===> Statement for {}", account.owner());
    for line in statement.lines_for(account.id()) {
        println!("  {}", line);
    }

    if let Some(replayed) = manager.load(*account.id())? {
        println!(
            "\n===> Replayed balance is {:.2} ({})",
            replayed.inner().balance(),
            replayed.inner().tier()
        );
    }

    println!("\n======================================================== FINISHED\n");

    Ok(())
}
