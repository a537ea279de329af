use rust_decimal::Decimal;

use tiered_account::account::{Account, Tier};

#[test]
fn reaching_exactly_the_standard_upper_limit_stays_standard() {
    let mut account = Account::new("owner");

    let receipt = account.deposit(Decimal::from(1000)).unwrap();
    assert_eq!(receipt.balance, Decimal::from(1000));
    assert_eq!(receipt.tier, Tier::Standard);

    let receipt = account.deposit(Decimal::new(1, 2)).unwrap();
    assert_eq!(receipt.balance, Decimal::new(100001, 2));
    assert_eq!(receipt.tier, Tier::Premium);
}

#[test]
fn withdrawing_to_exactly_zero_stays_standard() {
    let mut account = Account::new("owner");
    account.deposit(Decimal::from(250)).unwrap();

    let receipt = account.withdraw(Decimal::from(250)).unwrap();
    assert_eq!(receipt.tier, Tier::Standard);

    let receipt = account.withdraw(Decimal::new(1, 2)).unwrap();
    assert_eq!(receipt.balance, Decimal::new(-1, 2));
    assert_eq!(receipt.tier, Tier::Overdrawn);
}

#[test]
fn recovering_to_exactly_zero_stays_overdrawn() {
    let mut account = Account::new("owner");
    account.withdraw(Decimal::from(30)).unwrap();

    let receipt = account.deposit(Decimal::from(30)).unwrap();
    assert_eq!(receipt.balance, Decimal::ZERO);
    assert_eq!(receipt.tier, Tier::Overdrawn);

    let receipt = account.deposit(Decimal::new(1, 2)).unwrap();
    assert_eq!(receipt.tier, Tier::Standard);
}

#[test]
fn premium_keeps_its_tier_exactly_on_the_lower_limit() {
    let mut account = Account::new("owner");
    account.deposit(Decimal::from(1500)).unwrap();

    let receipt = account.withdraw(Decimal::from(500)).unwrap();
    assert_eq!(receipt.balance, Decimal::from(1000));
    assert_eq!(receipt.tier, Tier::Premium);

    let receipt = account.withdraw(Decimal::new(1, 2)).unwrap();
    assert_eq!(receipt.tier, Tier::Standard);
}
