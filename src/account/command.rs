use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountCommand {
    Deposit { amount: Decimal },
    Withdraw { amount: Decimal },
    PayInterest,
}
