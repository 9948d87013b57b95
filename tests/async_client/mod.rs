mod balances_and_shield;
mod transport;
