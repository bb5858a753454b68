use anchor_lang::prelude::*;

#[event]
pub struct LogGenerateRange {
    pub step: u64,
    pub lower_price: u128,
    pub upper_price: u128,
    pub range_token: Pubkey,
    pub ticker: Pubkey,
}

#[event]
pub struct LogInitStepToken {
    pub range_token: Pubkey,
    pub shares: u128,
}

#[event]
pub struct LogStepDeposit {
    pub user: Pubkey,
    pub range_token: Pubkey,
    pub shares: u128,
}

#[event]
pub struct LogStepWithdraw {
    pub user: Pubkey,
    pub range_token: Pubkey,
    pub shares: u128,
    pub amount0: u128,
    pub amount1: u128,
}
