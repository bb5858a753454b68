use anchor_lang::prelude::*;

#[event]
pub struct LogBuyOptions {
    pub user: Pubkey,
    pub pool_id: u64,
    pub range_tokens: Vec<Pubkey>,
    pub amounts: Vec<u128>,
}

#[event]
pub struct LogSellOptions {
    pub user: Pubkey,
    pub pool_id: u64,
    pub range_token: Pubkey,
    pub shares: u128,
}

#[event]
pub struct LogWithdrawOptions {
    pub user: Pubkey,
    pub pool_id: u64,
    pub range_token: Pubkey,
    pub shares: u128,
}

#[event]
pub struct LogClosePosition {
    pub signer: Pubkey,
    pub user: Pubkey,
    pub range_token: Pubkey,
    pub repaid: u128,
    pub collateral_asset: Pubkey,
}

#[event]
pub struct LogLiquidatePosition {
    pub liquidator: Pubkey,
    pub user: Pubkey,
    pub range_tokens: Vec<Pubkey>,
    pub amounts: Vec<u128>,
    pub collateral_asset: Pubkey,
}

#[event]
pub struct LogSwapCollateral {
    pub user: Pubkey,
    pub token_in: Pubkey,
    pub amount_in: u128,
    pub amount_out: u128,
}
