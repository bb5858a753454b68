use anchor_lang::prelude::*;

#[event]
pub struct LogInitializeRange {
    pub range_token: Pubkey,
    pub base_asset: Pubkey,
    pub quote_asset: Pubkey,
    pub lower_price: u128,
    pub upper_price: u128,
    pub is_ticker: bool,
}

#[event]
pub struct LogInitRange {
    pub range_token: Pubkey,
    pub signer: Pubkey,
    pub liquidity: u128,
    pub shares: u128,
    pub amount0: u128,
    pub amount1: u128,
}

#[event]
pub struct LogDeposit {
    pub range_token: Pubkey,
    pub signer: Pubkey,
    pub liquidity: u128,
    pub shares: u128,
    pub amount0: u128,
    pub amount1: u128,
}

#[event]
pub struct LogWithdraw {
    pub range_token: Pubkey,
    pub signer: Pubkey,
    pub shares: u128,
    pub amount0: u128,
    pub amount1: u128,
}

#[event]
pub struct LogClaimFee {
    pub range_token: Pubkey,
    pub fee0: u128,
    pub fee1: u128,
    pub treasury_fee0: u128,
    pub treasury_fee1: u128,
    pub compounded_liquidity: u128,
}

#[event]
pub struct LogUpgradeBeacon {
    pub beacon: Pubkey,
    pub version: u16,
}
