use anchor_lang::prelude::*;

#[event]
pub struct LogAddPool {
    pub pool_id: u64,
    pub lending_market: Pubkey,
    pub token0: Pubkey,
    pub token1: Pubkey,
    pub amm_router: Pubkey,
}

#[event]
pub struct LogDeprecatePool {
    pub pool_id: u64,
}

#[event]
pub struct LogUpdateTreasury {
    pub treasury: Pubkey,
}
