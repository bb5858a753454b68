use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolInfo {
    pub lending_market: Pubkey,
    pub token0: Pubkey,
    pub token1: Pubkey,
    pub amm_router: Pubkey,
    pub is_deprecated: bool,
}

/// Pools known to the engine, ids are positions in `pools` and never reused.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct PoolRegistry {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub treasury: Pubkey,
    pub pools: Vec<PoolInfo>,
}
