use anchor_lang::prelude::*;

/// Vault over a contiguous window of range tokens of one pool.
///
/// Shares are minted under the vault key, which also holds idle base and
/// quote between deployments.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct TickVault {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub treasury: Pubkey,

    pub pool_id: u64,          // Registry id of the pool
    pub lending_market: Pubkey,
    pub pool: Pubkey,          // AMM pool the ticks provide liquidity to
    pub base_asset: Pubkey,    // token0
    pub quote_asset: Pubkey,   // token1
    pub base_decimals: u8,
    pub quote_decimals: u8,
    pub wrapped_native: Pubkey,

    pub ticks: Vec<Pubkey>,      // Range tokens, increasing in price
    pub active_tick_index: u64,  // Lowest deployed tick

    pub base_fee_x4: u16,
    pub is_enabled: bool,
    pub tvl_cap: u128, // USD X8

    pub name: String,
    pub symbol: String,
}
