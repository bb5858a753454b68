pub const VAULT_SHARE_DECIMALS: u8 = 18;

/// USD X8 value to 18 decimal shares on the first deposit
pub const VALUE_TO_SHARES: u128 = 10_000_000_000; // 1e10

pub const FOUR_DECIMALS: u128 = 10_000;

/// 0.2%
pub const DEFAULT_BASE_FEE_X4: u16 = 20;

/// 1%
pub const MAX_BASE_FEE_X4: u16 = 100;

/// $10,000 in USD X8
pub const DEFAULT_TVL_CAP: u128 = 1_000_000_000_000;

/// Max distance between pool and oracle sqrt prices, 1% in price
pub const ORACLE_TOLERANCE_BPS: u128 = 50;

/// Ticks liquidity is deployed to: two below price, two above
pub const DEPLOYED_TICKS: usize = 4;

/// Max input on shortfall swaps relative to the oracle quote, in percent
pub const SWAP_MAX_IN_PERCENT: u128 = 101;

pub const ONE_SHARE: u128 = 1_000_000_000_000_000_000; // 1e18
