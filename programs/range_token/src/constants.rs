/// Decimals of range token shares
pub const RANGE_TOKEN_DECIMALS: u8 = 18;

/// One whole share
pub const ONE_SHARE: u128 = 1_000_000_000_000_000_000; // 1e18

/// Converts a USD X8 value into 18 decimal shares on first mint
pub const VALUE_TO_SHARES: u128 = 10_000_000_000; // 1e10

/// Part of collected AMM fees sent to the treasury, in percent
pub const DEFAULT_TREASURY_FEE_PERCENT: u8 = 20;

/// Accrued fees compound once they exceed 1% of the principal on both sides
pub const COMPOUND_FEE_MULTIPLIER: u128 = 100;

/// Compounding must keep at least 95% of the spent value at oracle prices
pub const COMPOUND_MIN_VALUE_PERCENT: u128 = 95;

pub const HUNDRED_PERCENT: u128 = 100;

/// First implementation version a beacon points at
pub const INITIAL_IMPLEMENTATION_VERSION: u16 = 1;
