/// Swaps must return at least 99% of the oracle quote
pub const SWAP_MIN_OUT_PERCENT: u128 = 99;

/// Reminted shares must redeem for at least 99% of the amounts deposited
pub const MIN_REDEEM_PERCENT: u128 = 99;

pub const HUNDRED_PERCENT: u128 = 100;
