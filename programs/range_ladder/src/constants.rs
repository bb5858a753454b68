pub const RANGE_TOKEN_SEED: &[u8] = b"range_token";
pub const TICKER_SEED: &[u8] = b"ticker";

/// A ticker spans `mid / TICKER_WIDTH_DIVISOR` above the middle of its step (0.01%)
pub const TICKER_WIDTH_DIVISOR: u128 = 10_000;
