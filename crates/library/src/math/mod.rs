pub mod ceil_div;
pub mod liquidity;
pub mod safe_math;
pub mod sqrt_price;
pub mod u256;
