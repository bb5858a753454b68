pub mod collateral;
pub mod swap;
