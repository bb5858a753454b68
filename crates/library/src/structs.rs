use anchor_lang::prelude::*;

/// Lending market reserve as seen by callers.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReserveData {
    pub asset: Pubkey,
    /// Receipt token tracking supplied balances
    pub share_token: Pubkey,
    /// Token tracking variable debt
    pub debt_token: Pubkey,
    pub decimals: u8,
    pub ltv: u16,                   // IN BASIS_POINTS
    pub liquidation_threshold: u16, // IN BASIS_POINTS
    pub liquidation_bonus: u16,     // IN BASIS_POINTS, 10_300 = 3% bonus
    pub available_liquidity: u128,
}

/// Aggregated account data of a lending market user, values in USD X8.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UserAccountData {
    pub total_collateral: u128,
    pub total_debt: u128,
    pub available_borrows: u128,
    pub current_liquidation_threshold: u128,
    pub ltv: u128,
    /// 1e18 = 1.0, u128::MAX without debt
    pub health_factor: u128,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlashLoanMode {
    /// Amount plus premium must be paid back before settlement
    Repay,
    /// Amount is turned into variable debt of `on_behalf_of`
    OpenDebt,
}

/// Issued by the lending market when it hands out a flash loan and consumed on settlement.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct FlashLoanReceipt {
    pub id: u64,
    pub receiver: Pubkey,
    pub initiator: Pubkey,
    pub on_behalf_of: Pubkey,
    pub assets: Vec<Pubkey>,
    pub amounts: Vec<u128>,
    pub premiums: Vec<u128>,
    pub modes: Vec<FlashLoanMode>,
}

/// Result of a lending market liquidation.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LiquidationOutcome {
    pub debt_repaid: u128,
    pub collateral_seized: u128,
}

/// Identifies a concentrated liquidity position inside an AMM pool.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct PositionKey {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub sqrt_lower: u128,
    pub sqrt_upper: u128,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct PositionInfo {
    pub liquidity: u128,
    pub tokens_owed0: u128,
    pub tokens_owed1: u128,
}
