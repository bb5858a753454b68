use anchor_lang::prelude::*;

use library::structs::FlashLoanReceipt;

/// Operation waiting for the lending market flash loan callback.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum InFlightOperation {
    BuyOptions {
        pool_id: u64,
        user: Pubkey,
        swap_targets: Vec<Pubkey>,
    },
    Close {
        pool_id: u64,
        user: Pubkey,
        collateral_asset: Pubkey,
    },
    Liquidation {
        pool_id: u64,
        user: Pubkey,
        collateral_asset: Pubkey,
        liquidator: Pubkey,
    },
}

impl InFlightOperation {
    /// Account the flash loan was taken on behalf of
    pub fn on_behalf_of(&self) -> Pubkey {
        match self {
            Self::BuyOptions { user, .. } | Self::Close { user, .. } => *user,
            Self::Liquidation { liquidator, .. } => *liquidator,
        }
    }

    pub fn matches(&self, receipt: &FlashLoanReceipt) -> bool {
        let expected_len = match self {
            Self::BuyOptions { swap_targets, .. } => swap_targets.len(),
            Self::Close { .. } => 1,
            Self::Liquidation { .. } => receipt.assets.len(),
        };
        receipt.on_behalf_of == self.on_behalf_of() && receipt.assets.len() == expected_len
    }
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default)]
pub struct LeveragePositionManager {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub registry: Pubkey,
    pub in_flight: Option<InFlightOperation>,
}
