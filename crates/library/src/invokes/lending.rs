use anchor_lang::prelude::*;

use crate::invokes::oracle::AssetPricer;
use crate::structs::{
    FlashLoanMode, FlashLoanReceipt, LiquidationOutcome, ReserveData, UserAccountData,
};
use crate::token::TokenLedger;

/// Over-collateralised lending market holding user collateral and debt.
///
/// Supplied balances are tracked per `(asset, user)`; the underlying sits in the
/// market's own ledger account. Any call that lowers a user's health factor
/// checks it against the liquidation threshold before returning.
pub trait LendingMarket {
    fn key(&self) -> Pubkey;

    /// Supplies `amount` of `asset` from `payer` as collateral of `on_behalf_of`.
    fn deposit(
        &mut self,
        tokens: &mut dyn TokenLedger,
        asset: &Pubkey,
        amount: u128,
        payer: &Pubkey,
        on_behalf_of: &Pubkey,
    ) -> Result<()>;

    /// Withdraws `amount` (u128::MAX for all) of `owner`'s supply to `to`.
    fn withdraw(
        &mut self,
        tokens: &mut dyn TokenLedger,
        prices: &dyn AssetPricer,
        asset: &Pubkey,
        amount: u128,
        owner: &Pubkey,
        to: &Pubkey,
    ) -> Result<u128>;

    /// Borrows for `on_behalf_of`; a caller other than the borrower needs credit delegation.
    fn borrow(
        &mut self,
        tokens: &mut dyn TokenLedger,
        prices: &dyn AssetPricer,
        asset: &Pubkey,
        amount: u128,
        caller: &Pubkey,
        on_behalf_of: &Pubkey,
    ) -> Result<()>;

    /// Repays at most the outstanding debt, returns the amount repaid.
    fn repay(
        &mut self,
        tokens: &mut dyn TokenLedger,
        asset: &Pubkey,
        amount: u128,
        payer: &Pubkey,
        on_behalf_of: &Pubkey,
    ) -> Result<u128>;

    fn get_reserve_data(&self, asset: &Pubkey) -> Result<ReserveData>;

    fn get_user_account_data(
        &self,
        prices: &dyn AssetPricer,
        user: &Pubkey,
    ) -> Result<UserAccountData>;

    fn supply_balance(&self, asset: &Pubkey, user: &Pubkey) -> u128;

    fn debt_balance(&self, asset: &Pubkey, user: &Pubkey) -> u128;

    /// Lets `delegatee` borrow `asset` up to `amount` on behalf of `delegator`.
    fn approve_delegation(
        &mut self,
        asset: &Pubkey,
        delegator: &Pubkey,
        delegatee: &Pubkey,
        amount: u128,
    ) -> Result<()>;

    /// Health factor (1e18) under which third parties may reduce a position.
    fn soft_liquidation_threshold(&self) -> u128;

    /// Moves supplied collateral between users. Reserved for position managers
    /// authorised by the market; the source account stays health-checked.
    #[allow(clippy::too_many_arguments)]
    fn transfer_collateral(
        &mut self,
        prices: &dyn AssetPricer,
        caller: &Pubkey,
        asset: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u128,
    ) -> Result<()>;

    /// Phase one of a flash loan: the assets are sent to `receiver` and a receipt
    /// is returned that must be handed back to `settle_flash_loan`.
    #[allow(clippy::too_many_arguments)]
    fn flash_loan(
        &mut self,
        tokens: &mut dyn TokenLedger,
        receiver: &Pubkey,
        initiator: &Pubkey,
        assets: &[Pubkey],
        amounts: &[u128],
        modes: &[FlashLoanMode],
        on_behalf_of: &Pubkey,
    ) -> Result<FlashLoanReceipt>;

    /// Phase two: pulls back amount plus premium or opens the debt.
    fn settle_flash_loan(
        &mut self,
        tokens: &mut dyn TokenLedger,
        prices: &dyn AssetPricer,
        receipt: &FlashLoanReceipt,
    ) -> Result<()>;

    /// Repays `debt_to_cover` of `user`'s debt from `liquidator` and sends the
    /// seized collateral underlying, bonus included, to `liquidator`.
    #[allow(clippy::too_many_arguments)]
    fn liquidation_call(
        &mut self,
        tokens: &mut dyn TokenLedger,
        prices: &dyn AssetPricer,
        collateral_asset: &Pubkey,
        debt_asset: &Pubkey,
        user: &Pubkey,
        debt_to_cover: u128,
        liquidator: &Pubkey,
    ) -> Result<LiquidationOutcome>;
}
