use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;
use library::invokes::{AssetPricer, LendingMarket};
use library::math::{safe_math::*, u256::mul_div};
use library::structs::{
    FlashLoanMode, FlashLoanReceipt, LiquidationOutcome, ReserveData, UserAccountData,
};
use library::token::{amount_for_value, value_of, TokenLedger};

use super::errors::MockErrorCodes;

pub const BASIS_POINTS: u128 = 10_000;
pub const HEALTH_FACTOR_ONE: u128 = 1_000_000_000_000_000_000;
pub const FLASH_LOAN_PREMIUM_BPS: u128 = 9;
pub const CLOSE_FACTOR_BPS: u128 = 5_000;
const SECONDS_PER_YEAR: u128 = 31_536_000;

#[derive(Clone, Debug)]
struct MockReserve {
    data: ReserveData,
    cash: u128,
    borrow_rate_bps: u128,
}

/// Over-collateralised lending market with Aave-style flash loans and liquidations.
///
/// Supplies and debts are plain balances: suppliers earn nothing and interest
/// only accrues on debt through [`MockLendingMarket::accrue_interest`].
#[derive(Clone, Debug)]
pub struct MockLendingMarket {
    pub key: Pubkey,
    reserves: BTreeMap<Pubkey, MockReserve>,
    supplies: BTreeMap<(Pubkey, Pubkey), u128>,
    debts: BTreeMap<(Pubkey, Pubkey), u128>,
    delegations: BTreeMap<(Pubkey, Pubkey, Pubkey), u128>,
    position_managers: BTreeSet<Pubkey>,
    soft_liquidation_threshold: u128,
    next_flash_loan_id: u64,
    open_flash_loans: BTreeMap<u64, FlashLoanReceipt>,
}

impl MockLendingMarket {
    pub fn new() -> Self {
        Self {
            key: Pubkey::new_unique(),
            reserves: BTreeMap::new(),
            supplies: BTreeMap::new(),
            debts: BTreeMap::new(),
            delegations: BTreeMap::new(),
            position_managers: BTreeSet::new(),
            soft_liquidation_threshold: HEALTH_FACTOR_ONE,
            next_flash_loan_id: 1,
            open_flash_loans: BTreeMap::new(),
        }
    }

    /// Lists `asset` with the given risk parameters, all in basis points.
    pub fn add_reserve(
        &mut self,
        asset: Pubkey,
        decimals: u8,
        ltv: u16,
        liquidation_threshold: u16,
        liquidation_bonus: u16,
    ) -> Result<()> {
        if self.reserves.contains_key(&asset) {
            return Err(error!(MockErrorCodes::MockReserveAlreadyExists));
        }

        self.reserves.insert(
            asset,
            MockReserve {
                data: ReserveData {
                    asset,
                    share_token: Pubkey::new_unique(),
                    debt_token: Pubkey::new_unique(),
                    decimals,
                    ltv,
                    liquidation_threshold,
                    liquidation_bonus,
                    available_liquidity: 0,
                },
                cash: 0,
                borrow_rate_bps: 0,
            },
        );
        Ok(())
    }

    pub fn set_borrow_rate(&mut self, asset: &Pubkey, borrow_rate_bps: u128) -> Result<()> {
        self.reserve_mut(asset)?.borrow_rate_bps = borrow_rate_bps;
        Ok(())
    }

    /// Governance style update of a listed reserve's LTV and liquidation threshold.
    pub fn set_reserve_risk(
        &mut self,
        asset: &Pubkey,
        ltv: u16,
        liquidation_threshold: u16,
    ) -> Result<()> {
        let reserve = self.reserve_mut(asset)?;
        reserve.data.ltv = ltv;
        reserve.data.liquidation_threshold = liquidation_threshold;
        Ok(())
    }

    pub fn set_soft_liquidation_threshold(&mut self, threshold: u128) {
        self.soft_liquidation_threshold = threshold;
    }

    /// Lets `manager` move collateral between users.
    pub fn add_position_manager(&mut self, manager: Pubkey) {
        self.position_managers.insert(manager);
    }

    /// Grows every debt by its reserve's yearly rate over `elapsed` seconds.
    pub fn accrue_interest(&mut self, elapsed: u64) -> Result<()> {
        for ((asset, _), debt) in self.debts.iter_mut() {
            let rate = self
                .reserves
                .get(asset)
                .map(|reserve| reserve.borrow_rate_bps)
                .unwrap_or_default();
            let interest = mul_div(
                *debt,
                rate.safe_mul(elapsed as u128)?,
                BASIS_POINTS.safe_mul(SECONDS_PER_YEAR)?,
            )?;
            *debt = debt.safe_add(interest)?;
        }
        Ok(())
    }

    fn reserve(&self, asset: &Pubkey) -> Result<&MockReserve> {
        self.reserves
            .get(asset)
            .ok_or_else(|| error!(MockErrorCodes::MockReserveNotFound))
    }

    fn reserve_mut(&mut self, asset: &Pubkey) -> Result<&mut MockReserve> {
        self.reserves
            .get_mut(asset)
            .ok_or_else(|| error!(MockErrorCodes::MockReserveNotFound))
    }

    fn take_cash(&mut self, asset: &Pubkey, amount: u128) -> Result<()> {
        let reserve = self.reserve_mut(asset)?;
        if reserve.cash < amount {
            return Err(error!(MockErrorCodes::MockInsufficientReserveLiquidity));
        }
        reserve.cash -= amount;
        Ok(())
    }

    fn consume_delegation(
        &mut self,
        asset: &Pubkey,
        delegator: &Pubkey,
        delegatee: &Pubkey,
        amount: u128,
    ) -> Result<()> {
        if delegator == delegatee {
            return Ok(());
        }
        let allowance = self
            .delegations
            .entry((*asset, *delegator, *delegatee))
            .or_default();
        if *allowance < amount {
            return Err(error!(MockErrorCodes::MockBorrowAllowanceNotEnough));
        }
        *allowance -= amount;
        Ok(())
    }

    /// Collateral can stay where it is as long as the account is above 1.0.
    fn validate_health_factor(&self, prices: &dyn AssetPricer, user: &Pubkey) -> Result<()> {
        let data = self.get_user_account_data(prices, user)?;
        if data.health_factor < HEALTH_FACTOR_ONE {
            msg!("Health factor of {} dropped to {}", user, data.health_factor);
            return Err(error!(MockErrorCodes::MockHealthFactorLowerThanLiquidationThreshold));
        }
        Ok(())
    }

    /// New debt must fit under the LTV weighted collateral.
    fn validate_borrow_capacity(&self, prices: &dyn AssetPricer, user: &Pubkey) -> Result<()> {
        let data = self.get_user_account_data(prices, user)?;
        let max_debt = mul_div(data.total_collateral, data.ltv, BASIS_POINTS)?;
        if data.total_debt > max_debt {
            msg!(
                "Debt {} of {} exceeds borrow capacity {}",
                data.total_debt,
                user,
                max_debt
            );
            return Err(error!(MockErrorCodes::MockCollateralCannotCoverNewBorrow));
        }
        Ok(())
    }

    fn open_debt(&mut self, asset: &Pubkey, user: &Pubkey, amount: u128) -> Result<()> {
        let debt = self.debts.entry((*asset, *user)).or_default();
        *debt = debt.safe_add(amount)?;
        Ok(())
    }
}

impl Default for MockLendingMarket {
    fn default() -> Self {
        Self::new()
    }
}

impl LendingMarket for MockLendingMarket {
    fn key(&self) -> Pubkey {
        self.key
    }

    fn deposit(
        &mut self,
        tokens: &mut dyn TokenLedger,
        asset: &Pubkey,
        amount: u128,
        payer: &Pubkey,
        on_behalf_of: &Pubkey,
    ) -> Result<()> {
        self.reserve(asset)?;
        tokens.transfer(asset, payer, &self.key, amount)?;

        self.reserve_mut(asset)?.cash += amount;
        *self.supplies.entry((*asset, *on_behalf_of)).or_default() += amount;
        Ok(())
    }

    fn withdraw(
        &mut self,
        tokens: &mut dyn TokenLedger,
        prices: &dyn AssetPricer,
        asset: &Pubkey,
        amount: u128,
        owner: &Pubkey,
        to: &Pubkey,
    ) -> Result<u128> {
        let supplied = self.supply_balance(asset, owner);
        let amount = if amount == u128::MAX { supplied } else { amount };
        if amount > supplied {
            return Err(error!(MockErrorCodes::MockInsufficientSupply));
        }

        self.take_cash(asset, amount)?;
        self.supplies.insert((*asset, *owner), supplied - amount);
        self.validate_health_factor(prices, owner)?;

        tokens.transfer(asset, &self.key, to, amount)?;
        Ok(amount)
    }

    fn borrow(
        &mut self,
        tokens: &mut dyn TokenLedger,
        prices: &dyn AssetPricer,
        asset: &Pubkey,
        amount: u128,
        caller: &Pubkey,
        on_behalf_of: &Pubkey,
    ) -> Result<()> {
        self.consume_delegation(asset, on_behalf_of, caller, amount)?;
        self.take_cash(asset, amount)?;
        self.open_debt(asset, on_behalf_of, amount)?;
        self.validate_borrow_capacity(prices, on_behalf_of)?;

        tokens.transfer(asset, &self.key, caller, amount)
    }

    fn repay(
        &mut self,
        tokens: &mut dyn TokenLedger,
        asset: &Pubkey,
        amount: u128,
        payer: &Pubkey,
        on_behalf_of: &Pubkey,
    ) -> Result<u128> {
        let debt = self.debt_balance(asset, on_behalf_of);
        let repaid = amount.min(debt);
        if repaid == 0 {
            return Ok(0);
        }

        tokens.transfer(asset, payer, &self.key, repaid)?;
        self.reserve_mut(asset)?.cash += repaid;
        self.debts.insert((*asset, *on_behalf_of), debt - repaid);
        Ok(repaid)
    }

    fn get_reserve_data(&self, asset: &Pubkey) -> Result<ReserveData> {
        let reserve = self.reserve(asset)?;
        Ok(ReserveData {
            available_liquidity: reserve.cash,
            ..reserve.data.clone()
        })
    }

    fn get_user_account_data(
        &self,
        prices: &dyn AssetPricer,
        user: &Pubkey,
    ) -> Result<UserAccountData> {
        let mut total_collateral = 0u128;
        let mut weighted_ltv = 0u128;
        let mut weighted_threshold = 0u128;
        let mut total_debt = 0u128;

        for ((asset, owner), amount) in &self.supplies {
            if owner != user || *amount == 0 {
                continue;
            }
            let reserve = self.reserve(asset)?;
            let value = value_of(*amount, prices.asset_price(asset)?, reserve.data.decimals)?;
            total_collateral = total_collateral.safe_add(value)?;
            weighted_ltv = weighted_ltv.safe_add(value.safe_mul(reserve.data.ltv as u128)?)?;
            weighted_threshold = weighted_threshold
                .safe_add(value.safe_mul(reserve.data.liquidation_threshold as u128)?)?;
        }

        for ((asset, owner), amount) in &self.debts {
            if owner != user || *amount == 0 {
                continue;
            }
            let reserve = self.reserve(asset)?;
            let value = value_of(*amount, prices.asset_price(asset)?, reserve.data.decimals)?;
            total_debt = total_debt.safe_add(value)?;
        }

        let (ltv, current_liquidation_threshold) = if total_collateral == 0 {
            (0, 0)
        } else {
            (
                weighted_ltv.safe_div(total_collateral)?,
                weighted_threshold.safe_div(total_collateral)?,
            )
        };

        let health_factor = if total_debt == 0 {
            u128::MAX
        } else {
            mul_div(
                weighted_threshold.safe_div(BASIS_POINTS)?,
                HEALTH_FACTOR_ONE,
                total_debt,
            )?
        };

        let available_borrows =
            mul_div(total_collateral, ltv, BASIS_POINTS)?.saturating_sub(total_debt);

        Ok(UserAccountData {
            total_collateral,
            total_debt,
            available_borrows,
            current_liquidation_threshold,
            ltv,
            health_factor,
        })
    }

    fn supply_balance(&self, asset: &Pubkey, user: &Pubkey) -> u128 {
        self.supplies.get(&(*asset, *user)).copied().unwrap_or_default()
    }

    fn debt_balance(&self, asset: &Pubkey, user: &Pubkey) -> u128 {
        self.debts.get(&(*asset, *user)).copied().unwrap_or_default()
    }

    fn approve_delegation(
        &mut self,
        asset: &Pubkey,
        delegator: &Pubkey,
        delegatee: &Pubkey,
        amount: u128,
    ) -> Result<()> {
        self.reserve(asset)?;
        self.delegations
            .insert((*asset, *delegator, *delegatee), amount);
        Ok(())
    }

    fn soft_liquidation_threshold(&self) -> u128 {
        self.soft_liquidation_threshold
    }

    fn transfer_collateral(
        &mut self,
        prices: &dyn AssetPricer,
        caller: &Pubkey,
        asset: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: u128,
    ) -> Result<()> {
        if !self.position_managers.contains(caller) {
            return Err(error!(MockErrorCodes::MockUnauthorizedPositionManager));
        }

        let supplied = self.supply_balance(asset, from);
        if supplied < amount {
            return Err(error!(MockErrorCodes::MockInsufficientSupply));
        }

        self.supplies.insert((*asset, *from), supplied - amount);
        *self.supplies.entry((*asset, *to)).or_default() += amount;

        self.validate_health_factor(prices, from)
    }

    fn flash_loan(
        &mut self,
        tokens: &mut dyn TokenLedger,
        receiver: &Pubkey,
        initiator: &Pubkey,
        assets: &[Pubkey],
        amounts: &[u128],
        modes: &[FlashLoanMode],
        on_behalf_of: &Pubkey,
    ) -> Result<FlashLoanReceipt> {
        if assets.is_empty() || assets.len() != amounts.len() || assets.len() != modes.len() {
            return Err(error!(MockErrorCodes::MockInvalidFlashLoanParams));
        }

        let mut premiums = Vec::with_capacity(assets.len());
        for ((asset, amount), mode) in assets.iter().zip(amounts).zip(modes) {
            if *mode == FlashLoanMode::OpenDebt {
                self.consume_delegation(asset, on_behalf_of, initiator, *amount)?;
                premiums.push(0);
            } else {
                premiums.push(
                    amount
                        .safe_mul(FLASH_LOAN_PREMIUM_BPS)?
                        .safe_div_ceil(BASIS_POINTS)?,
                );
            }

            self.take_cash(asset, *amount)?;
            tokens.transfer(asset, &self.key, receiver, *amount)?;
        }

        let receipt = FlashLoanReceipt {
            id: self.next_flash_loan_id,
            receiver: *receiver,
            initiator: *initiator,
            on_behalf_of: *on_behalf_of,
            assets: assets.to_vec(),
            amounts: amounts.to_vec(),
            premiums,
            modes: modes.to_vec(),
        };
        self.next_flash_loan_id += 1;
        self.open_flash_loans.insert(receipt.id, receipt.clone());

        tracing::debug!("flash loan {} opened for {}", receipt.id, on_behalf_of);
        Ok(receipt)
    }

    fn settle_flash_loan(
        &mut self,
        tokens: &mut dyn TokenLedger,
        prices: &dyn AssetPricer,
        receipt: &FlashLoanReceipt,
    ) -> Result<()> {
        match self.open_flash_loans.remove(&receipt.id) {
            Some(open) if open == *receipt => {}
            _ => return Err(error!(MockErrorCodes::MockUnknownFlashLoan)),
        }

        let mut opened_debt = false;
        for (index, asset) in receipt.assets.iter().enumerate() {
            let amount = receipt.amounts[index];
            match receipt.modes[index] {
                FlashLoanMode::Repay => {
                    let owed = amount.safe_add(receipt.premiums[index])?;
                    tokens.transfer(asset, &receipt.receiver, &self.key, owed)?;
                    self.reserve_mut(asset)?.cash += owed;
                }
                FlashLoanMode::OpenDebt => {
                    self.open_debt(asset, &receipt.on_behalf_of, amount)?;
                    opened_debt = true;
                }
            }
        }

        if opened_debt {
            self.validate_borrow_capacity(prices, &receipt.on_behalf_of)?;
        }

        Ok(())
    }

    fn liquidation_call(
        &mut self,
        tokens: &mut dyn TokenLedger,
        prices: &dyn AssetPricer,
        collateral_asset: &Pubkey,
        debt_asset: &Pubkey,
        user: &Pubkey,
        debt_to_cover: u128,
        liquidator: &Pubkey,
    ) -> Result<LiquidationOutcome> {
        // Liquidatable at or below one
        let data = self.get_user_account_data(prices, user)?;
        if data.health_factor > HEALTH_FACTOR_ONE {
            return Err(error!(MockErrorCodes::MockHealthFactorNotBelowThreshold));
        }

        let debt = self.debt_balance(debt_asset, user);
        if debt == 0 {
            return Err(error!(MockErrorCodes::MockNoDebtToCover));
        }

        let debt_reserve = self.reserve(debt_asset)?.data.clone();
        let collateral_reserve = self.reserve(collateral_asset)?.data.clone();
        let debt_price = prices.asset_price(debt_asset)?;
        let collateral_price = prices.asset_price(collateral_asset)?;

        let mut debt_repaid = debt_to_cover.min(mul_div(debt, CLOSE_FACTOR_BPS, BASIS_POINTS)?);

        // Collateral worth the repaid debt plus the liquidation bonus
        let bonus = collateral_reserve.liquidation_bonus as u128;
        let debt_value = value_of(debt_repaid, debt_price, debt_reserve.decimals)?;
        let mut collateral_seized = amount_for_value(
            mul_div(debt_value, bonus, BASIS_POINTS)?,
            collateral_price,
            collateral_reserve.decimals,
        )?;

        let available = self.supply_balance(collateral_asset, user);
        if collateral_seized > available {
            collateral_seized = available;
            let collateral_value = value_of(available, collateral_price, collateral_reserve.decimals)?;
            debt_repaid = amount_for_value(
                mul_div(collateral_value, BASIS_POINTS, bonus)?,
                debt_price,
                debt_reserve.decimals,
            )?;
        }

        tokens.transfer(debt_asset, liquidator, &self.key, debt_repaid)?;
        self.reserve_mut(debt_asset)?.cash += debt_repaid;
        self.debts.insert((*debt_asset, *user), debt - debt_repaid);

        self.supplies
            .insert((*collateral_asset, *user), available - collateral_seized);
        self.take_cash(collateral_asset, collateral_seized)?;
        tokens.transfer(collateral_asset, &self.key, liquidator, collateral_seized)?;

        msg!(
            "Liquidated {}: repaid {} debt, seized {} collateral",
            user,
            debt_repaid,
            collateral_seized
        );

        Ok(LiquidationOutcome {
            debt_repaid,
            collateral_seized,
        })
    }
}
