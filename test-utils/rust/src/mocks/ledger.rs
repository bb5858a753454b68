use std::collections::BTreeMap;

use anchor_lang::prelude::*;
use library::token::TokenLedger;

use super::errors::MockErrorCodes;

#[derive(Clone, Debug)]
struct MintState {
    decimals: u8,
    authority: Pubkey,
    supply: u128,
}

/// Token ledger keeping every mint, balance and native balance in memory.
#[derive(Clone, Debug)]
pub struct MockLedger {
    mints: BTreeMap<Pubkey, MintState>,
    balances: BTreeMap<(Pubkey, Pubkey), u128>,
    native: BTreeMap<Pubkey, u128>,
    wrapped_native: Pubkey,
}

impl MockLedger {
    /// Ledger with a wrapped native mint (18 decimals) already created.
    pub fn new() -> Self {
        let wrapped_native = Pubkey::new_unique();
        let mut mints = BTreeMap::new();
        mints.insert(
            wrapped_native,
            MintState {
                decimals: 18,
                authority: Pubkey::default(),
                supply: 0,
            },
        );

        Self {
            mints,
            balances: BTreeMap::new(),
            native: BTreeMap::new(),
            wrapped_native,
        }
    }

    /// Credits `amount` out of thin air, bypassing the mint authority.
    pub fn airdrop(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u128) -> Result<()> {
        let state = self
            .mints
            .get_mut(mint)
            .ok_or_else(|| error!(MockErrorCodes::MockUnknownMint))?;
        state.supply += amount;
        *self.balances.entry((*mint, *owner)).or_default() += amount;
        Ok(())
    }

    pub fn deal_native(&mut self, owner: &Pubkey, amount: u128) {
        *self.native.entry(*owner).or_default() += amount;
    }

    /// Makes an existing mint the one native balances wrap into.
    pub fn set_wrapped_native(&mut self, mint: &Pubkey) -> Result<()> {
        if !self.mints.contains_key(mint) {
            return Err(error!(MockErrorCodes::MockUnknownMint));
        }
        self.wrapped_native = *mint;
        Ok(())
    }

    fn debit(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u128) -> Result<()> {
        let balance = self.balances.entry((*mint, *owner)).or_default();
        if *balance < amount {
            msg!(
                "Insufficient {} balance of {}: {} < {}",
                mint,
                owner,
                balance,
                amount
            );
            return Err(error!(MockErrorCodes::MockInsufficientBalance));
        }
        *balance -= amount;
        Ok(())
    }

    fn checked_authority(&mut self, mint: &Pubkey, authority: &Pubkey) -> Result<&mut MintState> {
        let state = self
            .mints
            .get_mut(mint)
            .ok_or_else(|| error!(MockErrorCodes::MockUnknownMint))?;
        if state.authority != *authority {
            return Err(error!(MockErrorCodes::MockInvalidMintAuthority));
        }
        Ok(state)
    }
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenLedger for MockLedger {
    fn create_mint(&mut self, mint: Pubkey, decimals: u8, authority: Pubkey) -> Result<()> {
        if self.mints.contains_key(&mint) {
            return Err(error!(MockErrorCodes::MockMintAlreadyExists));
        }
        self.mints.insert(
            mint,
            MintState {
                decimals,
                authority,
                supply: 0,
            },
        );
        Ok(())
    }

    fn decimals(&self, mint: &Pubkey) -> Result<u8> {
        self.mints
            .get(mint)
            .map(|state| state.decimals)
            .ok_or_else(|| error!(MockErrorCodes::MockUnknownMint))
    }

    fn balance_of(&self, mint: &Pubkey, owner: &Pubkey) -> u128 {
        self.balances.get(&(*mint, *owner)).copied().unwrap_or_default()
    }

    fn total_supply(&self, mint: &Pubkey) -> u128 {
        self.mints.get(mint).map(|state| state.supply).unwrap_or_default()
    }

    fn transfer(&mut self, mint: &Pubkey, from: &Pubkey, to: &Pubkey, amount: u128) -> Result<()> {
        if !self.mints.contains_key(mint) {
            return Err(error!(MockErrorCodes::MockUnknownMint));
        }
        self.debit(mint, from, amount)?;
        *self.balances.entry((*mint, *to)).or_default() += amount;
        Ok(())
    }

    fn mint_to(&mut self, mint: &Pubkey, authority: &Pubkey, to: &Pubkey, amount: u128) -> Result<()> {
        self.checked_authority(mint, authority)?.supply += amount;
        *self.balances.entry((*mint, *to)).or_default() += amount;
        Ok(())
    }

    fn burn(&mut self, mint: &Pubkey, authority: &Pubkey, from: &Pubkey, amount: u128) -> Result<()> {
        self.checked_authority(mint, authority)?;
        self.debit(mint, from, amount)?;
        if let Some(state) = self.mints.get_mut(mint) {
            state.supply -= amount;
        }
        Ok(())
    }

    fn wrapped_native(&self) -> Pubkey {
        self.wrapped_native
    }

    fn native_balance(&self, owner: &Pubkey) -> u128 {
        self.native.get(owner).copied().unwrap_or_default()
    }

    fn wrap_native(&mut self, owner: &Pubkey, amount: u128) -> Result<()> {
        let native = self.native.entry(*owner).or_default();
        if *native < amount {
            return Err(error!(MockErrorCodes::MockInsufficientNativeBalance));
        }
        *native -= amount;

        let wrapped_native = self.wrapped_native;
        self.airdrop(&wrapped_native, owner, amount)
    }

    fn unwrap_native(&mut self, owner: &Pubkey, amount: u128) -> Result<()> {
        let wrapped_native = self.wrapped_native;
        self.debit(&wrapped_native, owner, amount)?;
        if let Some(state) = self.mints.get_mut(&wrapped_native) {
            state.supply -= amount;
        }
        *self.native.entry(*owner).or_default() += amount;
        Ok(())
    }
}
