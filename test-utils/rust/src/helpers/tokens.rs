use anchor_lang::prelude::Pubkey;
use library::token::TokenLedger;

use crate::core::vm::Vm;
use crate::errors::Result;

/// Token management trait
pub trait TokenHelper {
    /// Create a new test mint, owned by the default authority
    fn create_mint(&mut self, decimals: u8) -> Result<Pubkey>;

    /// Create two mints ordered by address, as pools and ranges expect them
    fn create_ordered_mints(&mut self, decimals0: u8, decimals1: u8) -> Result<(Pubkey, Pubkey)>;

    /// Credit tokens to a user
    fn mint_tokens(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u128) -> Result<()>;

    /// Get token balance for a user
    fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> u128;

    fn total_supply(&self, mint: &Pubkey) -> u128;

    /// Credit native (unwrapped) balance to a user
    fn deal_native(&mut self, owner: &Pubkey, amount: u128);

    fn native_balance(&self, owner: &Pubkey) -> u128;
}

impl TokenHelper for Vm {
    fn create_mint(&mut self, decimals: u8) -> Result<Pubkey> {
        let mint = Pubkey::new_unique();
        self.world
            .tokens
            .create_mint(mint, decimals, Pubkey::default())?;
        Ok(mint)
    }

    fn create_ordered_mints(&mut self, decimals0: u8, decimals1: u8) -> Result<(Pubkey, Pubkey)> {
        let (first, second) = (Pubkey::new_unique(), Pubkey::new_unique());
        let (mint0, mint1) = if first < second {
            (first, second)
        } else {
            (second, first)
        };

        self.world
            .tokens
            .create_mint(mint0, decimals0, Pubkey::default())?;
        self.world
            .tokens
            .create_mint(mint1, decimals1, Pubkey::default())?;
        Ok((mint0, mint1))
    }

    fn mint_tokens(&mut self, mint: &Pubkey, owner: &Pubkey, amount: u128) -> Result<()> {
        self.world.tokens.airdrop(mint, owner, amount)?;
        Ok(())
    }

    fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> u128 {
        self.world.tokens.balance_of(mint, owner)
    }

    fn total_supply(&self, mint: &Pubkey) -> u128 {
        self.world.tokens.total_supply(mint)
    }

    fn deal_native(&mut self, owner: &Pubkey, amount: u128) {
        self.world.tokens.deal_native(owner, amount);
    }

    fn native_balance(&self, owner: &Pubkey) -> u128 {
        self.world.tokens.native_balance(owner)
    }
}
