use anchor_lang::prelude::*;

pub mod constants;
pub mod errors;
pub mod events;
pub mod module;
pub mod state;

pub use state::*;

declare_id!("Gojqa6Zz2kvi3JLYTzdiN4dGfj9EmKYuUC6acKAV3SsN");

/// Entry points operating on a range token held in `ctx.ranges`.
pub mod instructions {
    use super::*;

    pub fn initialize(
        ctx: &mut CallContext,
        key: Pubkey,
        signer: Pubkey,
        params: InitializeRangeParams,
    ) -> Result<()> {
        let mut range_token = RangeToken::new(key);
        range_token.initialize(ctx.tokens, &*ctx.amm, signer, params)?;
        ctx.ranges.insert(range_token)
    }

    pub fn init(
        ctx: &mut CallContext,
        range: &Pubkey,
        signer: Pubkey,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128> {
        let range_token = ctx.ranges.get_mut(range)?;
        range_token.init(ctx.tokens, ctx.amm, ctx.oracle, signer, amount0, amount1)
    }

    pub fn deposit(
        ctx: &mut CallContext,
        range: &Pubkey,
        signer: Pubkey,
        amount0: u128,
        amount1: u128,
    ) -> Result<u128> {
        let range_token = ctx.ranges.get_mut(range)?;
        range_token.deposit(ctx.tokens, ctx.amm, ctx.oracle, signer, amount0, amount1)
    }

    pub fn withdraw(
        ctx: &mut CallContext,
        range: &Pubkey,
        signer: Pubkey,
        shares: u128,
        min_amount0: u128,
        min_amount1: u128,
    ) -> Result<(u128, u128)> {
        let range_token = ctx.ranges.get_mut(range)?;
        range_token.withdraw(
            ctx.tokens,
            ctx.amm,
            ctx.oracle,
            signer,
            shares,
            min_amount0,
            min_amount1,
        )
    }

    pub fn claim_fee(ctx: &mut CallContext, range: &Pubkey) -> Result<()> {
        let range_token = ctx.ranges.get_mut(range)?;
        range_token.claim_fee(ctx.tokens, ctx.amm, ctx.oracle)
    }
}
