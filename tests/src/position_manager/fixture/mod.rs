use {
    crate::fixture::{band, RangeFixture, ONE_BASE, ONE_QUOTE},
    anchor_lang::prelude::*,
    leverage::LeveragePositionManager,
    library::invokes::LendingMarket,
    range_test_framework::prelude::*,
    range_test_framework::Result as VmResult,
};

/// Leverage test fixture
///
/// Extends RangeFixture with a funded and listed 1200-1300 range token, the
/// pool assets listed as collateral and a manager allowed to move collateral.
pub struct LeverageFixture {
    /// The underlying range fixture
    pub range: RangeFixture,
    pub manager: LeveragePositionManager,
    pub range_token: Pubkey,
}

impl VmAccess for LeverageFixture {
    fn vm_mut(&mut self) -> &mut Vm {
        &mut self.range.vm
    }
}

impl LeverageFixture {
    pub const SELL_BASE: u128 = 1_000 * ONE_BASE;
    pub const SELL_QUOTE: u128 = ONE_QUOTE;
    pub const ALICE_COLLATERAL: u128 = 1_000 * ONE_BASE;
    pub const ALICE_OPTIONS: u128 = 500 * crate::fixture::ONE_SHARE;

    pub fn new() -> VmResult<Self> {
        let mut range = RangeFixture::new()?;

        let range_token = range.create_funded_range(
            band(1_200),
            band(1_300),
            1_000 * ONE_BASE,
            ONE_QUOTE,
        )?;
        range.list_pool_reserves()?;

        let manager =
            LeveragePositionManager::new(range.owner, Pubkey::new_unique(), range.registry.key)?;
        range.vm.world.lending.add_position_manager(manager.key);

        Ok(Self {
            range,
            manager,
            range_token,
        })
    }

    /// Bob sells options so the range token reserve has cash to borrow.
    pub fn with_seller() -> VmResult<Self> {
        let mut fixture = Self::new()?;
        let (bob, range_token) = (fixture.range.bob, fixture.range_token);
        fixture.sell_options(&bob, &range_token, Self::SELL_BASE, Self::SELL_QUOTE)?;
        Ok(fixture)
    }

    /// Alice supplies base and buys options on the range token.
    pub fn with_position() -> VmResult<Self> {
        let mut fixture = Self::with_seller()?;
        let (alice, base, range_token) = (fixture.range.alice, fixture.range.base, fixture.range_token);

        fixture
            .range
            .supply_lending(&alice, &base, Self::ALICE_COLLATERAL)?;
        fixture.approve_delegation(&alice, u128::MAX);
        fixture.buy_options(
            &alice,
            vec![range_token],
            vec![Self::ALICE_OPTIONS],
            vec![Pubkey::default()],
        )?;
        Ok(fixture)
    }

    /// Credit delegation of the range token from `user` to the manager.
    pub fn approve_delegation(&mut self, user: &Pubkey, amount: u128) {
        let (range_token, manager) = (self.range_token, self.manager.key);
        self.range
            .vm
            .world
            .lending
            .approve_delegation(&range_token, user, &manager, amount)
            .expect("Failed to approve delegation");
    }

    pub fn sell_options(
        &mut self,
        user: &Pubkey,
        range_token: &Pubkey,
        amount0: u128,
        amount1: u128,
    ) -> VmResult<u128> {
        let (user, range_token, pool_id) = (*user, *range_token, self.range.pool_id);
        let registry = &self.range.registry;
        self.range.vm.transact(&mut self.manager, move |ctx, manager| {
            manager.sell_options(ctx, registry, user, pool_id, range_token, amount0, amount1)
        })
    }

    pub fn withdraw_options(&mut self, user: &Pubkey, shares: u128) -> VmResult<()> {
        let (user, range_token, pool_id) = (*user, self.range_token, self.range.pool_id);
        let registry = &self.range.registry;
        self.range.vm.transact(&mut self.manager, move |ctx, manager| {
            manager.withdraw_options(ctx, registry, user, pool_id, range_token, shares)
        })
    }

    pub fn buy_options(
        &mut self,
        user: &Pubkey,
        range_tokens: Vec<Pubkey>,
        amounts: Vec<u128>,
        swap_targets: Vec<Pubkey>,
    ) -> VmResult<()> {
        let (user, pool_id) = (*user, self.range.pool_id);
        let registry = &self.range.registry;
        self.range.vm.transact(&mut self.manager, move |ctx, manager| {
            manager.buy_options(ctx, registry, user, pool_id, range_tokens, amounts, swap_targets)
        })
    }

    pub fn close(
        &mut self,
        signer: &Pubkey,
        user: &Pubkey,
        repay_amount: u128,
        collateral_asset: &Pubkey,
    ) -> VmResult<()> {
        let (signer, user, collateral_asset) = (*signer, *user, *collateral_asset);
        let (range_token, pool_id) = (self.range_token, self.range.pool_id);
        let registry = &self.range.registry;
        self.range.vm.transact(&mut self.manager, move |ctx, manager| {
            manager.close(
                ctx,
                registry,
                signer,
                pool_id,
                user,
                range_token,
                repay_amount,
                collateral_asset,
            )
        })
    }

    pub fn liquidate(
        &mut self,
        liquidator: &Pubkey,
        user: &Pubkey,
        amount: u128,
        collateral_asset: &Pubkey,
    ) -> VmResult<()> {
        let (liquidator, user, collateral_asset) = (*liquidator, *user, *collateral_asset);
        let (range_token, pool_id) = (self.range_token, self.range.pool_id);
        let registry = &self.range.registry;
        self.range.vm.transact(&mut self.manager, move |ctx, manager| {
            manager.liquidate(
                ctx,
                registry,
                liquidator,
                pool_id,
                user,
                vec![range_token],
                vec![amount],
                collateral_asset,
            )
        })
    }

    pub fn swap_tokens(&mut self, user: &Pubkey, token: &Pubkey, amount: u128) -> VmResult<u128> {
        let (user, token, pool_id) = (*user, *token, self.range.pool_id);
        let registry = &self.range.registry;
        self.range.vm.transact(&mut self.manager, move |ctx, manager| {
            manager.swap_tokens(ctx, registry, user, pool_id, token, amount)
        })
    }

    pub fn target_amount(&mut self, token_in: &Pubkey, amount_in: u128, token_out: &Pubkey) -> VmResult<u128> {
        let (token_in, token_out) = (*token_in, *token_out);
        let manager = &self.manager;
        self.range.vm.execute(move |ctx| {
            manager.get_target_amount_from_oracle(ctx, &token_in, amount_in, &token_out)
        })
    }

    /// Buys exactly `recv_amount` of `token_out` with the manager's own `token_in`.
    pub fn swap_for_exact(
        &mut self,
        recv_amount: u128,
        max_amount_in: u128,
        token_in: &Pubkey,
        token_out: &Pubkey,
    ) -> VmResult<u128> {
        let (token_in, token_out, pool) = (*token_in, *token_out, self.range.pool);
        let manager = &self.manager;
        self.range.vm.execute(move |ctx| {
            manager.swap_tokens_for_exact_tokens(
                ctx,
                &pool,
                recv_amount,
                max_amount_in,
                &token_in,
                &token_out,
            )
        })
    }

    pub fn check_balances(&mut self, shares: u128, expected0: u128, expected1: u128) -> VmResult<()> {
        let range_token = self.range_token;
        let manager = &self.manager;
        self.range.vm.execute(move |ctx| {
            manager.check_expected_balances(ctx, &range_token, shares, expected0, expected1)
        })
    }

    /// Mints `shares` of the range token to the manager from freshly minted
    /// pool assets, returning the amounts deposited.
    pub fn remint_to_manager(&mut self, shares: u128) -> VmResult<(u128, u128)> {
        let (range_token, manager) = (self.range_token, self.manager.key);
        let (amount0, amount1) = self
            .range
            .range(&range_token)
            .deposit_amounts_for_shares(&self.range.vm.world.amm, shares)?;

        let (base, quote) = (self.range.base, self.range.quote);
        self.range.vm.mint_tokens(&base, &manager, amount0)?;
        self.range.vm.mint_tokens(&quote, &manager, amount1)?;
        self.range
            .deposit_range(&manager, &range_token, amount0, amount1)?;
        Ok((amount0, amount1))
    }

    /// Drops the liquidation threshold of base and quote so that `user`'s
    /// health factor falls under 1.
    pub fn crash_collateral_thresholds(&mut self, liquidation_threshold: u16) {
        for asset in [self.range.base, self.range.quote] {
            self.range
                .vm
                .world
                .lending
                .set_reserve_risk(&asset, liquidation_threshold, liquidation_threshold)
                .expect("Failed to update reserve");
        }
    }
}
