//! Tick vault deposit tests

#[cfg(test)]
mod tests {
    use crate::fixture::*;
    use crate::vault::fixture::VaultFixture;
    use range_test_framework::prelude::*;

    const DEPOSIT: u128 = 1_000 * ONE_BASE;

    fn setup_fixture() -> VaultFixture {
        VaultFixture::new().expect("Failed to create fixture")
    }

    #[test]
    fn test_first_deposit_mints_value_and_deploys() {
        let mut fixture = setup_fixture();
        let (alice, base, treasury) = (fixture.range.alice, fixture.range.base, fixture.range.treasury);

        let shares = fixture
            .deposit(&alice, &base, DEPOSIT, 0)
            .expect("Failed to deposit");

        // Empty vault charges half the base fee: 0.1%
        fixture.range.vm.assert_token_balance_eq(&treasury, &base, ONE_BASE);
        assert_eq!(shares, 999 * band(1) * 10_000_000_000);
        assert_eq!(fixture.shares_of(&alice), shares);

        // Price sits between ticks 2 and 3, the window starts one below
        assert_eq!(fixture.vault.get_active_tick_index(), 1);
        assert_eq!(fixture.tick_balance(0), 0);
        assert!(fixture.tick_balance(1) > 0);
        assert!(fixture.tick_balance(2) > 0);
        // No quote to deploy above price
        assert_eq!(fixture.tick_balance(3), 0);
        assert_eq!(fixture.tick_balance(4), 0);

        let vault_key = fixture.vault.key;
        assert!(fixture.range.balance(&vault_key, &base) < 2);

        let tvl = fixture.tvl();
        fixture.range.vm.assert_approx_eq_rel(tvl, 999 * band(1), 1);

        let share_price = fixture.view(|ctx, vault| vault.latest_answer(ctx));
        fixture.range.vm.assert_approx_eq_rel(share_price, band(1), 1);
    }

    #[test]
    fn test_deposit_fee_follows_imbalance() {
        let mut fixture = setup_fixture();
        let (alice, bob) = (fixture.range.alice, fixture.range.bob);
        let (base, treasury) = (fixture.range.base, fixture.range.treasury);

        let alice_shares = fixture.deposit(&alice, &base, DEPOSIT, 0).unwrap();

        // All base now: adding more base pays the max fee, quote the min
        let increase_base = fixture.view(|ctx, vault| vault.get_adjusted_base_fee(ctx, true));
        let increase_quote = fixture.view(|ctx, vault| vault.get_adjusted_base_fee(ctx, false));
        assert_eq!(increase_base, 30);
        assert_eq!(increase_quote, 10);

        let bob_shares = fixture.deposit(&bob, &base, DEPOSIT, 0).unwrap();
        fixture
            .range
            .vm
            .assert_token_balance_eq(&treasury, &base, ONE_BASE + 3 * ONE_BASE);
        fixture
            .range
            .vm
            .assert_approx_eq_rel(bob_shares, alice_shares * 997 / 999, 1);
    }

    #[test]
    fn test_native_deposit_wraps() {
        let mut fixture = setup_fixture();
        let (alice, quote) = (fixture.range.alice, fixture.range.quote);
        let quote_before = fixture.range.balance(&alice, &quote);

        fixture.range.vm.deal_native(&alice, ONE_QUOTE);
        let shares = fixture.deposit(&alice, &quote, 0, ONE_QUOTE).unwrap();

        assert_eq!(fixture.range.vm.native_balance(&alice), 0);
        assert_eq!(fixture.range.balance(&alice, &quote), quote_before);

        // 0.999 WETH at 1262
        let value = 999 * band(DEFAULT_QUOTE_PRICE) / 1_000;
        assert_eq!(shares, value * 10_000_000_000);

        // Quote goes to the two ticks above price
        assert!(fixture.tick_balance(3) > 0);
        assert!(fixture.tick_balance(4) > 0);
        assert_eq!(fixture.tick_balance(1), 0);
    }

    #[test]
    fn test_deposit_validation() {
        let mut fixture = setup_fixture();
        let (owner, alice) = (fixture.range.owner, fixture.range.alice);
        let base = fixture.range.base;

        fixture.expect_revert_with("VaultInvalidToken", |f| {
            f.deposit(&alice, &Pubkey::new_unique(), DEPOSIT, 0)
        });
        fixture.expect_revert_with("VaultDepositZero", |f| f.deposit(&alice, &base, 0, 0));

        fixture.range.vm.deal_native(&alice, ONE_QUOTE);
        fixture.expect_revert_with("VaultInvalidWeth", |f| {
            f.deposit(&alice, &base, 0, ONE_QUOTE)
        });

        fixture.vault.set_tvl_cap(owner, 500 * band(1)).unwrap();
        fixture.expect_revert_with("VaultMaxCapReached", |f| {
            f.deposit(&alice, &base, DEPOSIT, 0)
        });

        fixture.vault.set_enabled(owner, false).unwrap();
        fixture.expect_revert_with("VaultPoolDisabled", |f| {
            f.deposit(&alice, &base, DEPOSIT, 0)
        });

        assert_eq!(fixture.vault.total_supply(&fixture.range.vm.world.tokens), 0);
    }

    #[test]
    fn test_deposit_rejects_pool_off_oracle() {
        let mut fixture = setup_fixture();
        let (alice, base) = (fixture.range.alice, fixture.range.base);

        fixture.range.set_oracle_quote_price(1_300);
        fixture.expect_revert_with("VaultOracleError", |f| {
            f.deposit(&alice, &base, DEPOSIT, 0)
        });
    }

    #[test]
    fn test_admin_setters_owner_only() {
        let mut fixture = setup_fixture();
        let (owner, alice) = (fixture.range.owner, fixture.range.alice);

        fixture.expect_revert_with("VaultOnlyOwner", |f| f.vault.set_enabled(alice, false));
        fixture.expect_revert_with("VaultOnlyOwner", |f| f.vault.set_tvl_cap(alice, 0));
        fixture.expect_revert_with("VaultOnlyOwner", |f| f.vault.set_base_fee(alice, 10));
        fixture.expect_revert_with("VaultInvalidFee", |f| f.vault.set_base_fee(owner, 101));
        fixture.expect_revert_with("VaultInvalidTreasury", |f| {
            f.vault.set_treasury(owner, Pubkey::default())
        });

        fixture.vault.set_base_fee(owner, 40).unwrap();
        assert_eq!(fixture.vault.base_fee_x4, 40);
    }
}
