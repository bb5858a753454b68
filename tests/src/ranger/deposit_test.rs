//! Range token deposit/withdraw tests

#[cfg(test)]
mod tests {
    use crate::fixture::*;
    use range_test_framework::prelude::*;

    const INIT_BASE: u128 = 1_000 * ONE_BASE;
    const INIT_QUOTE: u128 = ONE_QUOTE;

    fn setup_fixture() -> (RangeFixture, Pubkey) {
        let mut fixture = RangeFixture::new().expect("Failed to create fixture");
        let range = fixture
            .create_range(band(1_200), band(1_300))
            .expect("Failed to create range");
        fixture
            .init_range(&range, INIT_BASE, INIT_QUOTE)
            .expect("Failed to init range");
        (fixture, range)
    }

    #[test]
    fn test_deposit_and_withdraw_round_trip() {
        let (mut fixture, range) = setup_fixture();
        let alice = fixture.alice;
        let (base, quote) = (fixture.base, fixture.quote);

        let base_before = fixture.balance(&alice, &base);
        let quote_before = fixture.balance(&alice, &quote);

        let shares = fixture
            .deposit_range(&alice, &range, 500 * ONE_BASE, ONE_QUOTE)
            .unwrap();
        fixture.vm.assert_token_balance_eq(&alice, &range, shares);

        let used0 = base_before - fixture.balance(&alice, &base);
        let used1 = quote_before - fixture.balance(&alice, &quote);
        // Base is the binding side at this price, the extra quote stays with alice
        assert!(used0 > 499 * ONE_BASE && used0 <= 500 * ONE_BASE);
        assert!(used1 < ONE_QUOTE);

        let (amount0, amount1) = fixture.withdraw_range(&alice, &range, shares, 0, 0).unwrap();

        fixture.vm.assert_token_balance_eq(&alice, &range, 0);
        assert!(amount0 <= used0 && amount1 <= used1);
        fixture.vm.assert_approx_eq(amount0, used0, 2);
        fixture.vm.assert_approx_eq_rel(amount1, used1, 1);
    }

    #[test]
    fn test_deposit_shares_follow_liquidity() {
        let (mut fixture, range) = setup_fixture();
        let alice = fixture.alice;
        let total_before = fixture.range(&range).total_shares;

        // Same amounts as the first funding, same number of shares
        let shares = fixture
            .deposit_range(&alice, &range, INIT_BASE, INIT_QUOTE)
            .unwrap();

        fixture.vm.assert_approx_eq_rel(shares, total_before, 1);
        assert_eq!(fixture.range(&range).total_shares, total_before + shares);
        assert_eq!(fixture.vm.total_supply(&range), total_before + shares);
    }

    #[test]
    fn test_token_amounts_match_withdrawal() {
        let (mut fixture, range) = setup_fixture();
        let owner = fixture.owner;
        let shares = fixture.balance(&owner, &range) / 3;

        let expected = fixture
            .range(&range)
            .get_token_amounts(&fixture.vm.world.amm, shares)
            .unwrap();
        let withdrawn = fixture.withdraw_range(&owner, &range, shares, 0, 0).unwrap();

        assert_eq!(withdrawn, expected);
    }

    #[test]
    fn test_withdraw_reverts() {
        let (mut fixture, range) = setup_fixture();
        let (owner, alice) = (fixture.owner, fixture.alice);
        let shares = fixture.balance(&owner, &range);

        fixture.expect_revert_with("RangeZeroWithdraw", |f| {
            f.withdraw_range(&owner, &range, 0, 0, 0)
        });

        fixture.expect_revert_with("RangeInsufficientBalance", |f| {
            f.withdraw_range(&alice, &range, 1, 0, 0)
        });

        fixture.expect_revert_with("RangeSlippage", |f| {
            f.withdraw_range(&owner, &range, shares, INIT_BASE + 1, 0)
        });

        // Reverted withdrawals leave the position untouched
        fixture.vm.assert_token_balance_eq(&owner, &range, shares);
        assert_eq!(fixture.range(&range).total_shares, shares);
    }

    #[test]
    fn test_deposit_too_small_reverts() {
        let (mut fixture, range) = setup_fixture();
        let alice = fixture.alice;

        fixture.expect_revert_with("RangeZeroDeposit", |f| f.deposit_range(&alice, &range, 0, 0));
    }

    #[test]
    fn test_deposit_amounts_for_shares_cover_request() {
        let (mut fixture, range) = setup_fixture();
        let alice = fixture.alice;
        let wanted = 100 * ONE_SHARE;

        let (amount0, amount1) = fixture
            .range(&range)
            .deposit_amounts_for_shares(&fixture.vm.world.amm, wanted)
            .unwrap();

        let shares = fixture
            .deposit_range(&alice, &range, amount0, amount1)
            .unwrap();
        assert!(shares >= wanted);
        fixture.vm.assert_approx_eq_rel(shares, wanted, 1);
    }
}
