//! Range token initialize/init tests

#[cfg(test)]
mod tests {
    use crate::fixture::*;
    use library::token::value_of;
    use range_test_framework::prelude::*;
    use range_token::instructions as range_ix;

    const INIT_BASE: u128 = 1_000 * ONE_BASE;
    const INIT_QUOTE: u128 = ONE_QUOTE;

    fn setup_fixture() -> (RangeFixture, Pubkey) {
        let mut fixture = RangeFixture::new().expect("Failed to create fixture");
        let range = fixture
            .create_range(band(1_200), band(1_300))
            .expect("Failed to create range");
        (fixture, range)
    }

    #[test]
    fn test_initialize_names_range() {
        let (fixture, range) = setup_fixture();
        let range_token = fixture.range(&range);

        assert!(range_token.is_initialized);
        assert_eq!(range_token.initializer, fixture.owner);
        assert_eq!(range_token.name, "Ranger 1200-1300");
        assert_eq!(range_token.symbol, "R-1200-1300");
        assert_eq!(range_token.base_decimals, BASE_DECIMALS);
        assert_eq!(range_token.quote_decimals, QUOTE_DECIMALS);
        // Higher band price maps to the lower sqrt edge
        assert!(range_token.sqrt_lower < range_token.sqrt_upper);
        assert_eq!(fixture.vm.total_supply(&range), 0);
    }

    #[test]
    fn test_initialize_validates_params() {
        let mut fixture = RangeFixture::new().expect("Failed to create fixture");
        let owner = fixture.owner;

        let inverted = fixture.range_params(band(1_300), band(1_200), false);
        fixture.expect_revert_with("RangeInvalidBounds", |f| {
            f.vm.execute(|ctx| range_ix::initialize(ctx, Pubkey::new_unique(), owner, inverted))
        });

        let mut no_oracle = fixture.range_params(band(1_200), band(1_300), false);
        no_oracle.oracle = Pubkey::default();
        fixture.expect_revert_with("RangeInvalidOracle", |f| {
            f.vm.execute(|ctx| range_ix::initialize(ctx, Pubkey::new_unique(), owner, no_oracle))
        });

        let mut swapped = fixture.range_params(band(1_200), band(1_300), false);
        std::mem::swap(&mut swapped.base_asset, &mut swapped.quote_asset);
        fixture.expect_revert_with("RangeInvalidAssets", |f| {
            f.vm.execute(|ctx| range_ix::initialize(ctx, Pubkey::new_unique(), owner, swapped))
        });

        let mut no_treasury = fixture.range_params(band(1_200), band(1_300), false);
        no_treasury.treasury = Pubkey::default();
        fixture.expect_revert_with("RangeInvalidTreasury", |f| {
            f.vm.execute(|ctx| range_ix::initialize(ctx, Pubkey::new_unique(), owner, no_treasury))
        });
    }

    #[test]
    fn test_init_mints_deposited_value() {
        let (mut fixture, range) = setup_fixture();
        let owner = fixture.owner;
        let (base, quote) = (fixture.base, fixture.quote);

        let base_before = fixture.balance(&owner, &base);
        let quote_before = fixture.balance(&owner, &quote);

        let shares = fixture
            .init_range(&range, INIT_BASE, INIT_QUOTE)
            .expect("Failed to init range");

        let used0 = base_before - fixture.balance(&owner, &base);
        let used1 = quote_before - fixture.balance(&owner, &quote);
        assert!(used0 > 0 && used1 > 0);
        assert!(used0 <= INIT_BASE && used1 <= INIT_QUOTE);

        // 1 share per 1e-18 USD: value X8 scaled by 1e10
        let value = value_of(used0, band(1), BASE_DECIMALS).unwrap()
            + value_of(used1, band(DEFAULT_QUOTE_PRICE), QUOTE_DECIMALS).unwrap();
        assert_eq!(shares, value * 10_000_000_000);

        fixture.vm.assert_token_balance_eq(&owner, &range, shares);
        assert_eq!(fixture.range(&range).total_shares, shares);

        // One whole share is worth about a dollar
        let share_price = fixture.range_share_price(&range);
        fixture.vm.assert_approx_eq_rel(share_price, band(1), 1);
    }

    #[test]
    fn test_init_only_once() {
        let (mut fixture, range) = setup_fixture();
        fixture.init_range(&range, INIT_BASE, INIT_QUOTE).unwrap();

        fixture.expect_revert_with("RangeAlreadyInitialized", |f| {
            f.init_range(&range, INIT_BASE, INIT_QUOTE)
        });
    }

    #[test]
    fn test_init_only_initializer() {
        let (mut fixture, range) = setup_fixture();
        let alice = fixture.alice;

        fixture.expect_revert_with("RangeUnallowedCaller", |f| {
            f.vm.execute(|ctx| range_ix::init(ctx, &range, alice, INIT_BASE, INIT_QUOTE))
        });
    }

    #[test]
    fn test_init_needs_liquidity() {
        let (mut fixture, range) = setup_fixture();

        fixture.expect_revert_with("RangeInvalidInitAmounts", |f| f.init_range(&range, 0, 0));
    }

    #[test]
    fn test_deposit_before_init_reverts() {
        let (mut fixture, range) = setup_fixture();
        let alice = fixture.alice;

        fixture.expect_revert_with("RangeClosed", |f| {
            f.deposit_range(&alice, &range, INIT_BASE, INIT_QUOTE)
        });
    }

    #[test]
    fn test_dormant_range_can_be_funded_again() {
        let (mut fixture, range) = setup_fixture();
        let owner = fixture.owner;

        let shares = fixture.init_range(&range, INIT_BASE, INIT_QUOTE).unwrap();
        fixture.withdraw_range(&owner, &range, shares, 0, 0).unwrap();

        assert_eq!(fixture.range(&range).total_shares, 0);
        assert_eq!(fixture.range(&range).liquidity, 0);
        assert_eq!(fixture.range_share_price(&range), 0);

        let shares = fixture.init_range(&range, INIT_BASE, INIT_QUOTE).unwrap();
        assert!(shares > 0);
        fixture.vm.assert_token_balance_eq(&owner, &range, shares);
    }

    #[test]
    fn test_range_above_price_takes_base_only() {
        let mut fixture = RangeFixture::new().expect("Failed to create fixture");
        let owner = fixture.owner;
        let quote = fixture.quote;

        // 1000-1100 sits entirely under the 1262 price
        let range = fixture.create_range(band(1_000), band(1_100)).unwrap();
        let quote_before = fixture.balance(&owner, &quote);

        fixture.init_range(&range, INIT_BASE, INIT_QUOTE).unwrap();

        assert_eq!(fixture.balance(&owner, &quote), quote_before);
        let (amount0, amount1) = fixture
            .range(&range)
            .return_expected_balance(&fixture.vm.world.oracle, 0, 0)
            .unwrap();
        assert!(amount0 > 0);
        assert_eq!(amount1, 0);
    }
}
