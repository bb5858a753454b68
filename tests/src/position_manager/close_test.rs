//! Closing leveraged positions against collateral

#[cfg(test)]
mod tests {
    use crate::fixture::*;
    use crate::position_manager::fixture::LeverageFixture;
    use range_test_framework::prelude::*;

    fn setup_fixture() -> LeverageFixture {
        LeverageFixture::with_position().expect("Failed to create fixture")
    }

    #[test]
    fn test_close_repays_from_collateral() {
        let mut fixture = setup_fixture();
        let (alice, range_token) = (fixture.range.alice, fixture.range_token);
        let (base, quote) = (fixture.range.base, fixture.range.quote);
        let base_before = fixture.range.supply_of(&base, &alice);
        let quote_before = fixture.range.supply_of(&quote, &alice);

        fixture.close(&alice, &alice, 0, &base).expect("Failed to close");

        assert_eq!(fixture.range.debt_of(&range_token, &alice), 0);
        assert_eq!(fixture.range.account_data(&alice).total_debt, 0);

        // 500 shares plus the flash premium, the quote side bought with base
        let spent = base_before - fixture.range.supply_of(&base, &alice);
        assert!(spent > 500 * ONE_BASE && spent < 502 * ONE_BASE);
        assert!(fixture.range.supply_of(&quote, &alice) >= quote_before);

        let manager = fixture.manager.key;
        for mint in [base, quote, range_token] {
            fixture.range.vm.assert_token_balance_eq(&manager, &mint, 0);
        }
    }

    #[test]
    fn test_partial_close() {
        let mut fixture = setup_fixture();
        let (alice, base, range_token) = (fixture.range.alice, fixture.range.base, fixture.range_token);

        fixture.close(&alice, &alice, 200 * ONE_SHARE, &base).unwrap();
        assert_eq!(fixture.range.debt_of(&range_token, &alice), 300 * ONE_SHARE);

        // Above the debt closes all of it
        fixture.close(&alice, &alice, 1_000 * ONE_SHARE, &base).unwrap();
        assert_eq!(fixture.range.debt_of(&range_token, &alice), 0);
    }

    #[test]
    fn test_close_with_quote_collateral_needs_enough() {
        let mut fixture = setup_fixture();
        let (alice, quote) = (fixture.range.alice, fixture.range.quote);

        // Only the quote half of the options is supplied in quote
        fixture.expect_revert_with("LeverageInsufficientCollateral", |f| {
            f.close(&alice, &alice, 0, &quote)
        });
    }

    #[test]
    fn test_close_by_third_party() {
        let mut fixture = setup_fixture();
        let (alice, bob) = (fixture.range.alice, fixture.range.bob);
        let (base, range_token) = (fixture.range.base, fixture.range_token);

        fixture.expect_revert_with("LeverageNotInitiatedByUser", |f| {
            f.close(&bob, &alice, 0, &base)
        });

        // Under the soft threshold anyone may unwind the position, here
        // already past the hard one
        fixture.crash_collateral_thresholds(3_000);
        let health_factor = fixture.range.account_data(&alice).health_factor;
        assert!(health_factor < RangeFixture::SOFT_LIQUIDATION_THRESHOLD);
        assert!(health_factor < HEALTH_FACTOR_ONE);

        fixture.close(&bob, &alice, 0, &base).expect("Failed to close");
        assert_eq!(fixture.range.debt_of(&range_token, &alice), 0);
    }

    #[test]
    fn test_close_validation() {
        let mut fixture = setup_fixture();
        let (alice, bob) = (fixture.range.alice, fixture.range.bob);
        let range_token = fixture.range_token;

        fixture.expect_revert_with("LeverageInvalidCollateralAsset", |f| {
            f.close(&alice, &alice, 0, &range_token)
        });

        // Nothing owed, nothing to do
        let base = fixture.range.base;
        fixture.close(&bob, &bob, 0, &base).unwrap();
        assert_eq!(fixture.range.debt_of(&range_token, &alice), LeverageFixture::ALICE_OPTIONS);
    }
}
