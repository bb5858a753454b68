//! Liquidations through the position manager

#[cfg(test)]
mod tests {
    use crate::fixture::*;
    use crate::position_manager::fixture::LeverageFixture;
    use range_test_framework::prelude::*;

    fn setup_fixture() -> LeverageFixture {
        LeverageFixture::with_position().expect("Failed to create fixture")
    }

    #[test]
    fn test_liquidation_needs_unhealthy_account() {
        let mut fixture = setup_fixture();
        let (alice, bob, base) = (fixture.range.alice, fixture.range.bob, fixture.range.base);

        fixture.expect_revert_with("MockHealthFactorNotBelowThreshold", |f| {
            f.liquidate(&bob, &alice, 200 * ONE_SHARE, &base)
        });
    }

    #[test]
    fn test_liquidate_with_base_collateral() {
        let mut fixture = setup_fixture();
        let (alice, bob) = (fixture.range.alice, fixture.range.bob);
        let (base, range_token) = (fixture.range.base, fixture.range_token);

        // (1000 + 500) * 30% / 500 = 0.9
        fixture.crash_collateral_thresholds(3_000);
        let health_factor = fixture.range.account_data(&alice).health_factor;
        assert!(health_factor < 1_000_000_000_000_000_000);

        let alice_base = fixture.range.supply_of(&base, &alice);
        fixture
            .liquidate(&bob, &alice, 200 * ONE_SHARE, &base)
            .expect("Failed to liquidate");

        assert_eq!(fixture.range.debt_of(&range_token, &alice), 300 * ONE_SHARE);

        // 200 USD of debt plus the 5% bonus of the collateral reserve
        let seized = alice_base - fixture.range.supply_of(&base, &alice);
        fixture.range.vm.assert_approx_eq_rel(seized, 210 * ONE_BASE, 5);

        // What minting the flash loan back did not use goes to the liquidator
        let reward = fixture.range.supply_of(&base, &bob);
        assert!(reward > 9 * ONE_BASE && reward < 10 * ONE_BASE);

        let manager = fixture.manager.key;
        fixture.range.vm.assert_token_balance_eq(&manager, &range_token, 0);
        fixture.range.vm.assert_token_balance_eq(&manager, &base, 0);
    }

    #[test]
    fn test_liquidation_capped_by_close_factor() {
        let mut fixture = setup_fixture();
        let (alice, bob) = (fixture.range.alice, fixture.range.bob);
        let (base, range_token) = (fixture.range.base, fixture.range_token);

        fixture.crash_collateral_thresholds(3_000);
        fixture
            .liquidate(&bob, &alice, 400 * ONE_SHARE, &base)
            .expect("Failed to liquidate");

        // Half the debt at most
        assert_eq!(fixture.range.debt_of(&range_token, &alice), 250 * ONE_SHARE);
        assert!(fixture.range.supply_of(&base, &bob) > 0);
    }

    #[test]
    fn test_liquidation_validation() {
        let mut fixture = setup_fixture();
        let (alice, bob, range_token) = (fixture.range.alice, fixture.range.bob, fixture.range_token);
        fixture.crash_collateral_thresholds(3_000);

        fixture.expect_revert_with("LeverageInvalidCollateralAsset", |f| {
            f.liquidate(&bob, &alice, 200 * ONE_SHARE, &range_token)
        });
        // Without debt the health factor never drops
        fixture.expect_revert_with("MockHealthFactorNotBelowThreshold", |f| {
            let base = f.range.base;
            f.liquidate(&alice, &bob, 200 * ONE_SHARE, &base)
        });
    }
}
