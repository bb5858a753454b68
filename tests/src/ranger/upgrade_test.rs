//! Range token beacon upgrade tests

#[cfg(test)]
mod tests {
    use crate::fixture::*;
    use library::invokes::ConcentratedAmm;
    use range_test_framework::prelude::*;
    use range_token::constants::INITIAL_IMPLEMENTATION_VERSION;

    fn setup_fixture() -> (RangeFixture, Pubkey) {
        let mut fixture = RangeFixture::new().expect("Failed to create fixture");
        let range = fixture
            .create_funded_range(band(1_200), band(1_300), 1_000 * ONE_BASE, ONE_QUOTE)
            .expect("Failed to create range");

        // Half of the owner's shares sit in the lending market
        let owner = fixture.owner;
        let supplied = fixture.balance(&owner, &range) / 2;
        fixture
            .supply_lending(&owner, &range, supplied)
            .expect("Failed to supply shares");
        (fixture, range)
    }

    fn implementation_version(fixture: &RangeFixture, range: &Pubkey) -> u16 {
        fixture
            .vm
            .world
            .ranges
            .implementation_version(range)
            .expect("Failed to read version")
    }

    #[test]
    fn test_upgrade_keeps_balances() {
        let (mut fixture, range) = setup_fixture();
        let (owner, alice) = (fixture.owner, fixture.alice);
        assert_eq!(implementation_version(&fixture, &range), INITIAL_IMPLEMENTATION_VERSION);

        let position = fixture.range(&range).position_key();
        let total_shares = fixture.range(&range).total_shares;
        let liquidity = fixture.vm.world.amm.position(&position).liquidity;
        let wallet_shares = fixture.balance(&owner, &range);
        let lent_shares = fixture.supply_of(&range, &owner);
        let share_price = fixture.range_share_price(&range);

        fixture.upgrade_beacon(&owner, 2).expect("Failed to upgrade");
        assert_eq!(implementation_version(&fixture, &range), 2);

        assert_eq!(fixture.range(&range).total_shares, total_shares);
        assert_eq!(fixture.vm.total_supply(&range), total_shares);
        assert_eq!(fixture.vm.world.amm.position(&position).liquidity, liquidity);
        assert_eq!(fixture.balance(&owner, &range), wallet_shares);
        assert_eq!(fixture.supply_of(&range, &owner), lent_shares);
        assert_eq!(fixture.range_share_price(&range), share_price);

        // Still usable through the new version
        let shares = fixture
            .deposit_range(&alice, &range, 100 * ONE_BASE, ONE_QUOTE / 10)
            .expect("Failed to deposit");
        fixture
            .withdraw_range(&alice, &range, shares, 0, 0)
            .expect("Failed to withdraw");
        fixture.vm.assert_token_balance_eq(&alice, &range, 0);
    }

    #[test]
    fn test_upgrade_validation() {
        let (mut fixture, range) = setup_fixture();
        let (owner, alice) = (fixture.owner, fixture.alice);

        fixture.expect_revert_with("RangeBeaconOnlyOwner", |f| f.upgrade_beacon(&alice, 2));
        fixture.expect_revert_with("RangeBeaconInvalidVersion", |f| {
            f.upgrade_beacon(&owner, INITIAL_IMPLEMENTATION_VERSION)
        });

        fixture.upgrade_beacon(&owner, 3).expect("Failed to upgrade");
        fixture.expect_revert_with("RangeBeaconInvalidVersion", |f| f.upgrade_beacon(&owner, 2));
        assert_eq!(implementation_version(&fixture, &range), 3);
    }
}
