//! Selling, withdrawing and buying range token options

#[cfg(test)]
mod tests {
    use crate::fixture::*;
    use crate::position_manager::fixture::LeverageFixture;
    use library::structs::{FlashLoanMode, FlashLoanReceipt};
    use range_test_framework::prelude::*;

    #[test]
    fn test_sell_options_supplies_shares() {
        let mut fixture = LeverageFixture::new().expect("Failed to create fixture");
        let (bob, range_token) = (fixture.range.bob, fixture.range_token);
        let (base, quote) = (fixture.range.base, fixture.range.quote);
        let total_before = fixture.range.range(&range_token).total_shares;
        let quote_before = fixture.range.balance(&bob, &quote);

        let shares = fixture
            .sell_options(&bob, &range_token, LeverageFixture::SELL_BASE, LeverageFixture::SELL_QUOTE)
            .expect("Failed to sell options");

        // Same amounts as the first funding, same liquidity
        assert_eq!(shares, total_before);
        assert_eq!(fixture.range.supply_of(&range_token, &bob), shares);
        fixture.range.vm.assert_token_balance_eq(&bob, &range_token, 0);
        assert!(quote_before - fixture.range.balance(&bob, &quote) < ONE_QUOTE);

        let manager = fixture.manager.key;
        for mint in [base, quote, range_token] {
            fixture.range.vm.assert_token_balance_eq(&manager, &mint, 0);
        }
    }

    #[test]
    fn test_sell_options_needs_listed_range() {
        let mut fixture = LeverageFixture::new().expect("Failed to create fixture");
        let bob = fixture.range.bob;

        let unlisted = fixture.range.create_range(band(1_300), band(1_400)).unwrap();
        fixture.range.init_range(&unlisted, 1_000 * ONE_BASE, ONE_QUOTE).unwrap();

        fixture.expect_revert_with("LeverageInvalidAddress", |f| {
            f.sell_options(&bob, &unlisted, 1_000 * ONE_BASE, ONE_QUOTE)
        });
        fixture.expect_revert_with("LeverageInvalidAddress", |f| {
            f.sell_options(&bob, &Pubkey::new_unique(), 1_000 * ONE_BASE, ONE_QUOTE)
        });
    }

    #[test]
    fn test_withdraw_options_returns_underlying_collateral() {
        let mut fixture = LeverageFixture::with_seller().expect("Failed to create fixture");
        let (bob, range_token) = (fixture.range.bob, fixture.range_token);
        let (base, quote) = (fixture.range.base, fixture.range.quote);
        let supplied = fixture.range.supply_of(&range_token, &bob);

        fixture
            .withdraw_options(&bob, 100 * ONE_SHARE)
            .expect("Failed to withdraw options");

        assert_eq!(fixture.range.supply_of(&range_token, &bob), supplied - 100 * ONE_SHARE);
        assert!(fixture.range.supply_of(&base, &bob) > 0);
        assert!(fixture.range.supply_of(&quote, &bob) > 0);

        // About 100 USD worth of collateral
        let collateral = fixture.range.account_data(&bob).total_collateral;
        let options_value = (supplied - 100 * ONE_SHARE) / 10_000_000_000;
        fixture
            .range
            .vm
            .assert_approx_eq_rel(collateral, options_value + 100 * band(1), 2);

        // 0 withdraws everything left
        fixture.withdraw_options(&bob, 0).unwrap();
        assert_eq!(fixture.range.supply_of(&range_token, &bob), 0);
    }

    #[test]
    fn test_buy_options_opens_debt() {
        let fixture = LeverageFixture::with_position().expect("Failed to create fixture");
        let (alice, range_token) = (fixture.range.alice, fixture.range_token);
        let (base, quote) = (fixture.range.base, fixture.range.quote);

        assert_eq!(fixture.range.debt_of(&range_token, &alice), LeverageFixture::ALICE_OPTIONS);
        assert!(fixture.range.supply_of(&base, &alice) > LeverageFixture::ALICE_COLLATERAL);
        assert!(fixture.range.supply_of(&quote, &alice) > 0);
        assert!(fixture.manager.in_flight.is_none());

        let data = fixture.range.account_data(&alice);
        fixture.range.vm.assert_approx_eq_rel(data.total_debt, 500 * band(1), 1);
        fixture.range.vm.assert_approx_eq_rel(data.total_collateral, 1_500 * band(1), 1);

        let manager = fixture.manager.key;
        for mint in [base, quote, range_token] {
            fixture.range.vm.assert_token_balance_eq(&manager, &mint, 0);
        }
    }

    #[test]
    fn test_buy_options_swaps_to_target() {
        let mut fixture = LeverageFixture::with_seller().expect("Failed to create fixture");
        let (alice, base, quote) = (fixture.range.alice, fixture.range.base, fixture.range.quote);
        let range_token = fixture.range_token;

        fixture
            .range
            .supply_lending(&alice, &base, LeverageFixture::ALICE_COLLATERAL)
            .unwrap();
        fixture.approve_delegation(&alice, u128::MAX);
        fixture
            .buy_options(&alice, vec![range_token], vec![LeverageFixture::ALICE_OPTIONS], vec![base])
            .expect("Failed to buy options");

        assert_eq!(fixture.range.supply_of(&quote, &alice), 0);
        // Only the pool fee on the swapped part is lost
        let supplied = fixture.range.supply_of(&base, &alice);
        fixture
            .range
            .vm
            .assert_approx_eq_rel(supplied, LeverageFixture::ALICE_COLLATERAL + 500 * ONE_BASE, 5);
    }

    #[test]
    fn test_buy_options_validation() {
        let mut fixture = LeverageFixture::with_seller().expect("Failed to create fixture");
        let (alice, owner) = (fixture.range.alice, fixture.range.owner);
        let range_token = fixture.range_token;
        let amount = LeverageFixture::ALICE_OPTIONS;

        fixture.expect_revert_with("LeverageArrayLengthMismatch", |f| {
            f.buy_options(&alice, vec![range_token], vec![], vec![Pubkey::default()])
        });
        fixture.expect_revert_with("LeverageInvalidSwapToken", |f| {
            f.buy_options(&alice, vec![range_token], vec![amount], vec![Pubkey::new_unique()])
        });

        // Debt is opened for alice, she has to delegate first
        fixture.expect_revert_with("MockBorrowAllowanceNotEnough", |f| {
            f.buy_options(&alice, vec![range_token], vec![amount], vec![Pubkey::default()])
        });

        // Without own collateral the options alone are under the LTV
        fixture.approve_delegation(&owner, u128::MAX);
        fixture.expect_revert_with("MockCollateralCannotCoverNewBorrow", |f| {
            f.buy_options(&owner, vec![range_token], vec![amount], vec![Pubkey::default()])
        });

        assert_eq!(fixture.range.debt_of(&range_token, &owner), 0);
        assert!(fixture.manager.in_flight.is_none());
    }

    #[test]
    fn test_deprecated_pool_only_unwinds() {
        let mut fixture = LeverageFixture::with_position().expect("Failed to create fixture");
        let (alice, bob, owner) = (fixture.range.alice, fixture.range.bob, fixture.range.owner);
        let (base, range_token, pool_id) = (fixture.range.base, fixture.range_token, fixture.range.pool_id);

        fixture.range.registry.deprecate_pool(owner, pool_id).unwrap();

        fixture.expect_revert_with("LeveragePoolDeprecated", |f| {
            f.buy_options(&alice, vec![range_token], vec![ONE_SHARE], vec![Pubkey::default()])
        });
        fixture.expect_revert_with("LeveragePoolDeprecated", |f| {
            f.sell_options(&bob, &range_token, 1_000 * ONE_BASE, ONE_QUOTE)
        });

        fixture.close(&alice, &alice, 0, &base).expect("Failed to close");
        fixture.withdraw_options(&bob, 0).expect("Failed to withdraw options");
        assert_eq!(fixture.range.debt_of(&range_token, &alice), 0);
    }

    #[test]
    fn test_flash_loan_callback_only_in_flight() {
        let mut fixture = LeverageFixture::with_position().expect("Failed to create fixture");
        let (alice, range_token) = (fixture.range.alice, fixture.range_token);
        let lending = fixture.range.vm.world.lending.key;

        let receipt = FlashLoanReceipt {
            id: 1,
            receiver: fixture.manager.key,
            initiator: fixture.manager.key,
            on_behalf_of: alice,
            assets: vec![range_token],
            amounts: vec![ONE_SHARE],
            premiums: vec![0],
            modes: vec![FlashLoanMode::Repay],
        };

        for caller in [lending, alice] {
            let registry = &fixture.range.registry;
            let receipt = receipt.clone();
            let result = fixture.range.vm.transact(&mut fixture.manager, move |ctx, manager| {
                manager.execute_operation(ctx, registry, caller, &receipt)
            });
            assert!(result.unwrap_err().to_string().contains("LeverageCallUnallowed"));
        }
    }
}
