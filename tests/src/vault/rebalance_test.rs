//! Tick vault rebalance tests

#[cfg(test)]
mod tests {
    use crate::fixture::*;
    use crate::vault::fixture::VaultFixture;
    use range_test_framework::prelude::*;

    fn setup_fixture() -> VaultFixture {
        let mut fixture = VaultFixture::new().expect("Failed to create fixture");
        let (alice, base) = (fixture.range.alice, fixture.range.base);
        fixture
            .deposit(&alice, &base, 1_000 * ONE_BASE, 0)
            .expect("Failed to deposit");
        fixture
    }

    #[test]
    fn test_target_tick_follows_oracle() {
        let mut fixture = setup_fixture();
        assert_eq!(fixture.view(|ctx, vault| vault.target_tick_index(ctx)), 1);

        fixture.range.set_oracle_quote_price(1_160);
        assert_eq!(fixture.view(|ctx, vault| vault.target_tick_index(ctx)), 0);

        fixture.range.set_oracle_quote_price(1_380);
        assert_eq!(fixture.view(|ctx, vault| vault.target_tick_index(ctx)), 2);

        // Clamped so that four ticks always fit
        fixture.range.set_oracle_quote_price(5_000);
        assert_eq!(fixture.view(|ctx, vault| vault.target_tick_index(ctx)), 2);
        fixture.range.set_oracle_quote_price(500);
        assert_eq!(fixture.view(|ctx, vault| vault.target_tick_index(ctx)), 0);
    }

    #[test]
    fn test_rebalance_needs_pool_at_oracle() {
        let mut fixture = setup_fixture();

        fixture.range.set_oracle_quote_price(1_160);
        fixture.expect_revert_with("VaultOracleError", |f| f.rebalance());
        assert_eq!(fixture.vault.get_active_tick_index(), 1);

        fixture.range.set_pool_quote_price(1_160).unwrap();
        fixture.rebalance().expect("Failed to rebalance");
        assert_eq!(fixture.vault.get_active_tick_index(), 0);
    }

    #[test]
    fn test_rebalance_moves_window_down_and_up() {
        let mut fixture = setup_fixture();

        fixture.range.move_quote_price(1_160).unwrap();
        fixture.rebalance().unwrap();
        assert_eq!(fixture.vault.get_active_tick_index(), 0);

        // Tick 2 crossed to quote and is redeployed above price
        for index in 0..4 {
            assert!(fixture.tick_balance(index) > 0);
        }
        assert_eq!(fixture.tick_balance(4), 0);
        assert_eq!(fixture.tick_balance(5), 0);

        fixture.range.move_quote_price(1_380).unwrap();
        fixture.rebalance().unwrap();
        assert_eq!(fixture.vault.get_active_tick_index(), 2);

        assert_eq!(fixture.tick_balance(0), 0);
        assert_eq!(fixture.tick_balance(1), 0);
        assert!(fixture.tick_balance(2) > 0);
        assert!(fixture.tick_balance(3) > 0);
    }

    #[test]
    fn test_rebalance_in_place_is_noop() {
        let mut fixture = setup_fixture();
        let balance = fixture.tick_balance(1);

        // Same target: nothing moves even with the pool off the oracle
        fixture.range.set_pool_quote_price(1_300).unwrap();
        fixture.rebalance().unwrap();

        assert_eq!(fixture.vault.get_active_tick_index(), 1);
        assert_eq!(fixture.tick_balance(1), balance);
    }

    #[test]
    fn test_disabled_vault_keeps_assets_idle() {
        let mut fixture = setup_fixture();
        let owner = fixture.range.owner;
        let vault_key = fixture.vault.key;

        fixture.vault.set_enabled(owner, false).unwrap();
        fixture.range.move_quote_price(1_160).unwrap();
        fixture.rebalance().unwrap();

        assert_eq!(fixture.vault.get_active_tick_index(), 0);
        for index in 0..6 {
            assert_eq!(fixture.tick_balance(index), 0);
        }
        assert!(fixture.range.balance(&vault_key, &fixture.range.base) > 0);
        assert!(fixture.range.balance(&vault_key, &fixture.range.quote) > 0);
    }

    #[test]
    fn test_rebalance_leaves_borrowed_shares() {
        let mut fixture = setup_fixture();
        let (bob, base) = (fixture.range.bob, fixture.range.base);
        let tick = fixture.ticks[1];

        // Bob borrows most of the active tick against base
        fixture.range.list_pool_reserves().unwrap();
        fixture
            .range
            .supply_lending(&bob, &base, 100_000 * ONE_BASE)
            .unwrap();
        let supplied = fixture.tick_balance(1);
        let borrowed = supplied * 9 / 10;
        fixture.range.borrow_lending(&bob, &tick, borrowed).unwrap();
        fixture.range.vm.assert_token_balance_eq(&bob, &tick, borrowed);

        // Tick 1 drops out of the window
        fixture.range.move_quote_price(1_380).unwrap();
        fixture.rebalance().expect("Failed to rebalance");
        assert_eq!(fixture.vault.get_active_tick_index(), 2);

        let kept = fixture.tick_balance(1);
        assert!(kept >= borrowed);
        assert!(kept < supplied);
        assert_eq!(fixture.tick_balance(0), 0);

        // What could be withdrawn was redeployed in the new window
        for index in 2..4 {
            assert!(fixture.tick_balance(index) > 0);
        }
    }
}
