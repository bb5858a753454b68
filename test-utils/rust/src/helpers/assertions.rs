use anchor_lang::prelude::Pubkey;

use super::tokens::TokenHelper;
use crate::{core::vm::Vm, errors::VmError};

/// Result of an `expect_revert` check, containing details about the failure
#[derive(Debug, Clone)]
pub struct RevertInfo {
    /// The error that caused the revert
    pub error: String,
}

impl RevertInfo {
    /// Check if the error contains the expected message
    pub fn contains(&self, message: &str) -> bool {
        self.error.contains(message)
    }
}

/// Core assertion trait
pub trait Assertions {
    /// Assert token balance equals expected
    fn assert_token_balance_eq(&self, owner: &Pubkey, mint: &Pubkey, expected: u128);

    /// Assert approximate equality with absolute delta
    fn assert_approx_eq(&self, actual: u128, expected: u128, delta: u128);

    /// Assert approximate equality within `max_bps` of `expected`
    fn assert_approx_eq_rel(&self, actual: u128, expected: u128, max_bps: u128);
}

impl Assertions for Vm {
    fn assert_token_balance_eq(&self, owner: &Pubkey, mint: &Pubkey, expected: u128) {
        let actual = self.token_balance(owner, mint);
        assert_eq!(
            actual, expected,
            "Token balance mismatch for owner {} mint {}.\nExpected: {}\nActual:   {}",
            owner, mint, expected, actual
        );
    }

    fn assert_approx_eq(&self, actual: u128, expected: u128, delta: u128) {
        let diff = actual.abs_diff(expected);

        assert!(
            diff <= delta,
            "Values not approximately equal.\nExpected: {}\nActual:   {}\nDiff:     {} (max allowed: {})",
            expected, actual, diff, delta
        );
    }

    fn assert_approx_eq_rel(&self, actual: u128, expected: u128, max_bps: u128) {
        let diff = actual.abs_diff(expected);
        let allowed = expected / 10_000 * max_bps;

        assert!(
            diff <= allowed,
            "Values not approximately equal.\nExpected: {}\nActual:   {}\nDiff:     {} (max allowed: {} bps)",
            expected, actual, diff, max_bps
        );
    }
}

/// Trait for types that can provide mutable access to an underlying [`Vm`]
pub trait VmAccess {
    fn vm_mut(&mut self) -> &mut Vm;
}

impl VmAccess for Vm {
    fn vm_mut(&mut self) -> &mut Vm {
        self
    }
}

/// Extension trait that provides `expect_revert` style assertions.
pub trait ExpectRevertExt: VmAccess {
    /// Run `action` and assert that it reverts with one of the provided `expected_messages`.
    fn expect_revert<F, T, E>(&mut self, expected_messages: &[&str], action: F) -> RevertInfo
    where
        F: FnOnce(&mut Self) -> std::result::Result<T, E>,
        E: Into<VmError>,
    {
        self.expect_revert_any(expected_messages, action)
    }

    /// Run `action` and assert that it reverts with the provided `expected_message`.
    fn expect_revert_with<F, T, E>(&mut self, expected_message: &str, action: F) -> RevertInfo
    where
        F: FnOnce(&mut Self) -> std::result::Result<T, E>,
        E: Into<VmError>,
    {
        self.expect_revert(&[expected_message], action)
    }

    /// Run `action` and assert it reverts with any of the provided `expected_messages`.
    fn expect_revert_any<F, T, E>(&mut self, expected_messages: &[&str], action: F) -> RevertInfo
    where
        F: FnOnce(&mut Self) -> std::result::Result<T, E>,
        E: Into<VmError>,
    {
        self.vm_mut().clear_last_error();

        let result = action(self);

        match result {
            Ok(_) => panic!(
                "Expected revert containing {:?}, but the call succeeded",
                expected_messages
            ),
            Err(err) => {
                let err: VmError = err.into();
                let info = RevertInfo {
                    error: err.to_string(),
                };

                let vm = self.vm_mut();
                assert!(
                    expected_messages
                        .iter()
                        .any(|expected| vm.revert_matches(expected, &err)),
                    "Expected revert containing one of {:?}, got: {}",
                    expected_messages,
                    info.error
                );

                info
            }
        }
    }
}

impl<T: VmAccess> ExpectRevertExt for T {}
