//! Leverage position manager tests

pub mod fixture;

mod close_test;
mod liquidate_test;
mod options_test;
