#![cfg(test)]

pub mod config_wiring_tests;
pub mod dispatch_tests;
pub mod shared_tests;
