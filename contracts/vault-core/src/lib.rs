#![no_std]
//! Shared building blocks for the TaskVault contracts.
//!
//! - [`asset`]: checks that a vault token address is a token contract.
//! - [`units`]: integer money math (decimal scaling, basis-point splits).

pub mod asset;
pub mod units;
