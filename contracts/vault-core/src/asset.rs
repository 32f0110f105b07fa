//! Token binding checks.
//!
//! A vault is bound once, at `init`, to the token every payment and deposit
//! is denominated in. The address must name a deployed contract that answers
//! the token interface; its decimals are returned so callers can express
//! amounts with [`crate::units::to_base_units`].

use soroban_sdk::{contracterror, token, xdr::ToXdr, Address, Env};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TokenError {
    /// An account (`G…`) address; accounts have no token interface.
    AccountAddress = 200,
    /// A contract address that did not answer `decimals()`.
    NotAToken = 201,
}

// XDR of an `ScVal::Address` is the 4-byte value tag followed by the 4-byte
// address tag; byte 7 is the low byte of the address tag.
const ADDRESS_TAG_BYTE: u32 = 7;
const SC_ADDRESS_TYPE_CONTRACT: u8 = 1;

pub fn is_contract(env: &Env, addr: &Address) -> bool {
    addr.clone().to_xdr(env).get(ADDRESS_TAG_BYTE) == Some(SC_ADDRESS_TYPE_CONTRACT)
}

/// Confirm `token` is a token contract and return its decimals.
pub fn bind_token(env: &Env, token: &Address) -> Result<u32, TokenError> {
    if !is_contract(env, token) {
        return Err(TokenError::AccountAddress);
    }
    match token::Client::new(env, token).try_decimals() {
        Ok(Ok(decimals)) => Ok(decimals),
        _ => Err(TokenError::NotAToken),
    }
}
