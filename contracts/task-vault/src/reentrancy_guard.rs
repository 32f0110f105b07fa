//! # Reentrancy Guard
//!
//! A flag in instance storage held for the duration of every mutating entry
//! point. A token contract that calls back into the vault while a transfer is
//! in flight finds the flag set and panics. One key is shared by all entry
//! points, which also blocks cross-function re-entry (e.g. a callback from
//! `complete_task` into `cancel_task`).
//!
//! [`enter`] returns a [`VaultLock`] that clears the flag when dropped, so
//! every return path of an entry point releases it. On an `Err` return the
//! host discards the invocation's writes anyway.

use super::DataKey;
use soroban_sdk::Env;

/// Scope of one guarded entry point.
pub struct VaultLock<'a> {
    env: &'a Env,
}

/// # Panics
/// Panics with `"vault is locked by an in-flight call"` if another entry
/// point is still running.
pub fn enter(env: &Env) -> VaultLock<'_> {
    let storage = env.storage().instance();
    if storage.get(&DataKey::ReentrancyGuard).unwrap_or(false) {
        panic!("vault is locked by an in-flight call");
    }
    storage.set(&DataKey::ReentrancyGuard, &true);
    VaultLock { env }
}

impl Drop for VaultLock<'_> {
    fn drop(&mut self) {
        self.env
            .storage()
            .instance()
            .remove(&DataKey::ReentrancyGuard);
    }
}

#[cfg(test)]
pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::ReentrancyGuard)
        .unwrap_or(false)
}
