//! Ledger invariants.
//!
//! Per task:
//! - `payment_amount > 0` and `deposit_amount > 0`
//! - `held_balance` is `payment_amount` in `Created`,
//!   `payment_amount + deposit_amount` in `Accepted`/`Disputed`, and 0 once
//!   terminal
//! - a freelancer is attached exactly when the task left `Created` through
//!   acceptance (every state except `Created` and `Cancelled`)
//!
//! Vault-wide:
//! - the sum of held balances equals `total_deposited - total_disbursed`
//! - that sum never exceeds the vault's token balance

use crate::{DataKey, Task, TaskState, VaultStats};
use soroban_sdk::{token, Address, Env};

#[cfg(test)]
use soroban_sdk::{symbol_short, Symbol};

#[cfg(test)]
const INV_CALLS: Symbol = symbol_short!("InvCalls");

#[cfg(test)]
fn record_call(env: &Env) {
    let calls: u32 = env.storage().instance().get(&INV_CALLS).unwrap_or(0);
    env.storage().instance().set(&INV_CALLS, &(calls + 1));
}

#[cfg(not(test))]
fn record_call(_env: &Env) {}

/// The held balance a task must carry in its current state, or `None` on
/// overflow.
pub(crate) fn expected_held(task: &Task) -> Option<i128> {
    match task.state {
        TaskState::Created => Some(task.payment_amount),
        TaskState::Accepted | TaskState::Disputed => {
            task.payment_amount.checked_add(task.deposit_amount)
        }
        TaskState::Completed | TaskState::Cancelled | TaskState::Resolved(_) => Some(0),
    }
}

pub(crate) fn check_task(task: &Task) -> bool {
    if task.payment_amount <= 0 || task.deposit_amount <= 0 {
        return false;
    }
    if expected_held(task) != Some(task.held_balance) {
        return false;
    }
    let needs_freelancer = !matches!(task.state, TaskState::Created | TaskState::Cancelled);
    task.freelancer.is_some() == needs_freelancer
}

pub(crate) fn assert_task(env: &Env, task: &Task) {
    record_call(env);
    if task.payment_amount <= 0 {
        panic!("Invariant violated: payment_amount must be positive");
    }
    if task.deposit_amount <= 0 {
        panic!("Invariant violated: deposit_amount must be positive");
    }
    if expected_held(task) != Some(task.held_balance) {
        panic!("Invariant violated: held_balance does not match task state");
    }
    if !check_task(task) {
        panic!("Invariant violated: freelancer assignment does not match task state");
    }
}

/// Accounted holdings must be non-negative and covered by the vault's actual
/// token balance.
pub(crate) fn assert_solvent(env: &Env, stats: &VaultStats, token_balance: i128) {
    record_call(env);
    let held = stats.held();
    if held < 0 {
        panic!("Invariant violated: disbursed more than deposited");
    }
    if held > token_balance {
        panic!("Invariant violated: held funds exceed vault token balance");
    }
}

/// Walks every task ever created.
pub(crate) fn check_vault(env: &Env) -> bool {
    let count: u64 = env
        .storage()
        .instance()
        .get(&DataKey::TaskCounter)
        .unwrap_or(0);
    let stats: VaultStats = env
        .storage()
        .instance()
        .get(&DataKey::Stats)
        .unwrap_or_default();

    let mut total_held: i128 = 0;
    for task_id in 1..=count {
        let task: Task = match env.storage().persistent().get(&DataKey::Task(task_id)) {
            Some(task) => task,
            None => return false,
        };
        if !check_task(&task) {
            return false;
        }
        total_held = match total_held.checked_add(task.held_balance) {
            Some(total) => total,
            None => return false,
        };
    }

    let token_addr: Address = match env.storage().instance().get(&DataKey::Token) {
        Some(addr) => addr,
        None => return false,
    };
    let vault_balance =
        token::Client::new(env, &token_addr).balance(&env.current_contract_address());

    total_held == stats.held() && total_held <= vault_balance
}

#[cfg(test)]
pub(crate) fn reset_test_state(env: &Env) {
    env.storage().instance().set(&INV_CALLS, &0_u32);
}

#[cfg(test)]
pub(crate) fn call_count_for_test(env: &Env) -> u32 {
    env.storage().instance().get(&INV_CALLS).unwrap_or(0)
}
