//! Contract events.
//!
//! Every state change publishes one event. Topics start with a short symbol
//! naming the event; task events carry the task id as the second topic so
//! indexers can follow a single task.

use crate::Party;
use soroban_sdk::{contracttype, symbol_short, Address, Env};

pub const EVENT_VERSION: u32 = 1;

#[contracttype]
#[derive(Clone, Debug)]
pub struct VaultInitialized {
    pub version: u32,
    pub admin: Address,
    pub token: Address,
    pub token_decimals: u32,
    pub deposit_amount: i128,
    pub timestamp: u64,
}

pub fn emit_vault_initialized(env: &Env, event: VaultInitialized) {
    let topics = (symbol_short!("init"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TaskCreated {
    pub version: u32,
    pub task_id: u64,
    pub client: Address,
    pub payment_amount: i128,
    pub timestamp: u64,
}

pub fn emit_task_created(env: &Env, event: TaskCreated) {
    let topics = (symbol_short!("t_create"), event.task_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TaskAccepted {
    pub version: u32,
    pub task_id: u64,
    pub freelancer: Address,
    pub deposit_amount: i128,
    pub auto_release_at: Option<u64>,
    pub timestamp: u64,
}

pub fn emit_task_accepted(env: &Env, event: TaskAccepted) {
    let topics = (symbol_short!("t_accept"), event.task_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TaskCompleted {
    pub version: u32,
    pub task_id: u64,
    pub freelancer: Address,
    pub amount: i128,
    /// `true` when the freelancer claimed after the review period instead of
    /// the client approving.
    pub auto_release: bool,
    pub timestamp: u64,
}

pub fn emit_task_completed(env: &Env, event: TaskCompleted) {
    let topics = (symbol_short!("t_done"), event.task_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TaskCancelled {
    pub version: u32,
    pub task_id: u64,
    pub client: Address,
    pub refunded: i128,
    pub timestamp: u64,
}

pub fn emit_task_cancelled(env: &Env, event: TaskCancelled) {
    let topics = (symbol_short!("t_cancel"), event.task_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct DisputeRaised {
    pub version: u32,
    pub task_id: u64,
    pub raised_by: Address,
    pub held_balance: i128,
    pub timestamp: u64,
}

pub fn emit_dispute_raised(env: &Env, event: DisputeRaised) {
    let topics = (symbol_short!("t_dispute"), event.task_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct DisputeResolved {
    pub version: u32,
    pub task_id: u64,
    pub arbiter: Address,
    pub award_to: Party,
    pub winner: Address,
    pub winner_amount: i128,
    pub other_amount: i128,
    pub timestamp: u64,
}

pub fn emit_dispute_resolved(env: &Env, event: DisputeResolved) {
    let topics = (symbol_short!("t_resolve"), event.task_id);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ArbiterUpdated {
    pub version: u32,
    pub previous: Address,
    pub arbiter: Address,
    pub timestamp: u64,
}

pub fn emit_arbiter_updated(env: &Env, event: ArbiterUpdated) {
    let topics = (symbol_short!("arbiter"),);
    env.events().publish(topics, event);
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PolicyUpdated {
    pub version: u32,
    pub review_period: u64,
    pub winner_share_bps: u32,
    pub timestamp: u64,
}

pub fn emit_policy_updated(env: &Env, event: PolicyUpdated) {
    let topics = (symbol_short!("policy"),);
    env.events().publish(topics, event);
}
