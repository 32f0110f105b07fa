#![no_std]
//! # TaskVault
//!
//! Two-party escrow for task-based payments. A client funds a task with a
//! payment, a freelancer accepts it by posting the vault's fixed deposit, and
//! the vault releases or forfeits the held funds depending on how the task
//! ends.
//!
//! ## Task lifecycle
//!
//! ```text
//! Created ──accept──> Accepted ──complete──> Completed
//!    │                   │
//!  cancel             dispute
//!    │                   ▼
//!    ▼               Disputed ──resolve──> Resolved(Client | Freelancer)
//! Cancelled
//! ```
//!
//! `Completed`, `Cancelled` and `Resolved(_)` are terminal. Every operation
//! on a terminal task fails with [`Error::InvalidState`].
//!
//! ## Held balance
//!
//! | State               | held_balance                       |
//! |---------------------|------------------------------------|
//! | Created             | payment_amount                     |
//! | Accepted, Disputed  | payment_amount + deposit_amount    |
//! | terminal            | 0                                  |
//!
//! ## Atomicity
//!
//! Each entry point is one host invocation. Returning `Err` (or panicking)
//! rolls back every storage write and token transfer made by that
//! invocation, so a state change is never visible without its fund
//! movement. Storage effects are written before outbound transfers and every
//! mutating entry point holds the reentrancy guard.

mod events;
mod invariants;
mod reentrancy_guard;

use events::{
    emit_arbiter_updated, emit_dispute_raised, emit_dispute_resolved, emit_policy_updated,
    emit_task_accepted, emit_task_cancelled, emit_task_completed, emit_task_created,
    emit_vault_initialized, ArbiterUpdated, DisputeRaised, DisputeResolved, PolicyUpdated,
    TaskAccepted, TaskCancelled, TaskCompleted, TaskCreated, VaultInitialized, EVENT_VERSION,
};
use soroban_sdk::{contract, contracterror, contractimpl, contracttype, token, Address, Env, Vec};
use vault_core::{asset, units};

/// Persistent entries are bumped to roughly 30 days on every write.
const TASK_TTL_THRESHOLD: u32 = 17_280;
const TASK_TTL_EXTEND: u32 = 518_400;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    /// Non-positive payment or deposit value.
    InvalidAmount = 3,
    /// Caller's token balance cannot cover the required transfer.
    InsufficientFunds = 4,
    TaskNotFound = 5,
    /// Operation is not valid from the task's current state, including any
    /// operation on a terminal task.
    InvalidState = 6,
    /// Caller lacks the role required for the operation.
    Unauthorized = 7,
    InvalidTokenId = 8,
    /// Dispute share outside `1..=10_000` basis points.
    InvalidPolicy = 9,
    Overflow = 10,
}

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Party {
    Client,
    Freelancer,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TaskState {
    Created,
    Accepted,
    Disputed,
    Completed,
    Cancelled,
    Resolved(Party),
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Cancelled | TaskState::Resolved(_)
        )
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Task {
    pub id: u64,
    pub client: Address,
    /// Set exactly once, on `Created -> Accepted`.
    pub freelancer: Option<Address>,
    pub payment_amount: i128,
    /// Snapshot of the vault deposit at creation time.
    pub deposit_amount: i128,
    pub state: TaskState,
    pub held_balance: i128,
    pub created_at: u64,
    pub accepted_at: Option<u64>,
    /// When set, the freelancer may complete the task without the client
    /// once the ledger timestamp reaches this value.
    pub auto_release_at: Option<u64>,
    pub disputed_by: Option<Address>,
}

/// State a transition started from.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PriorState {
    /// The creation record; the task did not exist before.
    Initial,
    From(TaskState),
}

/// One entry of a task's append-only audit trail.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransitionRecord {
    pub from: PriorState,
    pub to: TaskState,
    pub actor: Address,
    /// Value moved by the transition; 0 when nothing moved.
    pub amount: i128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DisputePolicy {
    /// Share of the held balance paid to the winning party, in basis points.
    /// The other party receives the remainder.
    pub winner_share_bps: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VaultConfig {
    pub admin: Address,
    pub token: Address,
    pub token_decimals: u32,
    pub deposit_amount: i128,
    pub arbiter: Address,
    /// Seconds after acceptance before auto-release becomes available.
    /// Zero disables auto-release.
    pub review_period: u64,
    pub dispute_policy: DisputePolicy,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct VaultStats {
    pub total_deposited: i128,
    pub total_disbursed: i128,
    pub tasks_created: u64,
    pub tasks_completed: u64,
    pub tasks_cancelled: u64,
    pub tasks_resolved: u64,
}

impl VaultStats {
    /// Funds the ledger accounts as currently held across all tasks.
    pub fn held(&self) -> i128 {
        self.total_deposited - self.total_disbursed
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Token,
    TokenDecimals,
    DepositAmount,
    Arbiter,
    ReviewPeriod,
    DisputePolicy,
    TaskCounter,
    Stats,
    ReentrancyGuard,
    Task(u64),
    History(u64),
    ClientIndex(Address),     // Vec<u64> of task ids funded by client
    FreelancerIndex(Address), // Vec<u64> of task ids accepted by freelancer
}

#[contract]
pub struct TaskVaultContract;

#[contractimpl]
impl TaskVaultContract {
    /// Bind the vault to its token and fixed freelancer deposit.
    ///
    /// The deploying `admin` is also the initial arbiter.
    pub fn init(
        env: Env,
        admin: Address,
        token: Address,
        deposit_amount: i128,
    ) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(Error::AlreadyInitialized);
        }
        if deposit_amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        let token_decimals = asset::bind_token(&env, &token).map_err(|_| Error::InvalidTokenId)?;

        let storage = env.storage().instance();
        storage.set(&DataKey::Admin, &admin);
        storage.set(&DataKey::Token, &token);
        storage.set(&DataKey::TokenDecimals, &token_decimals);
        storage.set(&DataKey::DepositAmount, &deposit_amount);
        storage.set(&DataKey::Arbiter, &admin);
        storage.set(&DataKey::ReviewPeriod, &0_u64);
        storage.set(
            &DataKey::DisputePolicy,
            &DisputePolicy {
                winner_share_bps: units::BASIS_POINTS,
            },
        );
        storage.set(&DataKey::Stats, &VaultStats::default());

        emit_vault_initialized(
            &env,
            VaultInitialized {
                version: EVENT_VERSION,
                admin,
                token,
                token_decimals,
                deposit_amount,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    // ── Configuration ──────────────────────────────────────────────────

    /// Rotate the arbitration authority (admin only). Disputes already open
    /// are resolved by whoever is arbiter at resolution time.
    pub fn set_arbiter(env: Env, arbiter: Address) -> Result<(), Error> {
        let admin = Self::admin(&env)?;
        admin.require_auth();

        let previous: Address = env
            .storage()
            .instance()
            .get(&DataKey::Arbiter)
            .unwrap_or(admin);
        env.storage().instance().set(&DataKey::Arbiter, &arbiter);

        emit_arbiter_updated(
            &env,
            ArbiterUpdated {
                version: EVENT_VERSION,
                previous,
                arbiter,
                timestamp: env.ledger().timestamp(),
            },
        );
        Ok(())
    }

    /// Set the auto-release review period in seconds (admin only). Applies to
    /// tasks accepted after the change; `0` disables auto-release.
    pub fn set_review_period(env: Env, seconds: u64) -> Result<(), Error> {
        Self::admin(&env)?.require_auth();
        env.storage().instance().set(&DataKey::ReviewPeriod, &seconds);
        Self::publish_policy(&env);
        Ok(())
    }

    /// Set the winner's share of a resolved dispute (admin only).
    pub fn set_dispute_policy(env: Env, winner_share_bps: u32) -> Result<(), Error> {
        Self::admin(&env)?.require_auth();
        if winner_share_bps == 0 || winner_share_bps > units::BASIS_POINTS {
            return Err(Error::InvalidPolicy);
        }
        env.storage()
            .instance()
            .set(&DataKey::DisputePolicy, &DisputePolicy { winner_share_bps });
        Self::publish_policy(&env);
        Ok(())
    }

    pub fn get_config(env: Env) -> Result<VaultConfig, Error> {
        let admin = Self::admin(&env)?;
        let storage = env.storage().instance();
        Ok(VaultConfig {
            arbiter: storage.get(&DataKey::Arbiter).unwrap_or(admin.clone()),
            admin,
            token: Self::token(&env)?,
            token_decimals: storage.get(&DataKey::TokenDecimals).unwrap_or(0),
            deposit_amount: Self::deposit_amount(&env)?,
            review_period: Self::review_period(&env),
            dispute_policy: Self::dispute_policy(&env),
        })
    }

    // ── Task lifecycle ─────────────────────────────────────────────────

    /// Fund a new task. The client's `payment_amount` moves into the vault in
    /// the same invocation that records the task.
    pub fn create_task(env: Env, client: Address, payment_amount: i128) -> Result<u64, Error> {
        // GUARD: held until this call returns
        let _lock = reentrancy_guard::enter(&env);
        client.require_auth();

        let token_addr = Self::token(&env)?;
        let deposit_amount = Self::deposit_amount(&env)?;
        if payment_amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let token_client = token::Client::new(&env, &token_addr);
        if token_client.balance(&client) < payment_amount {
            return Err(Error::InsufficientFunds);
        }

        // EFFECTS
        let task_id = Self::next_task_id(&env)?;
        let now = env.ledger().timestamp();
        let task = Task {
            id: task_id,
            client: client.clone(),
            freelancer: None,
            payment_amount,
            deposit_amount,
            state: TaskState::Created,
            held_balance: payment_amount,
            created_at: now,
            accepted_at: None,
            auto_release_at: None,
            disputed_by: None,
        };
        invariants::assert_task(&env, &task);
        Self::save_task(&env, &task);
        Self::append_history(
            &env,
            task_id,
            TransitionRecord {
                from: PriorState::Initial,
                to: TaskState::Created,
                actor: client.clone(),
                amount: payment_amount,
                timestamp: now,
            },
        );
        Self::push_index(&env, DataKey::ClientIndex(client.clone()), task_id);

        let mut stats = Self::stats(&env);
        stats.total_deposited = stats
            .total_deposited
            .checked_add(payment_amount)
            .ok_or(Error::Overflow)?;
        stats.tasks_created += 1;
        env.storage().instance().set(&DataKey::Stats, &stats);

        // INTERACTION
        token_client.transfer(&client, &env.current_contract_address(), &payment_amount);

        emit_task_created(
            &env,
            TaskCreated {
                version: EVENT_VERSION,
                task_id,
                client,
                payment_amount,
                timestamp: now,
            },
        );

        let vault_balance = token_client.balance(&env.current_contract_address());
        invariants::assert_solvent(&env, &stats, vault_balance);
        Ok(task_id)
    }

    /// Accept a `Created` task, posting the vault deposit.
    pub fn accept_task(env: Env, task_id: u64, freelancer: Address) -> Result<(), Error> {
        let _lock = reentrancy_guard::enter(&env);
        freelancer.require_auth();

        let token_addr = Self::token(&env)?;
        let mut task = Self::load_task(&env, task_id)?;
        if task.state.is_terminal() {
            return Err(Error::InvalidState);
        }
        if freelancer == task.client {
            return Err(Error::Unauthorized);
        }
        if task.state != TaskState::Created {
            return Err(Error::InvalidState);
        }

        let token_client = token::Client::new(&env, &token_addr);
        if token_client.balance(&freelancer) < task.deposit_amount {
            return Err(Error::InsufficientFunds);
        }

        let now = env.ledger().timestamp();
        let review_period = Self::review_period(&env);
        let auto_release_at = match review_period {
            0 => None,
            period => Some(now.checked_add(period).ok_or(Error::Overflow)?),
        };

        task.freelancer = Some(freelancer.clone());
        task.state = TaskState::Accepted;
        task.held_balance = task
            .payment_amount
            .checked_add(task.deposit_amount)
            .ok_or(Error::Overflow)?;
        task.accepted_at = Some(now);
        task.auto_release_at = auto_release_at;
        invariants::assert_task(&env, &task);
        Self::save_task(&env, &task);
        Self::append_history(
            &env,
            task_id,
            TransitionRecord {
                from: PriorState::From(TaskState::Created),
                to: TaskState::Accepted,
                actor: freelancer.clone(),
                amount: task.deposit_amount,
                timestamp: now,
            },
        );
        Self::push_index(&env, DataKey::FreelancerIndex(freelancer.clone()), task_id);

        let mut stats = Self::stats(&env);
        stats.total_deposited = stats
            .total_deposited
            .checked_add(task.deposit_amount)
            .ok_or(Error::Overflow)?;
        env.storage().instance().set(&DataKey::Stats, &stats);

        token_client.transfer(
            &freelancer,
            &env.current_contract_address(),
            &task.deposit_amount,
        );

        emit_task_accepted(
            &env,
            TaskAccepted {
                version: EVENT_VERSION,
                task_id,
                freelancer,
                deposit_amount: task.deposit_amount,
                auto_release_at,
                timestamp: now,
            },
        );

        let vault_balance = token_client.balance(&env.current_contract_address());
        invariants::assert_solvent(&env, &stats, vault_balance);
        Ok(())
    }

    /// Approve the work and release payment plus deposit to the freelancer.
    ///
    /// Callable by the client, or by the freelancer once the task's
    /// `auto_release_at` has passed.
    pub fn complete_task(env: Env, task_id: u64, caller: Address) -> Result<(), Error> {
        let _lock = reentrancy_guard::enter(&env);
        caller.require_auth();

        let token_addr = Self::token(&env)?;
        let mut task = Self::load_task(&env, task_id)?;
        if task.state.is_terminal() {
            return Err(Error::InvalidState);
        }

        let now = env.ledger().timestamp();
        let is_client = caller == task.client;
        let release_due = matches!(task.auto_release_at, Some(at) if now >= at);
        let is_freelancer = task.freelancer.as_ref() == Some(&caller);
        if !is_client && !(is_freelancer && release_due) {
            return Err(Error::Unauthorized);
        }
        if task.state != TaskState::Accepted {
            return Err(Error::InvalidState);
        }
        let freelancer = task.freelancer.clone().ok_or(Error::InvalidState)?;

        // EFFECTS: update state before external call (CEI)
        let payout = task.held_balance;
        task.state = TaskState::Completed;
        task.held_balance = 0;
        invariants::assert_task(&env, &task);
        Self::save_task(&env, &task);
        Self::append_history(
            &env,
            task_id,
            TransitionRecord {
                from: PriorState::From(TaskState::Accepted),
                to: TaskState::Completed,
                actor: caller,
                amount: payout,
                timestamp: now,
            },
        );

        let mut stats = Self::stats(&env);
        stats.total_disbursed = stats
            .total_disbursed
            .checked_add(payout)
            .ok_or(Error::Overflow)?;
        stats.tasks_completed += 1;
        env.storage().instance().set(&DataKey::Stats, &stats);

        // INTERACTION: external token transfer is last
        let token_client = token::Client::new(&env, &token_addr);
        token_client.transfer(&env.current_contract_address(), &freelancer, &payout);

        emit_task_completed(
            &env,
            TaskCompleted {
                version: EVENT_VERSION,
                task_id,
                freelancer,
                amount: payout,
                auto_release: !is_client,
                timestamp: now,
            },
        );

        let vault_balance = token_client.balance(&env.current_contract_address());
        invariants::assert_solvent(&env, &stats, vault_balance);
        Ok(())
    }

    /// Withdraw a task nobody has accepted yet, refunding the client.
    pub fn cancel_task(env: Env, task_id: u64, caller: Address) -> Result<(), Error> {
        let _lock = reentrancy_guard::enter(&env);
        caller.require_auth();

        let token_addr = Self::token(&env)?;
        let mut task = Self::load_task(&env, task_id)?;
        if task.state.is_terminal() {
            return Err(Error::InvalidState);
        }
        // Once a freelancer is attached no caller can cancel, so the state
        // check comes before the role check here.
        if task.state != TaskState::Created || task.freelancer.is_some() {
            return Err(Error::InvalidState);
        }
        if caller != task.client {
            return Err(Error::Unauthorized);
        }

        let now = env.ledger().timestamp();
        let refund = task.held_balance;
        task.state = TaskState::Cancelled;
        task.held_balance = 0;
        invariants::assert_task(&env, &task);
        Self::save_task(&env, &task);
        Self::append_history(
            &env,
            task_id,
            TransitionRecord {
                from: PriorState::From(TaskState::Created),
                to: TaskState::Cancelled,
                actor: caller,
                amount: refund,
                timestamp: now,
            },
        );

        let mut stats = Self::stats(&env);
        stats.total_disbursed = stats
            .total_disbursed
            .checked_add(refund)
            .ok_or(Error::Overflow)?;
        stats.tasks_cancelled += 1;
        env.storage().instance().set(&DataKey::Stats, &stats);

        let token_client = token::Client::new(&env, &token_addr);
        token_client.transfer(&env.current_contract_address(), &task.client, &refund);

        emit_task_cancelled(
            &env,
            TaskCancelled {
                version: EVENT_VERSION,
                task_id,
                client: task.client.clone(),
                refunded: refund,
                timestamp: now,
            },
        );

        let vault_balance = token_client.balance(&env.current_contract_address());
        invariants::assert_solvent(&env, &stats, vault_balance);
        Ok(())
    }

    /// Freeze an `Accepted` task pending arbitration. No funds move.
    pub fn raise_dispute(env: Env, task_id: u64, caller: Address) -> Result<(), Error> {
        let _lock = reentrancy_guard::enter(&env);
        caller.require_auth();

        Self::admin(&env)?;
        let mut task = Self::load_task(&env, task_id)?;
        if task.state.is_terminal() {
            return Err(Error::InvalidState);
        }
        let is_party = caller == task.client || task.freelancer.as_ref() == Some(&caller);
        if !is_party {
            return Err(Error::Unauthorized);
        }
        if task.state != TaskState::Accepted {
            return Err(Error::InvalidState);
        }

        let now = env.ledger().timestamp();
        task.state = TaskState::Disputed;
        task.disputed_by = Some(caller.clone());
        invariants::assert_task(&env, &task);
        Self::save_task(&env, &task);
        Self::append_history(
            &env,
            task_id,
            TransitionRecord {
                from: PriorState::From(TaskState::Accepted),
                to: TaskState::Disputed,
                actor: caller.clone(),
                amount: 0,
                timestamp: now,
            },
        );

        emit_dispute_raised(
            &env,
            DisputeRaised {
                version: EVENT_VERSION,
                task_id,
                raised_by: caller,
                held_balance: task.held_balance,
                timestamp: now,
            },
        );

        Ok(())
    }

    /// Settle a dispute in favour of `award_to`. The winner receives the
    /// policy share of payment plus deposit, the other party the remainder.
    pub fn resolve_dispute(
        env: Env,
        task_id: u64,
        arbiter: Address,
        award_to: Party,
    ) -> Result<(), Error> {
        let _lock = reentrancy_guard::enter(&env);
        arbiter.require_auth();

        let token_addr = Self::token(&env)?;
        let mut task = Self::load_task(&env, task_id)?;
        if task.state.is_terminal() {
            return Err(Error::InvalidState);
        }
        if arbiter != Self::arbiter(&env)? {
            return Err(Error::Unauthorized);
        }
        if task.state != TaskState::Disputed {
            return Err(Error::InvalidState);
        }
        let freelancer = task.freelancer.clone().ok_or(Error::InvalidState)?;

        let policy = Self::dispute_policy(&env);
        let total = task.held_balance;
        let (winner_amount, other_amount) =
            units::split_bps(total, policy.winner_share_bps).ok_or(Error::Overflow)?;
        let (winner, other) = match award_to {
            Party::Client => (task.client.clone(), freelancer),
            Party::Freelancer => (freelancer, task.client.clone()),
        };

        let now = env.ledger().timestamp();
        task.state = TaskState::Resolved(award_to);
        task.held_balance = 0;
        invariants::assert_task(&env, &task);
        Self::save_task(&env, &task);
        Self::append_history(
            &env,
            task_id,
            TransitionRecord {
                from: PriorState::From(TaskState::Disputed),
                to: TaskState::Resolved(award_to),
                actor: arbiter.clone(),
                amount: total,
                timestamp: now,
            },
        );

        let mut stats = Self::stats(&env);
        stats.total_disbursed = stats
            .total_disbursed
            .checked_add(total)
            .ok_or(Error::Overflow)?;
        stats.tasks_resolved += 1;
        env.storage().instance().set(&DataKey::Stats, &stats);

        let token_client = token::Client::new(&env, &token_addr);
        let vault = env.current_contract_address();
        if winner_amount > 0 {
            token_client.transfer(&vault, &winner, &winner_amount);
        }
        if other_amount > 0 {
            token_client.transfer(&vault, &other, &other_amount);
        }

        emit_dispute_resolved(
            &env,
            DisputeResolved {
                version: EVENT_VERSION,
                task_id,
                arbiter,
                award_to,
                winner,
                winner_amount,
                other_amount,
                timestamp: now,
            },
        );

        invariants::assert_solvent(&env, &stats, token_client.balance(&vault));
        Ok(())
    }

    // ── Views ──────────────────────────────────────────────────────────

    /// Amount currently held for the task.
    pub fn balance_of(env: Env, task_id: u64) -> Result<i128, Error> {
        Ok(Self::load_task(&env, task_id)?.held_balance)
    }

    pub fn get_task(env: Env, task_id: u64) -> Result<Task, Error> {
        Self::load_task(&env, task_id)
    }

    /// Transition records in the order they were applied.
    pub fn get_history(env: Env, task_id: u64) -> Result<Vec<TransitionRecord>, Error> {
        Self::load_task(&env, task_id)?;
        Ok(env
            .storage()
            .persistent()
            .get(&DataKey::History(task_id))
            .unwrap_or(Vec::new(&env)))
    }

    pub fn get_task_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::TaskCounter)
            .unwrap_or(0)
    }

    pub fn get_tasks_by_client(env: Env, client: Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::ClientIndex(client))
            .unwrap_or(Vec::new(&env))
    }

    pub fn get_tasks_by_freelancer(env: Env, freelancer: Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::FreelancerIndex(freelancer))
            .unwrap_or(Vec::new(&env))
    }

    pub fn get_stats(env: Env) -> VaultStats {
        Self::stats(&env)
    }

    /// Per-task invariant check. `false` for unknown tasks.
    pub fn verify_task(env: Env, task_id: u64) -> bool {
        match Self::load_task(&env, task_id) {
            Ok(task) => invariants::check_task(&task),
            Err(_) => false,
        }
    }

    /// Checks every task plus the aggregate ledger-to-token balance relation.
    pub fn verify_all_invariants(env: Env) -> bool {
        if !env.storage().instance().has(&DataKey::Admin) {
            return false;
        }
        invariants::check_vault(&env)
    }

    // ── Internal helpers ───────────────────────────────────────────────

    fn admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    fn token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(Error::NotInitialized)
    }

    fn deposit_amount(env: &Env) -> Result<i128, Error> {
        env.storage()
            .instance()
            .get(&DataKey::DepositAmount)
            .ok_or(Error::NotInitialized)
    }

    fn arbiter(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Arbiter)
            .ok_or(Error::NotInitialized)
    }

    fn review_period(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::ReviewPeriod)
            .unwrap_or(0)
    }

    fn dispute_policy(env: &Env) -> DisputePolicy {
        env.storage()
            .instance()
            .get(&DataKey::DisputePolicy)
            .unwrap_or(DisputePolicy {
                winner_share_bps: units::BASIS_POINTS,
            })
    }

    fn stats(env: &Env) -> VaultStats {
        env.storage()
            .instance()
            .get(&DataKey::Stats)
            .unwrap_or_default()
    }

    fn publish_policy(env: &Env) {
        emit_policy_updated(
            env,
            PolicyUpdated {
                version: EVENT_VERSION,
                review_period: Self::review_period(env),
                winner_share_bps: Self::dispute_policy(env).winner_share_bps,
                timestamp: env.ledger().timestamp(),
            },
        );
    }

    fn next_task_id(env: &Env) -> Result<u64, Error> {
        let last: u64 = env
            .storage()
            .instance()
            .get(&DataKey::TaskCounter)
            .unwrap_or(0);
        let next = last.checked_add(1).ok_or(Error::Overflow)?;
        env.storage().instance().set(&DataKey::TaskCounter, &next);
        Ok(next)
    }

    fn load_task(env: &Env, task_id: u64) -> Result<Task, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Task(task_id))
            .ok_or(Error::TaskNotFound)
    }

    fn save_task(env: &Env, task: &Task) {
        let key = DataKey::Task(task.id);
        env.storage().persistent().set(&key, task);
        env.storage()
            .persistent()
            .extend_ttl(&key, TASK_TTL_THRESHOLD, TASK_TTL_EXTEND);
    }

    fn append_history(env: &Env, task_id: u64, record: TransitionRecord) {
        let key = DataKey::History(task_id);
        let mut history: Vec<TransitionRecord> = env
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or(Vec::new(env));
        history.push_back(record);
        env.storage().persistent().set(&key, &history);
        env.storage()
            .persistent()
            .extend_ttl(&key, TASK_TTL_THRESHOLD, TASK_TTL_EXTEND);
    }

    fn push_index(env: &Env, key: DataKey, task_id: u64) {
        let mut ids: Vec<u64> = env
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or(Vec::new(env));
        ids.push_back(task_id);
        env.storage().persistent().set(&key, &ids);
    }
}

#[cfg(test)]
mod test_config;
#[cfg(test)]
mod test_front_running_ordering;
