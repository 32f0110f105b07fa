//! Racing callers on the same task.
//!
//! Invocations are applied one at a time, so a race is one of its two
//! orderings. Each test runs both orderings and checks that exactly one call
//! wins while the other observes the post-transition state.

use super::*;
use soroban_sdk::{testutils::Address as _, token, Address, Env};

struct TestSetup<'a> {
    env: Env,
    arbiter: Address,
    client: Address,
    freelancer: Address,
    token: token::Client<'a>,
    token_admin: token::StellarAssetClient<'a>,
    vault: TaskVaultContractClient<'a>,
}

impl<'a> TestSetup<'a> {
    fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();

        let admin = Address::generate(&env);
        let client = Address::generate(&env);
        let freelancer = Address::generate(&env);

        let token_id = env.register_stellar_asset_contract_v2(admin.clone()).address();
        let token = token::Client::new(&env, &token_id);
        let token_admin = token::StellarAssetClient::new(&env, &token_id);
        token_admin.mint(&client, &1_000_000);
        token_admin.mint(&freelancer, &1_000);

        let contract_id = env.register_contract(None, TaskVaultContract);
        let vault = TaskVaultContractClient::new(&env, &contract_id);
        vault.init(&admin, &token_id, &10);

        Self {
            env,
            arbiter: admin,
            client,
            freelancer,
            token,
            token_admin,
            vault,
        }
    }

    fn accepted_task(&self, payment: i128) -> u64 {
        let task_id = self.vault.create_task(&self.client, &payment);
        self.vault.accept_task(&task_id, &self.freelancer);
        task_id
    }
}

#[test]
fn test_complete_then_dispute() {
    let setup = TestSetup::new();
    let task_id = setup.accepted_task(80_000);

    setup.vault.complete_task(&task_id, &setup.client);
    let dispute = setup.vault.try_raise_dispute(&task_id, &setup.freelancer);

    assert_eq!(dispute, Err(Ok(Error::InvalidState)));
    let task = setup.vault.get_task(&task_id);
    assert_eq!(task.state, TaskState::Completed);
    assert_eq!(task.disputed_by, None);
    assert_eq!(setup.token.balance(&setup.freelancer), 1_000 + 80_000);
}

#[test]
fn test_dispute_then_complete() {
    let setup = TestSetup::new();
    let task_id = setup.accepted_task(80_000);

    setup.vault.raise_dispute(&task_id, &setup.freelancer);
    let complete = setup.vault.try_complete_task(&task_id, &setup.client);

    assert_eq!(complete, Err(Ok(Error::InvalidState)));
    let task = setup.vault.get_task(&task_id);
    assert_eq!(task.state, TaskState::Disputed);
    assert_eq!(task.held_balance, 80_010);
    assert_eq!(setup.token.balance(&setup.vault.address), 80_010);
}

#[test]
fn test_client_dispute_then_complete() {
    let setup = TestSetup::new();
    let task_id = setup.accepted_task(5_000);

    setup.vault.raise_dispute(&task_id, &setup.client);
    assert_eq!(
        setup.vault.try_complete_task(&task_id, &setup.client),
        Err(Ok(Error::InvalidState))
    );
    assert_eq!(
        setup.vault.try_raise_dispute(&task_id, &setup.freelancer),
        Err(Ok(Error::InvalidState))
    );
    assert_eq!(
        setup.vault.get_task(&task_id).disputed_by,
        Some(setup.client.clone())
    );
}

#[test]
fn test_accept_then_cancel() {
    let setup = TestSetup::new();
    let task_id = setup.vault.create_task(&setup.client, &2_500);

    setup.vault.accept_task(&task_id, &setup.freelancer);
    let cancel = setup.vault.try_cancel_task(&task_id, &setup.client);

    assert_eq!(cancel, Err(Ok(Error::InvalidState)));
    assert_eq!(setup.vault.balance_of(&task_id), 2_510);
    assert_eq!(setup.token.balance(&setup.client), 1_000_000 - 2_500);
}

#[test]
fn test_cancel_then_accept() {
    let setup = TestSetup::new();
    let task_id = setup.vault.create_task(&setup.client, &2_500);

    setup.vault.cancel_task(&task_id, &setup.client);
    let accept = setup.vault.try_accept_task(&task_id, &setup.freelancer);

    assert_eq!(accept, Err(Ok(Error::InvalidState)));
    assert_eq!(setup.vault.get_task(&task_id).freelancer, None);
    assert_eq!(setup.token.balance(&setup.freelancer), 1_000);
    assert_eq!(setup.token.balance(&setup.client), 1_000_000);
}

#[test]
fn test_two_freelancers_race_to_accept() {
    let setup = TestSetup::new();
    let rival = Address::generate(&setup.env);
    setup.token_admin.mint(&rival, &1_000);
    let task_id = setup.vault.create_task(&setup.client, &7_000);

    setup.vault.accept_task(&task_id, &rival);
    let late = setup.vault.try_accept_task(&task_id, &setup.freelancer);

    assert_eq!(late, Err(Ok(Error::InvalidState)));
    assert_eq!(setup.vault.get_task(&task_id).freelancer, Some(rival.clone()));
    assert_eq!(setup.token.balance(&rival), 990);
    assert_eq!(setup.token.balance(&setup.freelancer), 1_000);
    assert_eq!(setup.vault.balance_of(&task_id), 7_010);
}

#[test]
fn test_resolve_race_first_award_wins() {
    let setup = TestSetup::new();
    let task_id = setup.accepted_task(40_000);
    setup.vault.raise_dispute(&task_id, &setup.client);

    setup
        .vault
        .resolve_dispute(&task_id, &setup.arbiter, &Party::Client);
    let second = setup
        .vault
        .try_resolve_dispute(&task_id, &setup.arbiter, &Party::Freelancer);

    assert_eq!(second, Err(Ok(Error::InvalidState)));
    assert_eq!(
        setup.vault.get_task(&task_id).state,
        TaskState::Resolved(Party::Client)
    );
    assert_eq!(setup.token.balance(&setup.client), 1_000_000 + 10);
    assert_eq!(setup.token.balance(&setup.freelancer), 990);
}

#[test]
fn test_operations_on_other_tasks_are_independent() {
    let setup = TestSetup::new();
    let disputed = setup.accepted_task(1_000);
    let completed = setup.accepted_task(2_000);
    let open = setup.vault.create_task(&setup.client, &3_000);

    setup.vault.raise_dispute(&disputed, &setup.client);
    setup.vault.complete_task(&completed, &setup.client);

    assert_eq!(setup.vault.get_task(&disputed).state, TaskState::Disputed);
    assert_eq!(setup.vault.get_task(&completed).state, TaskState::Completed);
    assert_eq!(setup.vault.get_task(&open).state, TaskState::Created);
    assert_eq!(setup.vault.balance_of(&disputed), 1_010);
    assert_eq!(setup.vault.balance_of(&open), 3_000);
    assert_eq!(setup.token.balance(&setup.vault.address), 4_010);
    assert!(setup.vault.verify_all_invariants());
}
