use super::*;
use soroban_sdk::{testutils::Address as _, Address, Env};

fn setup(env: &Env) -> (TaskVaultContractClient<'static>, Address) {
    let admin = Address::generate(env);
    let token_id = env.register_stellar_asset_contract_v2(admin.clone()).address();
    let contract_id = env.register_contract(None, TaskVaultContract);
    let vault = TaskVaultContractClient::new(env, &contract_id);
    vault.init(&admin, &token_id, &10);
    (vault, admin)
}

#[test]
fn test_admin_updates_config() {
    let env = Env::default();
    env.mock_all_auths();
    let (vault, admin) = setup(&env);
    let arbiter = Address::generate(&env);

    vault.set_arbiter(&arbiter);
    vault.set_review_period(&86_400);
    vault.set_dispute_policy(&8_000);

    let config = vault.get_config();
    assert_eq!(config.admin, admin);
    assert_eq!(config.arbiter, arbiter);
    assert_eq!(config.review_period, 86_400);
    assert_eq!(config.dispute_policy.winner_share_bps, 8_000);
    // Deposit is fixed at construction.
    assert_eq!(config.deposit_amount, 10);
}

#[test]
fn test_dispute_policy_bounds() {
    let env = Env::default();
    env.mock_all_auths();
    let (vault, _admin) = setup(&env);

    assert_eq!(
        vault.try_set_dispute_policy(&0),
        Err(Ok(Error::InvalidPolicy))
    );
    assert_eq!(
        vault.try_set_dispute_policy(&10_001),
        Err(Ok(Error::InvalidPolicy))
    );
    vault.set_dispute_policy(&1);
    vault.set_dispute_policy(&10_000);
    assert_eq!(vault.get_config().dispute_policy.winner_share_bps, 10_000);
}

#[test]
fn test_set_arbiter_records_admin_auth() {
    let env = Env::default();
    env.mock_all_auths();
    let (vault, admin) = setup(&env);
    let arbiter = Address::generate(&env);

    vault.set_arbiter(&arbiter);

    let auths = env.auths();
    assert_eq!(auths.len(), 1);
    assert_eq!(auths[0].0, admin);
}

#[test]
#[should_panic]
fn test_set_arbiter_without_admin_auth_panics() {
    // No mock_all_auths: init needs no auth, set_arbiter does.
    let env = Env::default();
    let (vault, _admin) = setup(&env);
    let intruder = Address::generate(&env);

    vault.set_arbiter(&intruder);
}

#[test]
#[should_panic]
fn test_set_review_period_without_admin_auth_panics() {
    let env = Env::default();
    let (vault, _admin) = setup(&env);

    vault.set_review_period(&1);
}

#[test]
#[should_panic]
fn test_create_task_without_client_auth_panics() {
    let env = Env::default();
    let (vault, _admin) = setup(&env);
    let client = Address::generate(&env);

    vault.create_task(&client, &100);
}
