#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for reward accrual.
//!
//! Invariants tested:
//! - A sole depositor earns `reward_rate × elapsed`, less at most one unit of truncation
//! - Two depositors over the same interval earn in proportion to their stakes
//! - Total pending across depositors never exceeds the emission

use proptest::prelude::*;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::StellarAssetClient;
use soroban_sdk::{Address, Env};
use staking_pools::{ExitPolicy, StakingPoolsContract, StakingPoolsContractClient};

const T0: u64 = 1_000;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup(reward_rate: i128) -> (Env, StakingPoolsContractClient<'static>, Address, u32) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(T0);

    let deposit_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingPoolsContract, ());
    let client = StakingPoolsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);
    let pool_id = client.create_pool(
        &admin,
        &deposit_token,
        &reward_token,
        &reward_rate,
        &86_400,
        &u64::MAX,
        &259_200,
        &10,
        &ExitPolicy::PenaltyDecay,
    );

    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &10_000_000_000_000i128);

    (env, client, deposit_token, pool_id)
}

fn staker(env: &Env, deposit_token: &Address, amount: i128) -> Address {
    let who = Address::generate(env);
    StellarAssetClient::new(env, deposit_token).mint(&who, &amount);
    who
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// A sole depositor claims the full emission of the interval.
    #[test]
    fn prop_sole_depositor_earns_full_emission(
        rate in 1i128..=1_000_000i128,
        stake in 1i128..=1_000_000_000_000i128,
        elapsed in 1u64..=1_000_000u64,
    ) {
        let (env, client, deposit_token, pool_id) = setup(rate);
        let alice = staker(&env, &deposit_token, stake);
        client.deposit(&alice, &pool_id, &stake);

        env.ledger().set_timestamp(T0 + elapsed);
        let emitted = rate * elapsed as i128;
        let quoted = client.pending_reward(&pool_id, &alice);

        prop_assert!(quoted <= emitted);
        prop_assert!(quoted + 1 >= emitted);
        if quoted > 0 {
            prop_assert_eq!(client.claim(&alice, &pool_id), quoted);
        }
    }

    /// Rewards split `a : b` for stakes `a` and `b` held over the same interval.
    #[test]
    fn prop_rewards_proportional_to_stake(
        rate in 1i128..=1_000_000i128,
        a in 1i128..=1_000_000_000i128,
        b in 1i128..=1_000_000_000i128,
        elapsed in 1u64..=1_000_000u64,
    ) {
        let (env, client, deposit_token, pool_id) = setup(rate);
        let alice = staker(&env, &deposit_token, a);
        let bob = staker(&env, &deposit_token, b);
        client.deposit(&alice, &pool_id, &a);
        client.deposit(&bob, &pool_id, &b);

        env.ledger().set_timestamp(T0 + elapsed);
        let pa = client.pending_reward(&pool_id, &alice);
        let pb = client.pending_reward(&pool_id, &bob);

        prop_assert!(pa + pb <= rate * elapsed as i128);
        // Each side truncates by less than one unit.
        prop_assert!((pa * b - pb * a).abs() <= a.max(b));
    }
}
