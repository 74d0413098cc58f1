#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use staking_pools::{ExitPolicy, StakingPoolsContract, StakingPoolsContractClient};

const USER_FUNDS: i128 = 1_000_000_000;

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { user: u8, amount: u32 },
    Withdraw { user: u8, amount: u32 },
    Claim { user: u8 },
    Emergency { user: u8 },
    Wait { seconds: u32 },
    UpdatePool,
}

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    reward_rate: u32,
    max_penalty: u8,
    penalty_duration: u32,
    locked: bool,
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1);

    let deposit_id = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_id = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(StakingPoolsContract, ());
    let client = StakingPoolsContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    let reward_rate = input.reward_rate as i128 + 1;
    let policy = if input.locked {
        ExitPolicy::Locked
    } else {
        ExitPolicy::PenaltyDecay
    };
    let pool_id = match client.try_create_pool(
        &admin,
        &deposit_id,
        &reward_id,
        &reward_rate,
        &3_600,
        &u64::MAX,
        &(input.penalty_duration as u64),
        &(input.max_penalty as u32 % 51),
        &policy,
    ) {
        Ok(Ok(id)) => id,
        _ => return,
    };
    StellarAssetClient::new(&env, &reward_id).mint(&contract_id, &i128::MAX);

    let mut users = vec![];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &deposit_id).mint(&user, &USER_FUNDS);
        users.push(user);
    }
    let deposit_token = TokenClient::new(&env, &deposit_id);

    let mut last_acc = 0i128;
    for action in input.actions.into_iter() {
        match action {
            FuzzAction::Deposit { user, amount } => {
                let who = &users[user as usize % users.len()];
                let _ = client.try_deposit(who, &pool_id, &(amount as i128));
            }
            FuzzAction::Withdraw { user, amount } => {
                let who = &users[user as usize % users.len()];
                let _ = client.try_withdraw(who, &pool_id, &(amount as i128));
            }
            FuzzAction::Claim { user } => {
                let who = &users[user as usize % users.len()];
                let _ = client.try_claim(who, &pool_id);
            }
            FuzzAction::Emergency { user } => {
                let who = &users[user as usize % users.len()];
                let _ = client.try_emergency_withdraw(who, &pool_id);
            }
            FuzzAction::Wait { seconds } => {
                let now = env.ledger().timestamp();
                env.ledger().set_timestamp(now.saturating_add(seconds as u64));
            }
            FuzzAction::UpdatePool => {
                let _ = client.try_update_pool(&pool_id);
            }
        }

        let pool = client.get_pool(&pool_id);
        let staked: i128 = users
            .iter()
            .map(|u| client.get_position(&pool_id, u).amount)
            .sum();
        assert_eq!(pool.total_staked, staked);
        assert_eq!(deposit_token.balance(&contract_id), pool.total_staked);
        assert_eq!(client.staked_principal(&deposit_id), pool.total_staked);
        assert!(pool.acc_reward_per_share >= last_acc);
        last_acc = pool.acc_reward_per_share;
    }
});
