#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

use crate::pool::ExitPolicy;

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the contract is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Fired when the admin appends a pool to the registry.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolCreatedEvent {
    pub pool_id: u32,
    pub admin: Address,
    pub deposit_token: Address,
    pub reward_token: Address,
    pub reward_rate: i128,
    pub exit_policy: ExitPolicy,
    pub timestamp: u64,
}

/// Fired when a user deposits into a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user withdraws principal. `amount` is the gross amount
/// removed from the position.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired whenever pending reward is paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimedEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a user exits through `emergency_withdraw`.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when part of a withdrawal is redirected to the administrator.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PenaltyTakenEvent {
    pub pool_id: u32,
    pub staker: Address,
    pub recipient: Address,
    pub percent: u32,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the admin pauses or resumes deposits into a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolPauseEvent {
    pub pool_id: u32,
    pub admin: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_created(
    env: &Env,
    pool_id: u32,
    admin: Address,
    deposit_token: Address,
    reward_token: Address,
    reward_rate: i128,
    exit_policy: ExitPolicy,
) {
    env.events().publish(
        (symbol_short!("POOL_NEW"), pool_id),
        PoolCreatedEvent {
            pool_id,
            admin,
            deposit_token,
            reward_token,
            reward_rate,
            exit_policy,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    pool_id: u32,
    staker: Address,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), pool_id, staker.clone()),
        StakedEvent {
            pool_id,
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    pool_id: u32,
    staker: Address,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), pool_id, staker.clone()),
        WithdrawnEvent {
            pool_id,
            staker,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claimed(env: &Env, pool_id: u32, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), pool_id, staker.clone()),
        ClaimedEvent {
            pool_id,
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(env: &Env, pool_id: u32, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMRG_WD"), pool_id, staker.clone()),
        EmergencyWithdrawnEvent {
            pool_id,
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_penalty_taken(
    env: &Env,
    pool_id: u32,
    staker: Address,
    recipient: Address,
    percent: u32,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("PENALTY"), pool_id, staker.clone()),
        PenaltyTakenEvent {
            pool_id,
            staker,
            recipient,
            percent,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_paused(env: &Env, pool_id: u32, admin: Address) {
    env.events().publish(
        (symbol_short!("PAUSED"), pool_id),
        PoolPauseEvent {
            pool_id,
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_resumed(env: &Env, pool_id: u32, admin: Address) {
    env.events().publish(
        (symbol_short!("RESUMED"), pool_id),
        PoolPauseEvent {
            pool_id,
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}
