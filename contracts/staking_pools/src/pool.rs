use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const POOL: Symbol = symbol_short!("POOL");
const POOL_CTR: Symbol = symbol_short!("POOL_CTR");
const STAKED: Symbol = symbol_short!("STAKED");

pub(crate) const TTL_THRESHOLD: u32 = 5184000;
pub(crate) const TTL_EXTEND_TO: u32 = 10368000;

/// Upper bound on `max_penalty`, in percent.
pub const MAX_PENALTY_PERCENT: u32 = 50;

// ── Types ────────────────────────────────────────────────────────────────────

/// How a depositor may leave a pool through `withdraw`.
///
/// - `PenaltyDecay` – withdrawals are always allowed; principal withdrawn
///                    inside the penalty window is charged a linearly decaying
///                    percentage sent to the administrator.
/// - `Locked`       – withdrawals are rejected until `lock_end` and never
///                    charged a penalty.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ExitPolicy {
    PenaltyDecay = 0,
    Locked = 1,
}

/// Configuration and aggregate accounting for one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub deposit_token: Address,
    pub reward_token: Address,
    /// Reward units emitted per second, shared by all depositors.
    pub reward_rate: i128,
    /// Ledger timestamp the index was last advanced to.
    pub last_reward_time: u64,
    /// Cumulative reward per deposited unit, scaled by `rewards::PRECISION`.
    pub acc_reward_per_share: i128,
    pub total_staked: i128,
    pub lock_duration: u64,
    /// Deposits are rejected once `now >= end_time`.
    pub end_time: u64,
    pub penalty_duration: u64,
    /// Penalty at `time_staked == 0`, in percent.
    pub max_penalty: u32,
    pub exit_policy: ExitPolicy,
    pub is_paused: bool,
}

/// Parameters accepted by `create_pool`, before validation.
#[derive(Clone, Debug)]
pub struct PoolParams {
    pub deposit_token: Address,
    pub reward_token: Address,
    pub reward_rate: i128,
    pub lock_duration: u64,
    pub end_time: u64,
    pub penalty_duration: u64,
    pub max_penalty: u32,
    pub exit_policy: ExitPolicy,
}

impl PoolParams {
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.reward_rate <= 0 {
            return Err(ContractError::InvalidRewardRate);
        }
        if self.lock_duration == 0 || self.end_time == 0 {
            return Err(ContractError::InvalidDuration);
        }
        if self.max_penalty > MAX_PENALTY_PERCENT {
            return Err(ContractError::InvalidPenalty);
        }
        Ok(())
    }

    /// A fresh pool whose index starts at `now`.
    pub fn into_pool(self, now: u64) -> Pool {
        Pool {
            deposit_token: self.deposit_token,
            reward_token: self.reward_token,
            reward_rate: self.reward_rate,
            last_reward_time: now,
            acc_reward_per_share: 0,
            total_staked: 0,
            lock_duration: self.lock_duration,
            end_time: self.end_time,
            penalty_duration: self.penalty_duration,
            max_penalty: self.max_penalty,
            exit_policy: self.exit_policy,
            is_paused: false,
        }
    }
}

impl Pool {
    /// Whether deposits are closed at `now`.
    pub fn has_ended(&self, now: u64) -> bool {
        self.end_time != 0 && now >= self.end_time
    }
}

// ── Registry ─────────────────────────────────────────────────────────────────

fn pool_key(pool_id: u32) -> (Symbol, u32) {
    (POOL, pool_id)
}

fn extend_ttl(env: &Env, key: &(Symbol, u32)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Number of pools created so far; valid ids are `0..pool_count`.
pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_CTR).unwrap_or(0)
}

/// Append `pool` and return its zero-based id.
pub fn append(env: &Env, pool: &Pool) -> Result<u32, ContractError> {
    let pool_id = pool_count(env);
    let next = pool_id
        .checked_add(1)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let key = pool_key(pool_id);
    env.storage().persistent().set(&key, pool);
    extend_ttl(env, &key);
    env.storage().instance().set(&POOL_CTR, &next);

    Ok(pool_id)
}

/// Load a pool, failing with `PoolNotFound` for ids outside the registry.
pub fn load(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
    if pool_id >= pool_count(env) {
        return Err(ContractError::PoolNotFound);
    }
    let key = pool_key(pool_id);
    let pool: Pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::PoolNotFound)?;
    extend_ttl(env, &key);
    Ok(pool)
}

pub fn save(env: &Env, pool_id: u32, pool: &Pool) {
    let key = pool_key(pool_id);
    env.storage().persistent().set(&key, pool);
    extend_ttl(env, &key);
}

// ── Principal custody ────────────────────────────────────────────────────────

/// Principal of `token` held for depositors, summed over every pool that
/// uses it as its deposit token. Reward payouts may only spend the contract
/// balance above this figure.
pub fn staked_principal(env: &Env, token: &Address) -> i128 {
    env.storage()
        .instance()
        .get(&(STAKED, token.clone()))
        .unwrap_or(0)
}

/// Add `delta` (negative on exit) to the principal held in `token`.
pub fn record_principal(env: &Env, token: &Address, delta: i128) -> Result<(), ContractError> {
    let total = staked_principal(env, token)
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    env.storage().instance().set(&(STAKED, token.clone()), &total);
    Ok(())
}
