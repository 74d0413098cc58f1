use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::pool::{TTL_EXTEND_TO, TTL_THRESHOLD};

const POSITION: Symbol = symbol_short!("POS");

/// A depositor's stake and reward bookkeeping within one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub amount: i128,
    /// `amount × acc_reward_per_share / PRECISION` as of the last settlement.
    pub reward_debt: i128,
    /// Timestamp of the most recent deposit; anchors the penalty window.
    pub last_stake_time: u64,
    pub lock_end: u64,
}

impl Position {
    pub fn empty() -> Self {
        Position {
            amount: 0,
            reward_debt: 0,
            last_stake_time: 0,
            lock_end: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount == 0
    }
}

fn position_key(pool_id: u32, user: &Address) -> (Symbol, u32, Address) {
    (POSITION, pool_id, user.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, u32, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Load the position for `(pool_id, user)`; absent records read as empty.
pub fn load(env: &Env, pool_id: u32, user: &Address) -> Position {
    let key = position_key(pool_id, user);
    match env.storage().persistent().get(&key) {
        Some(position) => {
            extend_ttl(env, &key);
            position
        }
        None => Position::empty(),
    }
}

pub fn save(env: &Env, pool_id: u32, user: &Address, position: &Position) {
    let key = position_key(pool_id, user);
    env.storage().persistent().set(&key, position);
    extend_ttl(env, &key);
}
