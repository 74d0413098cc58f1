use soroban_sdk::{Env, I256};

use crate::{pool::Pool, position::Position, ContractError};

/// Fixed-point scaling factor.
///
/// `acc_reward_per_share` values are multiplied by this constant before
/// storage so that rewards smaller than one unit per deposited unit are not
/// lost to truncation.
pub const PRECISION: i128 = 1_000_000_000_000_000_000;

// ── Fixed-point helpers ─────────────────────────────────────────────────────

/// `floor(a × b / denom)` with a 256-bit intermediate product.
///
/// Operands are non-negative in every caller. Fails with
/// `ArithmeticOverflow` if the quotient does not fit `i128`.
pub(crate) fn mul_div(env: &Env, a: i128, b: i128, denom: i128) -> Result<i128, ContractError> {
    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denom))
        .to_i128()
        .ok_or(ContractError::ArithmeticOverflow)
}

// ── Core reward engine ──────────────────────────────────────────────────────

/// Recompute a pool's cumulative reward-per-share index.
///
/// ```text
/// reward  = reward_rate × elapsed
/// new_acc = stored + reward × PRECISION / total_staked
/// ```
///
/// With nothing staked the index is unchanged; rewards for that interval are
/// not banked for later depositors.
pub fn compute_acc_reward_per_share(
    env: &Env,
    stored: i128,
    reward_rate: i128,
    elapsed: u64,
    total_staked: i128,
) -> Result<i128, ContractError> {
    if total_staked <= 0 || elapsed == 0 {
        return Ok(stored);
    }

    let reward =
        I256::from_i128(env, reward_rate).mul(&I256::from_i128(env, elapsed as i128));
    let delta = reward
        .mul(&I256::from_i128(env, PRECISION))
        .div(&I256::from_i128(env, total_staked))
        .to_i128()
        .ok_or(ContractError::ArithmeticOverflow)?;

    stored
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// The share of the index attributable to `amount`:
/// `amount × acc_reward_per_share / PRECISION`.
///
/// Stored as `reward_debt` after every settlement.
pub fn accumulated(
    env: &Env,
    amount: i128,
    acc_reward_per_share: i128,
) -> Result<i128, ContractError> {
    if amount == 0 || acc_reward_per_share == 0 {
        return Ok(0);
    }
    mul_div(env, amount, acc_reward_per_share, PRECISION)
}

/// Reward accrued since the position was last settled.
pub fn pending(
    env: &Env,
    amount: i128,
    acc_reward_per_share: i128,
    reward_debt: i128,
) -> Result<i128, ContractError> {
    accumulated(env, amount, acc_reward_per_share)?
        .checked_sub(reward_debt)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// The index `pool` would hold if advanced to `now`, without storing it.
pub fn projected_acc(env: &Env, pool: &Pool, now: u64) -> Result<i128, ContractError> {
    let elapsed = now.saturating_sub(pool.last_reward_time);
    compute_acc_reward_per_share(
        env,
        pool.acc_reward_per_share,
        pool.reward_rate,
        elapsed,
        pool.total_staked,
    )
}

/// Bring the pool's index current. No-op when `now` is not past
/// `last_reward_time`.
pub fn advance(env: &Env, pool: &mut Pool, now: u64) -> Result<(), ContractError> {
    if now <= pool.last_reward_time {
        return Ok(());
    }
    pool.acc_reward_per_share = projected_acc(env, pool, now)?;
    pool.last_reward_time = now;
    Ok(())
}

/// Pending reward for `position` as of `now`, read-only.
pub fn peek_pending(
    env: &Env,
    pool: &Pool,
    position: &Position,
    now: u64,
) -> Result<i128, ContractError> {
    let acc = projected_acc(env, pool, now)?;
    pending(env, position.amount, acc, position.reward_debt)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
