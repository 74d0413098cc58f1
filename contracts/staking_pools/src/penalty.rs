//! Early-exit penalty.
//!
//! A withdrawal made `t` seconds after the depositor's last deposit is charged
//! `floor(max_penalty × (penalty_duration − t) / penalty_duration)` percent of
//! the withdrawn principal, decaying linearly to zero at `penalty_duration`.

use soroban_sdk::Env;

use crate::{rewards, ContractError};

/// Penalty percentage for a withdrawal at `now`.
///
/// A `last_stake_time` of zero means the position never deposited.
pub fn penalty_percent(
    last_stake_time: u64,
    now: u64,
    penalty_duration: u64,
    max_penalty: u32,
) -> u32 {
    if last_stake_time == 0 {
        return 0;
    }
    let time_staked = now.saturating_sub(last_stake_time);
    if time_staked >= penalty_duration {
        return 0;
    }

    let remaining = (penalty_duration - time_staked) as u128;
    let percent = (max_penalty as u128) * remaining / (penalty_duration as u128);
    // percent <= max_penalty since remaining <= penalty_duration
    percent as u32
}

/// `floor(amount × percent / 100)`, with a 256-bit intermediate product.
pub fn penalty_amount(env: &Env, amount: i128, percent: u32) -> Result<i128, ContractError> {
    if percent == 0 || amount == 0 {
        return Ok(0);
    }
    rewards::mul_div(env, amount, percent as i128, 100)
}
