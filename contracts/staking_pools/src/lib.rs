#![no_std]

pub mod errors;
pub mod events;
pub mod guard;
pub mod penalty;
pub mod pool;
pub mod position;
pub mod rewards;

use pool::{TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, token, Address, Env, Symbol,
};

pub use errors::{ContractError, ErrorCategory};
pub use pool::{ExitPolicy, Pool, PoolParams, MAX_PENALTY_PERCENT};
pub use position::Position;
pub use rewards::PRECISION;

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

// ── Public-facing types ──────────────────────────────────────────────────────

/// Snapshot of a user's position returned by `get_position_info`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionInfo {
    pub position: Position,
    pub pending_reward: i128,
    pub penalty_percent: u32,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct StakingPoolsContract;

#[contractimpl]
impl StakingPoolsContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the contract with the administrator that creates and pauses
    /// pools and receives early-exit penalties.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        Self::extend_instance_ttl(&env);

        log!(&env, "initialized", admin);
        events::publish_initialized(&env, admin);

        Ok(())
    }

    // ── Pool registry ───────────────────────────────────────────────────────

    /// Append a new pool and return its id.
    ///
    /// * `reward_rate`      – reward units emitted **per second** across all
    ///                        depositors of the pool.
    /// * `lock_duration`    – seconds after each deposit until `lock_end`.
    /// * `end_time`         – deposits are rejected from this timestamp on.
    /// * `penalty_duration` – length of the penalty decay window, in seconds.
    /// * `max_penalty`      – penalty percent at the start of the window (≤ 50).
    /// * `exit_policy`      – whether `withdraw` charges a decaying penalty or
    ///                        waits for `lock_end`.
    #[allow(clippy::too_many_arguments)]
    pub fn create_pool(
        env: Env,
        caller: Address,
        deposit_token: Address,
        reward_token: Address,
        reward_rate: i128,
        lock_duration: u64,
        end_time: u64,
        penalty_duration: u64,
        max_penalty: u32,
        exit_policy: ExitPolicy,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        Self::require_admin(&env, &caller)?;

        let params = PoolParams {
            deposit_token,
            reward_token,
            reward_rate,
            lock_duration,
            end_time,
            penalty_duration,
            max_penalty,
            exit_policy,
        };
        params.validate()?;

        guard::non_reentrant(&env, || {
            let new_pool = params.into_pool(env.ledger().timestamp());
            let pool_id = pool::append(&env, &new_pool)?;
            Self::extend_instance_ttl(&env);

            log!(&env, "pool created", pool_id, reward_rate);
            events::publish_pool_created(
                &env,
                pool_id,
                caller.clone(),
                new_pool.deposit_token,
                new_pool.reward_token,
                new_pool.reward_rate,
                new_pool.exit_policy,
            );
            Ok(pool_id)
        })
    }

    /// Stop accepting deposits into `pool_id`. Withdrawals, claims and
    /// emergency exits remain available.
    pub fn pause_pool(env: Env, caller: Address, pool_id: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_admin(&env, &caller)?;

        guard::non_reentrant(&env, || {
            let mut pool = pool::load(&env, pool_id)?;
            if pool.is_paused {
                return Err(ContractError::AlreadyPaused);
            }
            pool.is_paused = true;
            pool::save(&env, pool_id, &pool);

            log!(&env, "pool paused", pool_id);
            events::publish_pool_paused(&env, pool_id, caller.clone());
            Ok(())
        })
    }

    pub fn resume_pool(env: Env, caller: Address, pool_id: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::require_admin(&env, &caller)?;

        guard::non_reentrant(&env, || {
            let mut pool = pool::load(&env, pool_id)?;
            if !pool.is_paused {
                return Err(ContractError::NotPaused);
            }
            pool.is_paused = false;
            pool::save(&env, pool_id, &pool);

            log!(&env, "pool resumed", pool_id);
            events::publish_pool_resumed(&env, pool_id, caller.clone());
            Ok(())
        })
    }

    /// Advance the pool's reward index to the current ledger time.
    ///
    /// Permissionless; no position is touched. Returns the new
    /// `acc_reward_per_share`.
    pub fn update_pool(env: Env, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;

        guard::non_reentrant(&env, || {
            let mut pool = pool::load(&env, pool_id)?;
            rewards::advance(&env, &mut pool, env.ledger().timestamp())?;
            pool::save(&env, pool_id, &pool);
            Ok(pool.acc_reward_per_share)
        })
    }

    // ── Depositor actions ───────────────────────────────────────────────────

    /// Deposit `amount` of the pool's deposit token.
    ///
    /// Reward accrued on an existing balance is paid out first, at the old
    /// balance. Every deposit restarts the penalty window and the lock.
    pub fn deposit(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        guard::non_reentrant(&env, || Self::do_deposit(&env, &staker, pool_id, amount))
    }

    /// Withdraw `amount` of principal and return what the staker received.
    ///
    /// Under `PenaltyDecay` the penalty share goes to the administrator; under
    /// `Locked` the call fails with `LockActive` until `lock_end`.
    pub fn withdraw(
        env: Env,
        staker: Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        guard::non_reentrant(&env, || Self::do_withdraw(&env, &staker, pool_id, amount))
    }

    /// Claim all pending reward in `pool_id`. Fails with `NothingToClaim`
    /// when nothing has accrued since the last settlement.
    pub fn claim(env: Env, staker: Address, pool_id: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        guard::non_reentrant(&env, || {
            let mut pool = pool::load(&env, pool_id)?;
            let mut position = position::load(&env, pool_id, &staker);

            rewards::advance(&env, &mut pool, env.ledger().timestamp())?;
            let reward = rewards::pending(
                &env,
                position.amount,
                pool.acc_reward_per_share,
                position.reward_debt,
            )?;
            if reward <= 0 {
                return Err(ContractError::NothingToClaim);
            }
            position.reward_debt =
                rewards::accumulated(&env, position.amount, pool.acc_reward_per_share)?;

            pool::save(&env, pool_id, &pool);
            position::save(&env, pool_id, &staker, &position);

            Self::pay_reward(&env, pool_id, &pool, &staker, reward)?;
            Ok(reward)
        })
    }

    /// Return the full balance immediately, forfeiting pending reward.
    ///
    /// The index is not advanced and no penalty applies.
    pub fn emergency_withdraw(
        env: Env,
        staker: Address,
        pool_id: u32,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        guard::non_reentrant(&env, || {
            let mut pool = pool::load(&env, pool_id)?;
            let mut position = position::load(&env, pool_id, &staker);
            if position.amount <= 0 {
                return Err(ContractError::NothingStaked);
            }

            let amount = position.amount;
            position.amount = 0;
            position.reward_debt = 0;
            pool.total_staked = pool
                .total_staked
                .checked_sub(amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
            pool::record_principal(&env, &pool.deposit_token, -amount)?;

            pool::save(&env, pool_id, &pool);
            position::save(&env, pool_id, &staker, &position);

            token::Client::new(&env, &pool.deposit_token).transfer(
                &env.current_contract_address(),
                &staker,
                &amount,
            );

            log!(&env, "emergency withdraw", pool_id, staker, amount);
            events::publish_emergency_withdrawn(&env, pool_id, staker.clone(), amount);
            Ok(amount)
        })
    }

    // ── View functions ───────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        Self::load_admin(&env)
    }

    /// Number of pools created; valid ids are `0..pool_count()`.
    pub fn pool_count(env: Env) -> u32 {
        pool::pool_count(&env)
    }

    pub fn get_pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        pool::load(&env, pool_id)
    }

    /// Return the stored position; users that never deposited read as empty.
    pub fn get_position(env: Env, pool_id: u32, user: Address) -> Result<Position, ContractError> {
        pool::load(&env, pool_id)?;
        Ok(position::load(&env, pool_id, &user))
    }

    /// Penalty percent a withdrawal by `user` would be charged right now.
    pub fn get_penalty(env: Env, pool_id: u32, user: Address) -> Result<u32, ContractError> {
        let pool = pool::load(&env, pool_id)?;
        let position = position::load(&env, pool_id, &user);
        Ok(Self::current_penalty(&env, &pool, &position))
    }

    /// Principal of `token` currently staked across all pools.
    pub fn staked_principal(env: Env, token: Address) -> i128 {
        pool::staked_principal(&env, &token)
    }

    /// Real-time pending reward without mutating state.
    pub fn pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        let pool = pool::load(&env, pool_id)?;
        let position = position::load(&env, pool_id, &user);
        rewards::peek_pending(&env, &pool, &position, env.ledger().timestamp())
    }

    /// Position, pending reward and current penalty in a single call.
    pub fn get_position_info(
        env: Env,
        pool_id: u32,
        user: Address,
    ) -> Result<PositionInfo, ContractError> {
        let pool = pool::load(&env, pool_id)?;
        let position = position::load(&env, pool_id, &user);
        let pending_reward =
            rewards::peek_pending(&env, &pool, &position, env.ledger().timestamp())?;
        let penalty_percent = Self::current_penalty(&env, &pool, &position);

        Ok(PositionInfo {
            position,
            pending_reward,
            penalty_percent,
        })
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn do_deposit(
        env: &Env,
        staker: &Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        let mut pool = pool::load(env, pool_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if pool.is_paused {
            return Err(ContractError::PoolPaused);
        }
        let now = env.ledger().timestamp();
        if pool.has_ended(now) {
            return Err(ContractError::PoolEnded);
        }

        // 1. Flush the index before the balance changes.
        rewards::advance(env, &mut pool, now)?;

        // 2. Settle what the old balance earned, then rebase the debt.
        let mut position = position::load(env, pool_id, staker);
        let settled = if position.is_empty() {
            0
        } else {
            rewards::pending(
                env,
                position.amount,
                pool.acc_reward_per_share,
                position.reward_debt,
            )?
        };

        position.amount = position
            .amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool::record_principal(env, &pool.deposit_token, amount)?;
        position.reward_debt =
            rewards::accumulated(env, position.amount, pool.acc_reward_per_share)?;
        position.last_stake_time = now;
        position.lock_end = now.saturating_add(pool.lock_duration);

        pool::save(env, pool_id, &pool);
        position::save(env, pool_id, staker, &position);
        Self::extend_instance_ttl(env);

        // 3. Interactions. The deposit lands before the reward leaves so the
        //    reserve check sees the new principal in custody.
        token::Client::new(env, &pool.deposit_token).transfer(
            staker,
            &env.current_contract_address(),
            &amount,
        );
        Self::pay_reward(env, pool_id, &pool, staker, settled)?;

        log!(env, "deposit", pool_id, staker.clone(), amount);
        events::publish_staked(env, pool_id, staker.clone(), amount, pool.total_staked);
        Ok(())
    }

    fn do_withdraw(
        env: &Env,
        staker: &Address,
        pool_id: u32,
        amount: i128,
    ) -> Result<i128, ContractError> {
        let mut pool = pool::load(env, pool_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        let mut position = position::load(env, pool_id, staker);
        if amount > position.amount {
            return Err(ContractError::InsufficientBalance);
        }
        let now = env.ledger().timestamp();
        if pool.exit_policy == ExitPolicy::Locked && now < position.lock_end {
            return Err(ContractError::LockActive);
        }
        let admin = Self::load_admin(env)?;

        // 1. Flush the index before the balance changes.
        rewards::advance(env, &mut pool, now)?;

        // 2. Settle at the pre-withdrawal balance, then rebase the debt.
        let settled = rewards::pending(
            env,
            position.amount,
            pool.acc_reward_per_share,
            position.reward_debt,
        )?;
        position.amount = position
            .amount
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool.total_staked = pool
            .total_staked
            .checked_sub(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool::record_principal(env, &pool.deposit_token, -amount)?;
        position.reward_debt =
            rewards::accumulated(env, position.amount, pool.acc_reward_per_share)?;

        // 3. Penalty, anchored on the last deposit; the clock is not reset.
        let percent = Self::current_penalty(env, &pool, &position);
        let fee = penalty::penalty_amount(env, amount, percent)?;
        let payout = amount
            .checked_sub(fee)
            .ok_or(ContractError::ArithmeticOverflow)?;

        pool::save(env, pool_id, &pool);
        position::save(env, pool_id, staker, &position);
        Self::extend_instance_ttl(env);

        // 4. Interactions. Principal leaves custody before the reward so the
        //    reserve check cannot count it.
        let deposit_token = token::Client::new(env, &pool.deposit_token);
        if payout > 0 {
            deposit_token.transfer(&env.current_contract_address(), staker, &payout);
        }
        if fee > 0 {
            deposit_token.transfer(&env.current_contract_address(), &admin, &fee);
            log!(env, "penalty taken", pool_id, percent, fee);
            events::publish_penalty_taken(env, pool_id, staker.clone(), admin, percent, fee);
        }
        Self::pay_reward(env, pool_id, &pool, staker, settled)?;

        log!(env, "withdraw", pool_id, staker.clone(), amount);
        events::publish_withdrawn(env, pool_id, staker.clone(), amount, pool.total_staked);
        Ok(payout)
    }

    /// Transfer `amount` of the pool's reward token to `staker`. Zero amounts
    /// are skipped.
    ///
    /// Only the balance above the principal staked in that token, across every
    /// pool, is spendable; anything more fails with `RewardReserveExhausted`.
    fn pay_reward(
        env: &Env,
        pool_id: u32,
        pool: &Pool,
        staker: &Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        if amount <= 0 {
            return Ok(());
        }
        let reward_token = token::Client::new(env, &pool.reward_token);
        let reserve = reward_token
            .balance(&env.current_contract_address())
            .checked_sub(pool::staked_principal(env, &pool.reward_token))
            .ok_or(ContractError::ArithmeticOverflow)?;
        if reserve < amount {
            log!(env, "reward reserve exhausted", pool_id, reserve, amount);
            return Err(ContractError::RewardReserveExhausted);
        }
        reward_token.transfer(&env.current_contract_address(), staker, &amount);

        log!(env, "reward paid", pool_id, staker.clone(), amount);
        events::publish_claimed(env, pool_id, staker.clone(), amount);
        Ok(())
    }

    fn current_penalty(env: &Env, pool: &Pool, position: &Position) -> u32 {
        match pool.exit_policy {
            ExitPolicy::PenaltyDecay => penalty::penalty_percent(
                position.last_stake_time,
                env.ledger().timestamp(),
                pool.penalty_duration,
                pool.max_penalty,
            ),
            ExitPolicy::Locked => 0,
        }
    }

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: authenticate `caller` and revert unless it is the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        caller.require_auth();
        if *caller != Self::load_admin(env)? {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn load_admin(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    fn extend_instance_ttl(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_exit_policy;

#[cfg(test)]
mod test_guard;
