extern crate std;

use crate::{
    test::{setup_with, DAY, LOCK, T0},
    ContractError, ExitPolicy,
};

const SUPPLY: i128 = 1_000_000_000_000;

// ── Locked pools ──────────────────────────────────────────────────────────────

#[test]
fn test_locked_withdraw_before_lock_end_fails() {
    let s = setup_with(10, ExitPolicy::Locked, SUPPLY);
    let staker = s.new_staker(1_000);
    s.client.deposit(&staker, &s.pool_id, &1_000);

    s.at(T0 + LOCK - 1);
    let result = s.client.try_withdraw(&staker, &s.pool_id, &1_000);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::LockActive),
        _ => unreachable!("Expected LockActive error"),
    }
    assert_eq!(s.client.get_position(&s.pool_id, &staker).amount, 1_000);
}

#[test]
fn test_locked_withdraw_after_lock_end_has_no_penalty() {
    let s = setup_with(10, ExitPolicy::Locked, SUPPLY);
    let staker = s.new_staker(1_000);
    s.client.deposit(&staker, &s.pool_id, &1_000);

    s.at(T0 + LOCK);
    assert_eq!(s.client.get_penalty(&s.pool_id, &staker), 0);

    let received = s.client.withdraw(&staker, &s.pool_id, &1_000);
    assert_eq!(received, 1_000);
    assert_eq!(s.deposit_balance(&staker), 1_000);
    assert_eq!(s.deposit_balance(&s.admin), 0);
    assert_eq!(s.reward_balance(&staker), 10 * LOCK as i128);
}

#[test]
fn test_locked_top_up_extends_lock() {
    let s = setup_with(10, ExitPolicy::Locked, SUPPLY);
    let staker = s.new_staker(2_000);
    s.client.deposit(&staker, &s.pool_id, &1_000);

    s.at(T0 + LOCK / 2);
    s.client.deposit(&staker, &s.pool_id, &1_000);
    assert_eq!(
        s.client.get_position(&s.pool_id, &staker).lock_end,
        T0 + LOCK / 2 + LOCK
    );

    // The original lock has passed but the top-up restarted it.
    s.at(T0 + LOCK);
    let result = s.client.try_withdraw(&staker, &s.pool_id, &500);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::LockActive);

    s.at(T0 + LOCK / 2 + LOCK);
    assert_eq!(s.client.withdraw(&staker, &s.pool_id, &500), 500);
}

#[test]
fn test_locked_pool_still_allows_claim_and_emergency_exit() {
    let s = setup_with(10, ExitPolicy::Locked, SUPPLY);
    let staker = s.new_staker(1_000);
    s.client.deposit(&staker, &s.pool_id, &1_000);

    s.at(T0 + 100);
    assert_eq!(s.client.claim(&staker, &s.pool_id), 1_000);
    assert_eq!(s.client.emergency_withdraw(&staker, &s.pool_id), 1_000);
    assert_eq!(s.deposit_balance(&staker), 1_000);
}

// ── Penalty-decay pools ───────────────────────────────────────────────────────

#[test]
fn test_penalty_pool_ignores_lock_end() {
    let s = setup_with(10, ExitPolicy::PenaltyDecay, SUPPLY);
    let staker = s.new_staker(1_000);
    s.client.deposit(&staker, &s.pool_id, &1_000);

    // Inside the lock, withdrawal is allowed but charged.
    s.at(T0 + DAY / 2);
    let received = s.client.withdraw(&staker, &s.pool_id, &1_000);
    // floor(10 × 2.5d / 3d) = 8
    assert_eq!(received, 920);
    assert_eq!(s.deposit_balance(&s.admin), 80);
}

#[test]
fn test_top_up_restarts_penalty_window() {
    let s = setup_with(10, ExitPolicy::PenaltyDecay, SUPPLY);
    let staker = s.new_staker(2_000);
    s.client.deposit(&staker, &s.pool_id, &1_000);

    s.at(T0 + 3 * DAY);
    assert_eq!(s.client.get_penalty(&s.pool_id, &staker), 0);

    s.client.deposit(&staker, &s.pool_id, &1_000);
    assert_eq!(s.client.get_penalty(&s.pool_id, &staker), 10);
}
