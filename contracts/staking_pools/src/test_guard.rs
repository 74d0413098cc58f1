extern crate std;

use crate::{
    guard,
    test::{setup, T0},
    ContractError,
};

#[test]
fn test_guard_rejects_nested_entry() {
    let s = setup(10);

    s.env.as_contract(&s.contract_id, || {
        assert_eq!(guard::enter(&s.env), Ok(()));
        assert!(guard::is_locked(&s.env));
        assert_eq!(guard::enter(&s.env), Err(ContractError::Reentrant));

        guard::exit(&s.env);
        assert!(!guard::is_locked(&s.env));
        assert_eq!(guard::enter(&s.env), Ok(()));
        guard::exit(&s.env);
    });
}

#[test]
fn test_non_reentrant_releases_on_error() {
    let s = setup(10);

    s.env.as_contract(&s.contract_id, || {
        let result: Result<(), ContractError> =
            guard::non_reentrant(&s.env, || Err(ContractError::InvalidAmount));
        assert_eq!(result, Err(ContractError::InvalidAmount));
        assert!(!guard::is_locked(&s.env));

        let nested = guard::non_reentrant(&s.env, || {
            guard::non_reentrant(&s.env, || Ok::<u32, ContractError>(1))
        });
        assert_eq!(nested, Err(ContractError::Reentrant));
        assert!(!guard::is_locked(&s.env));
    });
}

#[test]
fn test_actions_rejected_while_lock_held() {
    let s = setup(10);
    let staker = s.new_staker(1_000);

    // Simulate an in-flight action holding the lock.
    s.env.as_contract(&s.contract_id, || {
        guard::enter(&s.env).unwrap();
    });

    let result = s.client.try_deposit(&staker, &s.pool_id, &1_000);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Reentrant);

    let result = s.client.try_pause_pool(&s.admin, &s.pool_id);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Reentrant);

    s.env.as_contract(&s.contract_id, || guard::exit(&s.env));

    s.client.deposit(&staker, &s.pool_id, &1_000);
    assert!(s.env.as_contract(&s.contract_id, || !guard::is_locked(&s.env)));

    s.at(T0 + 10);
    assert_eq!(s.client.pending_reward(&s.pool_id, &staker), 100);
}
