use soroban_sdk::{log, symbol_short, Env, Symbol};

use crate::ContractError;

const LOCKED: Symbol = symbol_short!("LOCKED");

/// Set the reentrancy flag, rejecting entry if it is already held.
pub fn enter(env: &Env) -> Result<(), ContractError> {
    if env.storage().instance().get(&LOCKED).unwrap_or(false) {
        return Err(ContractError::Reentrant);
    }
    env.storage().instance().set(&LOCKED, &true);
    Ok(())
}

pub fn exit(env: &Env) {
    env.storage().instance().remove(&LOCKED);
}

#[cfg(test)]
pub(crate) fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCKED).unwrap_or(false)
}

/// Run `action` with the flag held, releasing it on every return path.
pub fn non_reentrant<T>(
    env: &Env,
    action: impl FnOnce() -> Result<T, ContractError>,
) -> Result<T, ContractError> {
    enter(env)?;
    let result = action();
    exit(env);
    if let Err(err) = &result {
        log!(env, "action rejected", *err as u32, err.category());
    }
    result
}
