//! Role guards. Every mutating entry point calls one of these before it
//! touches any other state.

use cosmwasm_std::{Addr, Order, StdResult, Storage};

use crate::error::ContractError;
use crate::state::{GatewayState, ORACLES, STATE, TOKEN_WITHDRAWERS};

/// Ensure `sender` is the owner, returning the loaded state
pub fn ensure_owner(storage: &dyn Storage, sender: &Addr) -> Result<GatewayState, ContractError> {
    let state = STATE.load(storage)?;
    if *sender != state.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(state)
}

pub fn ensure_oracle(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if !ORACLES.has(storage, sender) {
        return Err(ContractError::UnauthorizedOracle);
    }
    Ok(())
}

/// Withdrawals are open to every holder while no withdrawer is registered.
pub fn ensure_token_withdrawer(storage: &dyn Storage, sender: &Addr) -> Result<(), ContractError> {
    if TOKEN_WITHDRAWERS
        .may_load(storage, sender)?
        .unwrap_or(false)
    {
        return Ok(());
    }
    if has_token_withdrawers(storage)? {
        return Err(ContractError::UnauthorizedWithdrawer);
    }
    Ok(())
}

fn has_token_withdrawers(storage: &dyn Storage) -> StdResult<bool> {
    Ok(TOKEN_WITHDRAWERS
        .keys(storage, None, None, Order::Ascending)
        .next()
        .transpose()?
        .is_some())
}
