//! Access control handlers (owner only).
//!
//! This module handles:
//! - Oracle registration and removal
//! - Token withdrawer registration and removal
//! - Withdrawal quorum updates

use cosmwasm_std::{DepsMut, MessageInfo, Response};

use common::ForeignAddress;

use crate::auth::ensure_owner;
use crate::error::ContractError;
use crate::state::{OracleInfo, ORACLES, STATE, TOKEN_WITHDRAWERS};

// ============================================================================
// Oracle Management
// ============================================================================

/// Register an oracle together with its withdrawal signing key.
pub fn execute_add_oracle(
    deps: DepsMut,
    info: MessageInfo,
    oracle: String,
    signer: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let oracle_addr = deps.api.addr_validate(&oracle)?;
    let signer = ForeignAddress::from_hex(&signer)?;
    if ORACLES.has(deps.storage, &oracle_addr) {
        return Err(ContractError::OracleAlreadyRegistered);
    }
    ORACLES.save(deps.storage, &oracle_addr, &OracleInfo { signer })?;

    Ok(Response::new()
        .add_attribute("action", "add_oracle")
        .add_attribute("oracle", oracle_addr)
        .add_attribute("signer", signer.to_hex()))
}

/// Remove an oracle. Removing an address that is not an oracle is a no-op.
pub fn execute_remove_oracle(
    deps: DepsMut,
    info: MessageInfo,
    oracle: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let oracle_addr = deps.api.addr_validate(&oracle)?;
    let removed = ORACLES.has(deps.storage, &oracle_addr);
    ORACLES.remove(deps.storage, &oracle_addr);

    Ok(Response::new()
        .add_attribute("action", "remove_oracle")
        .add_attribute("oracle", oracle_addr)
        .add_attribute("removed", removed.to_string()))
}

// ============================================================================
// Token Withdrawer Management
// ============================================================================

pub fn execute_add_token_withdrawer(
    deps: DepsMut,
    info: MessageInfo,
    withdrawer: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let withdrawer_addr = deps.api.addr_validate(&withdrawer)?;
    TOKEN_WITHDRAWERS.save(deps.storage, &withdrawer_addr, &true)?;

    Ok(Response::new()
        .add_attribute("action", "add_token_withdrawer")
        .add_attribute("withdrawer", withdrawer_addr))
}

pub fn execute_remove_token_withdrawer(
    deps: DepsMut,
    info: MessageInfo,
    withdrawer: String,
) -> Result<Response, ContractError> {
    ensure_owner(deps.storage, &info.sender)?;

    let withdrawer_addr = deps.api.addr_validate(&withdrawer)?;
    TOKEN_WITHDRAWERS.remove(deps.storage, &withdrawer_addr);

    Ok(Response::new()
        .add_attribute("action", "remove_token_withdrawer")
        .add_attribute("withdrawer", withdrawer_addr))
}

// ============================================================================
// Quorum
// ============================================================================

/// Update the oracle signatures needed to confirm a withdrawal receipt.
///
/// Receipts already confirmed stay confirmed; pending ones are judged against
/// the new quorum on the next signature they receive.
pub fn execute_update_withdrawal_quorum(
    deps: DepsMut,
    info: MessageInfo,
    quorum: u32,
) -> Result<Response, ContractError> {
    let mut state = ensure_owner(deps.storage, &info.sender)?;

    if quorum == 0 {
        return Err(ContractError::InvalidQuorum);
    }
    let old_quorum = state.withdrawal_quorum;
    state.withdrawal_quorum = quorum;
    STATE.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_attribute("action", "update_withdrawal_quorum")
        .add_attribute("old_quorum", old_quorum.to_string())
        .add_attribute("new_quorum", quorum.to_string()))
}
