//! Transfer Gateway Contract - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use common::ForeignAddress;

use crate::error::ContractError;
use crate::execute::{
    execute_add_authorized_contract_mapping, execute_add_oracle, execute_add_token_withdrawer,
    execute_confirm_withdrawal_receipt, execute_process_event_batch,
    execute_propose_contract_mapping, execute_receive_token, execute_reclaim_contract_tokens,
    execute_reclaim_tokens, execute_remove_oracle, execute_remove_token_withdrawer,
    execute_update_withdrawal_quorum, execute_verify_contract_creators,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_foreign_contract, query_local_contract, query_oracles,
    query_pending_withdrawal_receipts, query_state, query_token_withdrawers,
    query_unclaimed_tokens, query_unverified_contract_creators, query_withdrawal_receipt,
};
use crate::state::{GatewayState, OracleInfo, CONTRACT_NAME, CONTRACT_VERSION, ORACLES, STATE};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let owner = deps.api.addr_validate(&msg.owner)?;
    let address_mapper = deps.api.addr_validate(&msg.address_mapper)?;
    let mainnet_gateway = ForeignAddress::from_hex(&msg.mainnet_gateway)?;

    if msg.withdrawal_quorum == 0 {
        return Err(ContractError::InvalidQuorum);
    }

    for oracle in &msg.oracles {
        let oracle_addr = deps.api.addr_validate(&oracle.address)?;
        let signer = ForeignAddress::from_hex(&oracle.signer)?;
        if ORACLES.has(deps.storage, &oracle_addr) {
            return Err(ContractError::OracleAlreadyRegistered);
        }
        ORACLES.save(deps.storage, &oracle_addr, &OracleInfo { signer })?;
    }

    let state = GatewayState {
        owner,
        last_mainnet_block_num: msg.last_mainnet_block_num.unwrap_or(0),
        withdrawal_quorum: msg.withdrawal_quorum,
        address_mapper,
        mainnet_gateway,
        next_contract_mapping_id: 1,
        next_withdrawal_receipt_id: 1,
    };
    STATE.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("owner", state.owner)
        .add_attribute("oracles", msg.oracles.len().to_string())
        .add_attribute("withdrawal_quorum", state.withdrawal_quorum.to_string())
        .add_attribute("mainnet_gateway", state.mainnet_gateway.to_hex()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Access control
        ExecuteMsg::AddOracle { oracle, signer } => execute_add_oracle(deps, info, oracle, signer),
        ExecuteMsg::RemoveOracle { oracle } => execute_remove_oracle(deps, info, oracle),
        ExecuteMsg::AddTokenWithdrawer { withdrawer } => {
            execute_add_token_withdrawer(deps, info, withdrawer)
        }
        ExecuteMsg::RemoveTokenWithdrawer { withdrawer } => {
            execute_remove_token_withdrawer(deps, info, withdrawer)
        }
        ExecuteMsg::UpdateWithdrawalQuorum { quorum } => {
            execute_update_withdrawal_quorum(deps, info, quorum)
        }

        // Event ingestion
        ExecuteMsg::ProcessEventBatch { events } => execute_process_event_batch(deps, info, events),

        // Contract mappings
        ExecuteMsg::ProposeContractMapping {
            foreign_contract,
            local_contract,
            foreign_contract_creator_sig,
            foreign_contract_tx_hash,
        } => execute_propose_contract_mapping(
            deps,
            info,
            foreign_contract,
            local_contract,
            foreign_contract_creator_sig,
            foreign_contract_tx_hash,
        ),
        ExecuteMsg::VerifyContractCreators { creators } => {
            execute_verify_contract_creators(deps, info, creators)
        }
        ExecuteMsg::AddAuthorizedContractMapping {
            foreign_contract,
            local_contract,
        } => execute_add_authorized_contract_mapping(deps, info, foreign_contract, local_contract),

        // Reclaim
        ExecuteMsg::ReclaimTokens {} => execute_reclaim_tokens(deps, info),
        ExecuteMsg::ReclaimContractTokens { foreign_contract } => {
            execute_reclaim_contract_tokens(deps, info, foreign_contract)
        }

        // Withdrawals
        ExecuteMsg::ReceiveToken(receive) => execute_receive_token(deps, info, receive),
        ExecuteMsg::ConfirmWithdrawalReceipt {
            receipt_id,
            signature,
        } => execute_confirm_withdrawal_receipt(deps, info, receipt_id, signature),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::State {} => to_json_binary(&query_state(deps)?),
        QueryMsg::Oracles {} => to_json_binary(&query_oracles(deps)?),
        QueryMsg::TokenWithdrawers {} => to_json_binary(&query_token_withdrawers(deps)?),
        QueryMsg::UnclaimedTokens { owner } => {
            to_json_binary(&query_unclaimed_tokens(deps, owner)?)
        }
        QueryMsg::UnverifiedContractCreators { start_after, limit } => to_json_binary(
            &query_unverified_contract_creators(deps, start_after, limit)?,
        ),
        QueryMsg::LocalContract { foreign_contract } => {
            to_json_binary(&query_local_contract(deps, foreign_contract)?)
        }
        QueryMsg::ForeignContract { local_contract } => {
            to_json_binary(&query_foreign_contract(deps, local_contract)?)
        }
        QueryMsg::WithdrawalReceipt { receipt_id } => {
            to_json_binary(&query_withdrawal_receipt(deps, receipt_id)?)
        }
        QueryMsg::PendingWithdrawalReceipts { start_after, limit } => to_json_binary(
            &query_pending_withdrawal_receipts(deps, start_after, limit)?,
        ),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
