//! Query handlers for the transfer gateway contract.
//!
//! All queries are unauthenticated read-only projections of contract state.

use cosmwasm_std::{Addr, Binary, Deps, Order, StdError, StdResult};
use cw_storage_plus::Bound;

use common::ForeignAddress;

use crate::msg::{
    ContractMappingResponse, OracleResponse, OraclesResponse, StateResponse,
    TokenWithdrawersResponse, UnclaimedTokenEntry, UnclaimedTokensResponse,
    UnverifiedContractCreator, UnverifiedContractCreatorsResponse, WithdrawalReceiptResponse,
    WithdrawalReceiptsResponse,
};
use crate::registry::{find_by_foreign, find_by_local};
use crate::state::{
    ContractMapping, MappingStatus, OracleInfo, ReceiptStatus, UnclaimedToken, WithdrawalReceipt,
    CONTRACT_MAPPINGS, ORACLES, STATE, TOKEN_WITHDRAWERS, UNCLAIMED_TOKENS, WITHDRAWAL_RECEIPTS,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_state(deps: Deps) -> StdResult<StateResponse> {
    let state = STATE.load(deps.storage)?;
    let oracle_count = ORACLES
        .keys(deps.storage, None, None, Order::Ascending)
        .count() as u32;

    Ok(StateResponse {
        owner: state.owner,
        last_mainnet_block_num: state.last_mainnet_block_num,
        withdrawal_quorum: state.withdrawal_quorum,
        address_mapper: state.address_mapper,
        mainnet_gateway: state.mainnet_gateway.to_hex(),
        oracle_count,
    })
}

pub fn query_oracles(deps: Deps) -> StdResult<OraclesResponse> {
    let oracles = ORACLES
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (oracle, OracleInfo { signer }) = item?;
            Ok(OracleResponse {
                oracle,
                signer: signer.to_hex(),
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(OraclesResponse { oracles })
}

pub fn query_token_withdrawers(deps: Deps) -> StdResult<TokenWithdrawersResponse> {
    let withdrawers = TOKEN_WITHDRAWERS
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((addr, true)) => Some(Ok(addr)),
            Ok((_, false)) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<StdResult<Vec<Addr>>>()?;

    Ok(TokenWithdrawersResponse { withdrawers })
}

// ============================================================================
// Unclaimed Deposits
// ============================================================================

/// Parked deposits of one Mainnet depositor, grouped by token contract.
pub fn query_unclaimed_tokens(deps: Deps, owner: String) -> StdResult<UnclaimedTokensResponse> {
    let owner = parse_foreign(&owner)?;

    let tokens = UNCLAIMED_TOKENS
        .prefix(owner.as_bytes())
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (_, entry) = item?;
            Ok(unclaimed_entry(entry))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(UnclaimedTokensResponse {
        owner: owner.to_hex(),
        tokens,
    })
}

fn unclaimed_entry(entry: UnclaimedToken) -> UnclaimedTokenEntry {
    UnclaimedTokenEntry {
        token_contract: entry.token_contract.to_hex(),
        token_kind: entry.token_kind,
        values: entry.values,
    }
}

// ============================================================================
// Contract Mappings
// ============================================================================

/// Pending mappings in id order.
pub fn query_unverified_contract_creators(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<UnverifiedContractCreatorsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let creators = CONTRACT_MAPPINGS
        .range(deps.storage, start, None, Order::Ascending)
        .filter(|item| !matches!(item, Ok((_, m)) if m.status != MappingStatus::Pending))
        .take(limit)
        .map(|item| {
            let (_, m) = item?;
            Ok(UnverifiedContractCreator {
                contract_mapping_id: m.id,
                foreign_contract: m.foreign_contract.to_hex(),
                local_contract: m.local_contract,
                foreign_contract_tx_hash: m.foreign_tx_hash,
            })
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(UnverifiedContractCreatorsResponse { creators })
}

pub fn query_local_contract(
    deps: Deps,
    foreign_contract: String,
) -> StdResult<ContractMappingResponse> {
    let foreign = parse_foreign(&foreign_contract)?;
    find_by_foreign(deps.storage, &foreign)?
        .map(mapping_response)
        .ok_or_else(|| StdError::not_found(format!("contract mapping for {}", foreign)))
}

pub fn query_foreign_contract(
    deps: Deps,
    local_contract: String,
) -> StdResult<ContractMappingResponse> {
    let local = deps.api.addr_validate(&local_contract)?;
    find_by_local(deps.storage, &local)?
        .map(mapping_response)
        .ok_or_else(|| StdError::not_found(format!("contract mapping for {}", local)))
}

fn mapping_response(m: ContractMapping) -> ContractMappingResponse {
    ContractMappingResponse {
        contract_mapping_id: m.id,
        foreign_contract: m.foreign_contract.to_hex(),
        local_contract: m.local_contract,
        status: m.status,
    }
}

// ============================================================================
// Withdrawal Receipts
// ============================================================================

pub fn query_withdrawal_receipt(deps: Deps, receipt_id: u64) -> StdResult<WithdrawalReceiptResponse> {
    let receipt = WITHDRAWAL_RECEIPTS
        .may_load(deps.storage, receipt_id)?
        .ok_or_else(|| StdError::not_found(format!("withdrawal receipt {}", receipt_id)))?;
    Ok(receipt_response(receipt))
}

/// Receipts still collecting oracle signatures, in id order.
pub fn query_pending_withdrawal_receipts(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<WithdrawalReceiptsResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let receipts = WITHDRAWAL_RECEIPTS
        .range(deps.storage, start, None, Order::Ascending)
        .filter(|item| !matches!(item, Ok((_, r)) if r.status != ReceiptStatus::Pending))
        .take(limit)
        .map(|item| item.map(|(_, r)| receipt_response(r)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(WithdrawalReceiptsResponse { receipts })
}

fn receipt_response(r: WithdrawalReceipt) -> WithdrawalReceiptResponse {
    let (signers, signatures): (Vec<Addr>, Vec<Binary>) = r
        .signatures
        .into_iter()
        .map(|s| (s.oracle, s.signature))
        .unzip();

    WithdrawalReceiptResponse {
        receipt_id: r.id,
        token_owner: r.token_owner,
        foreign_owner: r.foreign_owner.to_hex(),
        local_contract: r.local_contract,
        foreign_contract: r.foreign_contract.to_hex(),
        token_kind: r.token_kind,
        value: r.value,
        payload_hash: r.payload_hash,
        signers,
        signatures,
        status: r.status,
    }
}

fn parse_foreign(input: &str) -> StdResult<ForeignAddress> {
    ForeignAddress::from_hex(input).map_err(|e| StdError::generic_err(e.to_string()))
}
