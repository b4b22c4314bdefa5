//! Reclaim handlers.
//!
//! Deposits are parked when either the depositor's identity or the token
//! contract's mapping was missing at ingestion. Once both exist they can be
//! pulled out here. Values that still cannot be routed stay parked.

use cosmwasm_std::{CosmosMsg, DepsMut, MessageInfo, Order, Response, StdResult, Storage};

use common::token::transfer_ownership_msg;
use common::ForeignAddress;

use crate::address_mapper::AddressMapper;
use crate::auth::ensure_owner;
use crate::error::ContractError;
use crate::registry::{find_by_foreign, resolve_local};
use crate::state::{UnclaimedToken, STATE, UNCLAIMED_DEPOSITORS, UNCLAIMED_TOKENS};

/// Self-service reclaim of the caller's parked deposits.
///
/// Calling it again with nothing newly routable succeeds without messages.
pub fn execute_reclaim_tokens(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let state = STATE.load(deps.storage)?;
    let depositor =
        AddressMapper::new(deps.querier, &state.address_mapper).require_foreign(&info.sender)?;

    let entries: Vec<(Vec<u8>, UnclaimedToken)> = UNCLAIMED_TOKENS
        .prefix(depositor.as_bytes())
        .range(deps.storage, None, None, Order::Ascending)
        .collect::<StdResult<_>>()?;

    let mut messages: Vec<CosmosMsg> = Vec::new();
    let mut still_parked = 0usize;

    for (_, entry) in entries {
        let Some(mapping) = find_by_foreign(deps.storage, &entry.token_contract)? else {
            still_parked += entry.values.len();
            continue;
        };
        for value in &entry.values {
            messages.push(transfer_ownership_msg(
                &mapping.local_contract,
                *value,
                &info.sender,
            )?);
        }
        release_unclaimed(deps.storage, &depositor, &entry.token_contract);
    }

    let reclaimed = messages.len();
    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "reclaim_tokens")
        .add_attribute("depositor", depositor.to_hex())
        .add_attribute("recipient", info.sender)
        .add_attribute("reclaimed", reclaimed.to_string())
        .add_attribute("still_parked", still_parked.to_string()))
}

/// Owner sweep: deliver every parked deposit of one contract whose
/// depositor has an identity mapping by now.
pub fn execute_reclaim_contract_tokens(
    deps: DepsMut,
    info: MessageInfo,
    foreign_contract: String,
) -> Result<Response, ContractError> {
    let state = ensure_owner(deps.storage, &info.sender)?;

    let foreign_contract = ForeignAddress::from_hex(&foreign_contract)?;
    let mapping = resolve_local(deps.storage, &foreign_contract)?;
    let mapper = AddressMapper::new(deps.querier, &state.address_mapper);

    let depositors_of_contract: Vec<ForeignAddress> = UNCLAIMED_DEPOSITORS
        .prefix(foreign_contract.as_bytes())
        .keys(deps.storage, None, None, Order::Ascending)
        .map(|key| -> Result<_, ContractError> {
            let depositor = key?;
            Ok(ForeignAddress::from_slice(&depositor)?)
        })
        .collect::<Result<_, _>>()?;

    let mut messages: Vec<CosmosMsg> = Vec::new();
    let mut depositors = 0u32;
    let mut still_parked = 0usize;

    for depositor in depositors_of_contract {
        let Some(entry) = UNCLAIMED_TOKENS
            .may_load(deps.storage, (depositor.as_bytes(), foreign_contract.as_bytes()))?
        else {
            continue;
        };
        let Some(recipient) = mapper.resolve_local(&depositor)? else {
            still_parked += entry.values.len();
            continue;
        };
        for value in &entry.values {
            messages.push(transfer_ownership_msg(
                &mapping.local_contract,
                *value,
                &recipient,
            )?);
        }
        release_unclaimed(deps.storage, &depositor, &foreign_contract);
        depositors += 1;
    }

    let reclaimed = messages.len();
    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "reclaim_contract_tokens")
        .add_attribute("foreign_contract", foreign_contract.to_hex())
        .add_attribute("local_contract", mapping.local_contract)
        .add_attribute("depositors", depositors.to_string())
        .add_attribute("reclaimed", reclaimed.to_string())
        .add_attribute("still_parked", still_parked.to_string()))
}

/// Drop a delivered entry together with its per-contract index
fn release_unclaimed(
    storage: &mut dyn Storage,
    depositor: &ForeignAddress,
    token_contract: &ForeignAddress,
) {
    UNCLAIMED_TOKENS.remove(storage, (depositor.as_bytes(), token_contract.as_bytes()));
    UNCLAIMED_DEPOSITORS.remove(storage, (token_contract.as_bytes(), depositor.as_bytes()));
}
