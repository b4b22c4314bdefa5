//! Mainnet event ingestion (oracle only).
//!
//! Events are applied in block order, exactly once. Everything up to
//! `last_mainnet_block_num` has already been applied, so events at that block
//! are skipped and events below it reject the whole batch.

use cosmwasm_std::{CosmosMsg, DepsMut, MessageInfo, Response, Storage, Uint256};

use common::token::transfer_ownership_msg;
use common::ForeignAddress;

use crate::address_mapper::AddressMapper;
use crate::auth::ensure_oracle;
use crate::error::ContractError;
use crate::msg::{MainnetEvent, MainnetPayload, MainnetTokenDeposited, MainnetTokenWithdrawn};
use crate::registry::find_by_foreign;
use crate::state::{
    ReceiptStatus, TokenKind, UnclaimedToken, RECEIPT_BY_OWNER, STATE, UNCLAIMED_DEPOSITORS,
    UNCLAIMED_TOKENS, WITHDRAWAL_RECEIPTS,
};

/// What applying a single deposit did
enum DepositOutcome {
    Transferred(CosmosMsg),
    Parked,
}

/// Apply a batch of Mainnet events.
pub fn execute_process_event_batch(
    deps: DepsMut,
    info: MessageInfo,
    events: Vec<MainnetEvent>,
) -> Result<Response, ContractError> {
    ensure_oracle(deps.storage, &info.sender)?;

    if events.is_empty() {
        return Err(ContractError::EmptyEventBatch);
    }

    let mut state = STATE.load(deps.storage)?;
    let new_events = unapplied_events(&events, state.last_mainnet_block_num)?;
    let skipped = events.len() - new_events.len();

    let mapper_contract = state.address_mapper.clone();
    let mapper = AddressMapper::new(deps.querier, &mapper_contract);

    let mut messages = Vec::new();
    let mut parked = 0u32;
    let mut cleared = Vec::new();
    let mut unmatched = Vec::new();

    for event in new_events {
        match &event.payload {
            MainnetPayload::Deposit(deposit) => {
                match apply_deposit(deps.storage, &mapper, deposit)? {
                    DepositOutcome::Transferred(msg) => messages.push(msg),
                    DepositOutcome::Parked => parked += 1,
                }
            }
            MainnetPayload::Withdrawal(withdrawal) => {
                if apply_withdrawal(deps.storage, withdrawal)? {
                    cleared.push(withdrawal.receipt_id.to_string());
                } else {
                    unmatched.push(withdrawal.receipt_id.to_string());
                }
            }
        }
        state.last_mainnet_block_num = event.eth_block;
    }

    STATE.save(deps.storage, &state)?;
    let transferred = messages.len();

    Ok(Response::new()
        .add_messages(messages)
        .add_attribute("action", "process_event_batch")
        .add_attribute("applied", new_events.len().to_string())
        .add_attribute("skipped", skipped.to_string())
        .add_attribute("transferred", transferred.to_string())
        .add_attribute("parked", parked.to_string())
        .add_attribute("withdrawals_cleared", cleared.join(","))
        .add_attribute("withdrawals_unmatched", unmatched.join(","))
        .add_attribute(
            "last_mainnet_block_num",
            state.last_mainnet_block_num.to_string(),
        ))
}

/// Validate block ordering and return the events not applied yet.
///
/// Nothing is written before this check passes, so a rejected batch leaves
/// no trace.
fn unapplied_events(
    events: &[MainnetEvent],
    last_mainnet_block_num: u64,
) -> Result<&[MainnetEvent], ContractError> {
    let mut last_seen = last_mainnet_block_num;
    for event in events {
        if event.eth_block < last_seen {
            return Err(ContractError::InvalidEventBatch {
                block: event.eth_block,
                last_seen,
            });
        }
        last_seen = event.eth_block;
    }

    // Blocks are non-decreasing, so the new events form a suffix
    let first_new = events
        .iter()
        .position(|e| e.eth_block > last_mainnet_block_num)
        .ok_or(ContractError::NoNewEvents {
            last_block: last_mainnet_block_num,
        })?;
    Ok(&events[first_new..])
}

fn apply_deposit(
    storage: &mut dyn Storage,
    mapper: &AddressMapper,
    deposit: &MainnetTokenDeposited,
) -> Result<DepositOutcome, ContractError> {
    if deposit.token_kind != TokenKind::Erc721 {
        return Err(ContractError::UnsupportedTokenKind {
            kind: deposit.token_kind.to_string(),
        });
    }

    let token_contract = ForeignAddress::from_hex(&deposit.token_contract)?;
    let token_owner = ForeignAddress::from_hex(&deposit.token_owner)?;

    if let Some(mapping) = find_by_foreign(storage, &token_contract)? {
        if let Some(local_owner) = mapper.resolve_local(&token_owner)? {
            let msg = transfer_ownership_msg(&mapping.local_contract, deposit.value, &local_owner)?;
            return Ok(DepositOutcome::Transferred(msg));
        }
    }

    park_deposit(
        storage,
        &token_owner,
        &token_contract,
        deposit.token_kind,
        deposit.value,
    )?;
    Ok(DepositOutcome::Parked)
}

/// Keep a deposit that cannot be routed yet until it is reclaimed
fn park_deposit(
    storage: &mut dyn Storage,
    token_owner: &ForeignAddress,
    token_contract: &ForeignAddress,
    token_kind: TokenKind,
    value: Uint256,
) -> Result<(), ContractError> {
    UNCLAIMED_TOKENS.update(
        storage,
        (token_owner.as_bytes(), token_contract.as_bytes()),
        |existing| -> Result<_, ContractError> {
            let mut entry = existing.unwrap_or(UnclaimedToken {
                token_contract: *token_contract,
                token_kind,
                values: vec![],
            });
            entry.values.push(value);
            Ok(entry)
        },
    )?;
    UNCLAIMED_DEPOSITORS.save(
        storage,
        (token_contract.as_bytes(), token_owner.as_bytes()),
        &true,
    )?;
    Ok(())
}

/// Clear the confirmed receipt a Mainnet withdrawal redeemed.
///
/// Returns false when no confirmed receipt matches the event.
fn apply_withdrawal(
    storage: &mut dyn Storage,
    withdrawal: &MainnetTokenWithdrawn,
) -> Result<bool, ContractError> {
    let token_contract = ForeignAddress::from_hex(&withdrawal.token_contract)?;
    let token_owner = ForeignAddress::from_hex(&withdrawal.token_owner)?;

    let Some(receipt) = WITHDRAWAL_RECEIPTS.may_load(storage, withdrawal.receipt_id)? else {
        return Ok(false);
    };
    let matches = receipt.status == ReceiptStatus::Confirmed
        && receipt.token_kind == withdrawal.token_kind
        && receipt.foreign_owner == token_owner
        && receipt.foreign_contract == token_contract
        && receipt.value == withdrawal.value;
    if !matches {
        return Ok(false);
    }

    WITHDRAWAL_RECEIPTS.remove(storage, receipt.id);
    RECEIPT_BY_OWNER.remove(storage, &receipt.token_owner);
    Ok(true)
}
