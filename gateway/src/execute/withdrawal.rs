//! Withdrawal handlers.
//!
//! 1. `ReceiveToken`: a local token contract hands a token to the gateway
//!    and a pending receipt is created for the holder's Mainnet identity
//! 2. `ConfirmWithdrawalReceipt`: oracles sign the receipt's payload hash
//!    until the quorum confirms it
//! 3. A `Withdrawal` event from Mainnet clears the redeemed receipt (see
//!    `mainnet_events`)

use cosmwasm_std::{from_json, Addr, Binary, DepsMut, MessageInfo, Response, Storage};

use common::token::TokenReceiveMsg;
use common::{bytes32_to_hex, verify_signer};

use crate::address_mapper::AddressMapper;
use crate::auth::{ensure_oracle, ensure_token_withdrawer};
use crate::error::ContractError;
use crate::hash::withdrawal_payload_hash;
use crate::msg::ReceiveMsg;
use crate::registry::resolve_foreign;
use crate::state::{
    OracleSignature, ReceiptStatus, TokenKind, WithdrawalReceipt, ORACLES, RECEIPT_BY_OWNER,
    STATE, WITHDRAWAL_RECEIPTS,
};

// ============================================================================
// Initiation
// ============================================================================

/// Receive hook from a local token contract.
///
/// `info.sender` is the token contract; the token is already in the
/// gateway's custody when this runs.
pub fn execute_receive_token(
    deps: DepsMut,
    info: MessageInfo,
    receive: TokenReceiveMsg,
) -> Result<Response, ContractError> {
    let token_owner = deps.api.addr_validate(&receive.sender)?;
    ensure_token_withdrawer(deps.storage, &token_owner)?;

    let msg: ReceiveMsg =
        from_json(&receive.msg).map_err(|e| ContractError::InvalidReceiveMsg {
            reason: e.to_string(),
        })?;

    match msg {
        ReceiveMsg::WithdrawToMainnet {} => {
            create_withdrawal_receipt(deps, info, token_owner, receive)
        }
    }
}

fn create_withdrawal_receipt(
    deps: DepsMut,
    info: MessageInfo,
    token_owner: Addr,
    receive: TokenReceiveMsg,
) -> Result<Response, ContractError> {
    let mapping = resolve_foreign(deps.storage, &info.sender)?;

    if let Some(receipt_id) = RECEIPT_BY_OWNER.may_load(deps.storage, &token_owner)? {
        return Err(ContractError::PendingWithdrawalExists { receipt_id });
    }

    let mut state = STATE.load(deps.storage)?;
    let foreign_owner =
        AddressMapper::new(deps.querier, &state.address_mapper).require_foreign(&token_owner)?;

    let receipt_id = state.next_withdrawal_receipt_id;
    state.next_withdrawal_receipt_id += 1;

    let payload_hash = withdrawal_payload_hash(
        &foreign_owner,
        &mapping.foreign_contract,
        receive.token_id,
        receipt_id,
        &state.mainnet_gateway,
    );

    let receipt = WithdrawalReceipt {
        id: receipt_id,
        token_owner: token_owner.clone(),
        foreign_owner,
        local_contract: mapping.local_contract,
        foreign_contract: mapping.foreign_contract,
        token_kind: TokenKind::Erc721,
        value: receive.token_id,
        payload_hash: payload_hash.to_vec().into(),
        signatures: vec![],
        status: ReceiptStatus::Pending,
    };
    WITHDRAWAL_RECEIPTS.save(deps.storage, receipt_id, &receipt)?;
    RECEIPT_BY_OWNER.save(deps.storage, &token_owner, &receipt_id)?;
    STATE.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_attribute("action", "withdraw_to_mainnet")
        .add_attribute("receipt_id", receipt_id.to_string())
        .add_attribute("token_owner", token_owner)
        .add_attribute("foreign_owner", foreign_owner.to_hex())
        .add_attribute("foreign_contract", receipt.foreign_contract.to_hex())
        .add_attribute("token_id", receive.token_id.to_string())
        .add_attribute("payload_hash", bytes32_to_hex(&payload_hash)))
}

// ============================================================================
// Oracle Confirmation
// ============================================================================

/// Add the calling oracle's signature to a receipt.
///
/// A second signature from the same oracle is not stored again. Only
/// signatures of oracles that are still registered count towards the quorum,
/// and the count is re-evaluated on every submission, so a receipt left short
/// by a lowered quorum confirms on the next signature from any oracle.
pub fn execute_confirm_withdrawal_receipt(
    deps: DepsMut,
    info: MessageInfo,
    receipt_id: u64,
    signature: Binary,
) -> Result<Response, ContractError> {
    ensure_oracle(deps.storage, &info.sender)?;

    let oracle = ORACLES.load(deps.storage, &info.sender)?;
    let mut receipt = WITHDRAWAL_RECEIPTS
        .may_load(deps.storage, receipt_id)?
        .ok_or(ContractError::WithdrawalReceiptNotFound { receipt_id })?;

    let payload_hash: [u8; 32] = receipt.payload_hash.to_array()?;
    verify_signer(deps.api, &payload_hash, &signature, &oracle.signer)?;

    let duplicate = receipt.signatures.iter().any(|s| s.oracle == info.sender);
    if !duplicate {
        receipt.signatures.push(OracleSignature {
            oracle: info.sender.clone(),
            signature,
        });
    }

    let quorum = STATE.load(deps.storage)?.withdrawal_quorum;
    let signers = registered_signers(deps.storage, &receipt);
    let newly_confirmed =
        receipt.status == ReceiptStatus::Pending && signers >= quorum as usize;
    if newly_confirmed {
        receipt.status = ReceiptStatus::Confirmed;
    }
    if !duplicate || newly_confirmed {
        WITHDRAWAL_RECEIPTS.save(deps.storage, receipt_id, &receipt)?;
    }

    Ok(Response::new()
        .add_attribute("action", "confirm_withdrawal_receipt")
        .add_attribute("receipt_id", receipt_id.to_string())
        .add_attribute("oracle", info.sender)
        .add_attribute("duplicate", duplicate.to_string())
        .add_attribute("signatures", signers.to_string())
        .add_attribute("quorum", quorum.to_string())
        .add_attribute("confirmed", newly_confirmed.to_string()))
}

/// Signatures on `receipt` whose oracle is still registered
fn registered_signers(storage: &dyn Storage, receipt: &WithdrawalReceipt) -> usize {
    receipt
        .signatures
        .iter()
        .filter(|s| ORACLES.has(storage, &s.oracle))
        .count()
}
