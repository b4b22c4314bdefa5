//! Contract mapping handlers.
//!
//! Mapping a Mainnet token contract to a local one is a two step protocol:
//! 1. `ProposeContractMapping`: anyone holding a signature by the foreign
//!    contract's creator claims both addresses with a pending mapping
//! 2. `VerifyContractCreators`: an oracle reports who actually created the
//!    contract on Mainnet; a match confirms the mapping, a mismatch releases it
//!
//! The owner can skip the protocol with `AddAuthorizedContractMapping`.

use cosmwasm_std::{Binary, DepsMut, MessageInfo, Response};

use common::{mapping_hash, recover_signer, ForeignAddress};

use crate::auth::{ensure_oracle, ensure_owner};
use crate::error::ContractError;
use crate::msg::VerifiedContractCreator;
use crate::registry::{
    confirm_mapping, ensure_unclaimed, insert_mapping, load_pending, release_mapping, NewMapping,
};
use crate::state::{MappingStatus, STATE};

// ============================================================================
// Proposal
// ============================================================================

/// Claim a foreign/local contract pair with a pending mapping.
///
/// The creator is recovered from `creator_sig` here and checked against the
/// oracle's attestation later.
pub fn execute_propose_contract_mapping(
    deps: DepsMut,
    _info: MessageInfo,
    foreign_contract: String,
    local_contract: String,
    creator_sig: Binary,
    foreign_tx_hash: Binary,
) -> Result<Response, ContractError> {
    let foreign_contract = ForeignAddress::from_hex(&foreign_contract)?;
    let local_contract = deps.api.addr_validate(&local_contract)?;

    // Conflicts win over a bad signature
    ensure_unclaimed(deps.storage, &foreign_contract, &local_contract)?;

    let hash = mapping_hash(&foreign_contract, local_contract.as_str());
    let creator = recover_signer(deps.api, &hash, &creator_sig)?;

    let mut state = STATE.load(deps.storage)?;
    let mapping = insert_mapping(
        deps.storage,
        &mut state,
        NewMapping {
            foreign_contract,
            local_contract,
            creator: Some(creator),
            creator_signature: creator_sig,
            foreign_tx_hash,
            status: MappingStatus::Pending,
        },
    )?;
    STATE.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_attribute("action", "propose_contract_mapping")
        .add_attribute("contract_mapping_id", mapping.id.to_string())
        .add_attribute("foreign_contract", mapping.foreign_contract.to_hex())
        .add_attribute("local_contract", mapping.local_contract)
        .add_attribute("creator", creator.to_hex()))
}

// ============================================================================
// Oracle Attestation
// ============================================================================

/// Apply oracle attestations, resolved by mapping id.
///
/// Ids without a pending mapping are skipped, addresses included, so a batch
/// of attestations is never blocked by one that was already handled.
pub fn execute_verify_contract_creators(
    deps: DepsMut,
    info: MessageInfo,
    creators: Vec<VerifiedContractCreator>,
) -> Result<Response, ContractError> {
    ensure_oracle(deps.storage, &info.sender)?;

    let mut confirmed = Vec::new();
    let mut rejected = Vec::new();
    let mut ignored = 0u32;

    for attestation in creators {
        let Some(mapping) = load_pending(deps.storage, attestation.contract_mapping_id)? else {
            ignored += 1;
            continue;
        };
        let creator = ForeignAddress::from_hex(&attestation.creator)?;
        let contract = ForeignAddress::from_hex(&attestation.contract)?;

        if mapping.foreign_contract == contract && mapping.creator == Some(creator) {
            confirmed.push(mapping.id.to_string());
            confirm_mapping(deps.storage, mapping)?;
        } else {
            rejected.push(mapping.id.to_string());
            release_mapping(deps.storage, &mapping);
        }
    }

    Ok(Response::new()
        .add_attribute("action", "verify_contract_creators")
        .add_attribute("confirmed", confirmed.join(","))
        .add_attribute("rejected", rejected.join(","))
        .add_attribute("ignored", ignored.to_string()))
}

// ============================================================================
// Owner Shortcut
// ============================================================================

pub fn execute_add_authorized_contract_mapping(
    deps: DepsMut,
    info: MessageInfo,
    foreign_contract: String,
    local_contract: String,
) -> Result<Response, ContractError> {
    let mut state = ensure_owner(deps.storage, &info.sender)?;

    let foreign_contract = ForeignAddress::from_hex(&foreign_contract)?;
    let local_contract = deps.api.addr_validate(&local_contract)?;

    let mapping = insert_mapping(
        deps.storage,
        &mut state,
        NewMapping {
            foreign_contract,
            local_contract,
            creator: None,
            creator_signature: Binary::default(),
            foreign_tx_hash: Binary::default(),
            status: MappingStatus::Confirmed,
        },
    )?;
    STATE.save(deps.storage, &state)?;

    Ok(Response::new()
        .add_attribute("action", "add_authorized_contract_mapping")
        .add_attribute("contract_mapping_id", mapping.id.to_string())
        .add_attribute("foreign_contract", mapping.foreign_contract.to_hex())
        .add_attribute("local_contract", mapping.local_contract))
}
