//! Contract mapping registry.
//!
//! A mapping claims both of its addresses from the moment it is proposed, so
//! at most one pending or confirmed mapping exists per foreign contract and
//! per local contract. Lookups only ever resolve confirmed mappings.

use cosmwasm_std::{Addr, Binary, StdResult, Storage};

use common::ForeignAddress;

use crate::error::ContractError;
use crate::state::{
    ContractMapping, GatewayState, MappingStatus, CONTRACT_MAPPINGS, FOREIGN_CONTRACT_IDS,
    LOCAL_CONTRACT_IDS,
};

/// Fields of a new mapping, before it gets an id
pub struct NewMapping {
    pub foreign_contract: ForeignAddress,
    pub local_contract: Addr,
    pub creator: Option<ForeignAddress>,
    pub creator_signature: Binary,
    pub foreign_tx_hash: Binary,
    pub status: MappingStatus,
}

/// Fail with `ContractMappingExists` if either address is claimed by a
/// pending or confirmed mapping
pub fn ensure_unclaimed(
    storage: &dyn Storage,
    foreign_contract: &ForeignAddress,
    local_contract: &Addr,
) -> Result<(), ContractError> {
    if FOREIGN_CONTRACT_IDS.has(storage, foreign_contract.as_bytes())
        || LOCAL_CONTRACT_IDS.has(storage, local_contract)
    {
        return Err(ContractError::ContractMappingExists);
    }
    Ok(())
}

/// Store a mapping and claim both addresses.
///
/// Bumps `state.next_contract_mapping_id`; the caller saves `state`.
pub fn insert_mapping(
    storage: &mut dyn Storage,
    state: &mut GatewayState,
    new: NewMapping,
) -> Result<ContractMapping, ContractError> {
    ensure_unclaimed(storage, &new.foreign_contract, &new.local_contract)?;

    let id = state.next_contract_mapping_id;
    state.next_contract_mapping_id += 1;

    let mapping = ContractMapping {
        id,
        foreign_contract: new.foreign_contract,
        local_contract: new.local_contract,
        creator: new.creator,
        creator_signature: new.creator_signature,
        foreign_tx_hash: new.foreign_tx_hash,
        status: new.status,
    };
    CONTRACT_MAPPINGS.save(storage, id, &mapping)?;
    FOREIGN_CONTRACT_IDS.save(storage, mapping.foreign_contract.as_bytes(), &id)?;
    LOCAL_CONTRACT_IDS.save(storage, &mapping.local_contract, &id)?;

    Ok(mapping)
}

/// Pending mapping by id, `None` if unknown or already confirmed
pub fn load_pending(storage: &dyn Storage, id: u64) -> StdResult<Option<ContractMapping>> {
    Ok(CONTRACT_MAPPINGS
        .may_load(storage, id)?
        .filter(|m| m.status == MappingStatus::Pending))
}

pub fn confirm_mapping(storage: &mut dyn Storage, mut mapping: ContractMapping) -> StdResult<()> {
    mapping.status = MappingStatus::Confirmed;
    CONTRACT_MAPPINGS.save(storage, mapping.id, &mapping)
}

/// Delete a mapping and free both of its addresses
pub fn release_mapping(storage: &mut dyn Storage, mapping: &ContractMapping) {
    CONTRACT_MAPPINGS.remove(storage, mapping.id);
    FOREIGN_CONTRACT_IDS.remove(storage, mapping.foreign_contract.as_bytes());
    LOCAL_CONTRACT_IDS.remove(storage, &mapping.local_contract);
}

/// Confirmed mapping of a Mainnet contract, if any
pub fn find_by_foreign(
    storage: &dyn Storage,
    foreign_contract: &ForeignAddress,
) -> StdResult<Option<ContractMapping>> {
    let Some(id) = FOREIGN_CONTRACT_IDS.may_load(storage, foreign_contract.as_bytes())? else {
        return Ok(None);
    };
    confirmed(storage, id)
}

/// Confirmed mapping of a local contract, if any
pub fn find_by_local(
    storage: &dyn Storage,
    local_contract: &Addr,
) -> StdResult<Option<ContractMapping>> {
    let Some(id) = LOCAL_CONTRACT_IDS.may_load(storage, local_contract)? else {
        return Ok(None);
    };
    confirmed(storage, id)
}

pub fn resolve_local(
    storage: &dyn Storage,
    foreign_contract: &ForeignAddress,
) -> Result<ContractMapping, ContractError> {
    find_by_foreign(storage, foreign_contract)?.ok_or_else(|| {
        ContractError::ContractMappingNotFound {
            contract: foreign_contract.to_hex(),
        }
    })
}

pub fn resolve_foreign(
    storage: &dyn Storage,
    local_contract: &Addr,
) -> Result<ContractMapping, ContractError> {
    find_by_local(storage, local_contract)?.ok_or_else(|| ContractError::ContractMappingNotFound {
        contract: local_contract.to_string(),
    })
}

fn confirmed(storage: &dyn Storage, id: u64) -> StdResult<Option<ContractMapping>> {
    Ok(CONTRACT_MAPPINGS
        .may_load(storage, id)?
        .filter(|m| m.status == MappingStatus::Confirmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;

    fn state() -> GatewayState {
        GatewayState {
            owner: Addr::unchecked("terra1owner"),
            last_mainnet_block_num: 0,
            withdrawal_quorum: 1,
            address_mapper: Addr::unchecked("terra1mapper"),
            mainnet_gateway: ForeignAddress::new([0xee; 20]),
            next_contract_mapping_id: 1,
            next_withdrawal_receipt_id: 1,
        }
    }

    fn new_mapping(foreign: u8, local: &str, status: MappingStatus) -> NewMapping {
        NewMapping {
            foreign_contract: ForeignAddress::new([foreign; 20]),
            local_contract: Addr::unchecked(local),
            creator: None,
            creator_signature: Binary::default(),
            foreign_tx_hash: Binary::default(),
            status,
        }
    }

    #[test]
    fn test_pending_mapping_claims_but_does_not_resolve() {
        let mut deps = mock_dependencies();
        let mut state = state();

        let mapping = insert_mapping(
            &mut deps.storage,
            &mut state,
            new_mapping(1, "terra1nft", MappingStatus::Pending),
        )
        .unwrap();
        assert_eq!(mapping.id, 1);
        assert_eq!(state.next_contract_mapping_id, 2);

        let foreign = ForeignAddress::new([1; 20]);
        assert!(find_by_foreign(&deps.storage, &foreign).unwrap().is_none());
        assert!(matches!(
            resolve_foreign(&deps.storage, &Addr::unchecked("terra1nft")),
            Err(ContractError::ContractMappingNotFound { .. })
        ));

        // Either side colliding is a conflict
        let err = insert_mapping(
            &mut deps.storage,
            &mut state,
            new_mapping(1, "terra1other", MappingStatus::Pending),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::ContractMappingExists);
        let err = insert_mapping(
            &mut deps.storage,
            &mut state,
            new_mapping(2, "terra1nft", MappingStatus::Confirmed),
        )
        .unwrap_err();
        assert_eq!(err, ContractError::ContractMappingExists);

        confirm_mapping(&mut deps.storage, mapping).unwrap();
        assert_eq!(
            resolve_local(&deps.storage, &foreign).unwrap().local_contract,
            Addr::unchecked("terra1nft")
        );
        assert!(load_pending(&deps.storage, 1).unwrap().is_none());
    }

    #[test]
    fn test_release_frees_both_addresses() {
        let mut deps = mock_dependencies();
        let mut state = state();

        let mapping = insert_mapping(
            &mut deps.storage,
            &mut state,
            new_mapping(1, "terra1nft", MappingStatus::Pending),
        )
        .unwrap();
        release_mapping(&mut deps.storage, &mapping);

        assert!(load_pending(&deps.storage, mapping.id).unwrap().is_none());
        let again = insert_mapping(
            &mut deps.storage,
            &mut state,
            new_mapping(1, "terra1nft", MappingStatus::Pending),
        )
        .unwrap();
        assert_eq!(again.id, 2);
    }
}
