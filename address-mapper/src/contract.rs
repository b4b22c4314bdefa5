use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw2::set_contract_version;

use common::{mapping_hash, verify_signer, ForeignAddress};

use crate::error::ContractError;
use crate::msg::{
    ExecuteMsg, ForeignAddressResponse, InstantiateMsg, LocalAddressResponse, MigrateMsg, QueryMsg,
};
use crate::state::{CONTRACT_NAME, CONTRACT_VERSION, FOREIGN_BY_LOCAL, LOCAL_BY_FOREIGN};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    _msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new().add_attribute("action", "instantiate"))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::AddIdentityMapping {
            foreign,
            local,
            signature,
        } => execute_add_identity_mapping(deps, info, foreign, local, signature),
    }
}

fn execute_add_identity_mapping(
    deps: DepsMut,
    info: MessageInfo,
    foreign: String,
    local: String,
    signature: Binary,
) -> Result<Response, ContractError> {
    let local = deps.api.addr_validate(&local)?;
    if info.sender != local {
        return Err(ContractError::Unauthorized);
    }
    let foreign = ForeignAddress::from_hex(&foreign)?;

    if LOCAL_BY_FOREIGN.has(deps.storage, foreign.as_bytes()) {
        return Err(ContractError::IdentityMappingExists {
            address: foreign.to_hex(),
        });
    }
    if FOREIGN_BY_LOCAL.has(deps.storage, &local) {
        return Err(ContractError::IdentityMappingExists {
            address: local.to_string(),
        });
    }

    let hash = mapping_hash(&foreign, local.as_str());
    verify_signer(deps.api, &hash, &signature, &foreign)?;

    LOCAL_BY_FOREIGN.save(deps.storage, foreign.as_bytes(), &local)?;
    FOREIGN_BY_LOCAL.save(deps.storage, &local, &foreign)?;

    Ok(Response::new()
        .add_attribute("action", "add_identity_mapping")
        .add_attribute("foreign", foreign.to_hex())
        .add_attribute("local", local))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::LocalAddress { foreign } => to_json_binary(&query_local_address(deps, foreign)?),
        QueryMsg::ForeignAddress { local } => to_json_binary(&query_foreign_address(deps, local)?),
    }
}

fn query_local_address(deps: Deps, foreign: String) -> StdResult<LocalAddressResponse> {
    let foreign =
        ForeignAddress::from_hex(&foreign).map_err(|e| StdError::generic_err(e.to_string()))?;
    let address = LOCAL_BY_FOREIGN.may_load(deps.storage, foreign.as_bytes())?;
    Ok(LocalAddressResponse { address })
}

fn query_foreign_address(deps: Deps, local: String) -> StdResult<ForeignAddressResponse> {
    let local = deps.api.addr_validate(&local)?;
    let address = FOREIGN_BY_LOCAL
        .may_load(deps.storage, &local)?
        .map(|foreign| foreign.to_hex());
    Ok(ForeignAddressResponse { address })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("action", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
