//! Minimal local NFT contract the gateway can route deposits to.
//!
//! - `TransferOwnership` (gateway only): mints the token to the recipient if
//!   it does not exist yet, otherwise moves it out of the gateway's custody
//! - `SendToken`: moves a holder's token to a contract and calls its
//!   `ReceiveToken` hook
//! - `SetFrozen`: makes every transfer fail, to exercise rollback

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Empty, Env, MessageInfo, Response, StdError,
    StdResult, Uint256,
};
use cw_multi_test::{Contract, ContractWrapper};
use cw_storage_plus::{Item, Map};

use common::token::TokenReceiveMsg;

const GATEWAY: Item<Addr> = Item::new("gateway");
const FROZEN: Item<bool> = Item::new("frozen");
const OWNERS: Map<&str, Addr> = Map::new("owners");

#[cw_serde]
pub struct InstantiateMsg {
    pub gateway: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    TransferOwnership {
        token_id: Uint256,
        recipient: String,
    },
    SendToken {
        contract: String,
        token_id: Uint256,
        msg: Binary,
    },
    Mint {
        token_id: Uint256,
        owner: String,
    },
    SetFrozen {
        frozen: bool,
    },
}

#[cw_serde]
pub enum QueryMsg {
    OwnerOf { token_id: Uint256 },
}

#[cw_serde]
pub struct OwnerOfResponse {
    pub owner: Option<Addr>,
}

pub fn contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(execute, instantiate, query))
}

fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> StdResult<Response> {
    GATEWAY.save(deps.storage, &deps.api.addr_validate(&msg.gateway)?)?;
    FROZEN.save(deps.storage, &false)?;
    Ok(Response::new())
}

fn execute(deps: DepsMut, _env: Env, info: MessageInfo, msg: ExecuteMsg) -> StdResult<Response> {
    match msg {
        ExecuteMsg::TransferOwnership {
            token_id,
            recipient,
        } => {
            ensure_not_frozen(deps.as_ref())?;
            let gateway = GATEWAY.load(deps.storage)?;
            if info.sender != gateway {
                return Err(StdError::generic_err("only the gateway can transfer"));
            }
            let key = token_id.to_string();
            match OWNERS.may_load(deps.storage, &key)? {
                Some(owner) if owner != gateway => {
                    return Err(StdError::generic_err("token not held by the gateway"));
                }
                _ => {}
            }
            let recipient = deps.api.addr_validate(&recipient)?;
            OWNERS.save(deps.storage, &key, &recipient)?;
            Ok(Response::new().add_attribute("action", "transfer_ownership"))
        }
        ExecuteMsg::SendToken {
            contract,
            token_id,
            msg,
        } => {
            ensure_not_frozen(deps.as_ref())?;
            let key = token_id.to_string();
            if OWNERS.may_load(deps.storage, &key)? != Some(info.sender.clone()) {
                return Err(StdError::generic_err("sender does not own the token"));
            }
            let contract = deps.api.addr_validate(&contract)?;
            OWNERS.save(deps.storage, &key, &contract)?;
            let hook = TokenReceiveMsg {
                sender: info.sender.to_string(),
                token_id,
                msg,
            }
            .into_cosmos_msg(contract)?;
            Ok(Response::new().add_message(hook))
        }
        ExecuteMsg::Mint { token_id, owner } => {
            let key = token_id.to_string();
            if OWNERS.has(deps.storage, &key) {
                return Err(StdError::generic_err("token already minted"));
            }
            OWNERS.save(deps.storage, &key, &deps.api.addr_validate(&owner)?)?;
            Ok(Response::new())
        }
        ExecuteMsg::SetFrozen { frozen } => {
            FROZEN.save(deps.storage, &frozen)?;
            Ok(Response::new())
        }
    }
}

fn ensure_not_frozen(deps: Deps) -> StdResult<()> {
    if FROZEN.load(deps.storage)? {
        return Err(StdError::generic_err("token contract frozen"));
    }
    Ok(())
}

fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::OwnerOf { token_id } => to_json_binary(&OwnerOfResponse {
            owner: OWNERS.may_load(deps.storage, &token_id.to_string())?,
        }),
    }
}
