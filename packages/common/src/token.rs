//! Interface between the gateway and local token contracts.
//!
//! The gateway only needs two things from a local token contract: a way to
//! hand a token to a local owner (minting it into the gateway's custody first
//! if it has never been seen on this chain), and a receive hook so holders can
//! give tokens back to the gateway when they withdraw to Mainnet.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Addr, Binary, CosmosMsg, StdResult, Uint256, WasmMsg};

/// Messages the gateway sends to a local token contract
#[cw_serde]
pub enum LocalTokenExecuteMsg {
    /// Transfer `token_id` from the gateway's custody to `recipient`.
    /// Only the gateway may call this.
    TransferOwnership { token_id: Uint256, recipient: String },
}

/// Build the message transferring a token out of the gateway
pub fn transfer_ownership_msg(
    local_contract: &Addr,
    token_id: Uint256,
    recipient: &Addr,
) -> StdResult<CosmosMsg> {
    Ok(CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: local_contract.to_string(),
        msg: to_json_binary(&LocalTokenExecuteMsg::TransferOwnership {
            token_id,
            recipient: recipient.to_string(),
        })?,
        funds: vec![],
    }))
}

/// Hook a local token contract calls on the gateway after moving
/// `token_id` from `sender` into the gateway's custody
#[cw_serde]
pub struct TokenReceiveMsg {
    pub sender: String,
    pub token_id: Uint256,
    pub msg: Binary,
}

impl TokenReceiveMsg {
    /// Serializes the message wrapped in the receiver's `ReceiveToken` variant
    pub fn into_json_binary(self) -> StdResult<Binary> {
        to_json_binary(&ReceiverExecuteMsg::ReceiveToken(self))
    }

    pub fn into_cosmos_msg<T: Into<String>>(self, contract_addr: T) -> StdResult<CosmosMsg> {
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: contract_addr.into(),
            msg: self.into_json_binary()?,
            funds: vec![],
        }))
    }
}

// Only used to serialize the receive hook with the right variant name
#[cw_serde]
enum ReceiverExecuteMsg {
    ReceiveToken(TokenReceiveMsg),
}
