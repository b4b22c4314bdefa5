use cosmwasm_schema::cw_serde;
use cosmwasm_std::Binary;

pub use common::mapper::{
    AddressMapperQueryMsg as QueryMsg, ForeignAddressResponse, LocalAddressResponse,
};

#[cw_serde]
pub struct InstantiateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Bind the caller (`local`) to a Mainnet account.
    ///
    /// `signature` is a typed signature by the `foreign` key over
    /// `keccak256(foreign ‖ local)`.
    AddIdentityMapping {
        foreign: String,
        local: String,
        signature: Binary,
    },
}

#[cw_serde]
pub struct MigrateMsg {}
