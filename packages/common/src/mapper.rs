//! Query interface of the identity address mapper.
//!
//! The gateway never owns identity data; it resolves Mainnet accounts to
//! local accounts (and back) by querying whichever contract implements this
//! interface.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

#[cw_serde]
#[derive(QueryResponses)]
pub enum AddressMapperQueryMsg {
    /// Local account bound to a Mainnet account
    #[returns(LocalAddressResponse)]
    LocalAddress {
        /// Mainnet address (0x-prefixed hex)
        foreign: String,
    },

    /// Mainnet account bound to a local account
    #[returns(ForeignAddressResponse)]
    ForeignAddress {
        /// Local address (bech32)
        local: String,
    },
}

#[cw_serde]
pub struct LocalAddressResponse {
    /// `None` when the Mainnet account has no identity mapping
    pub address: Option<Addr>,
}

#[cw_serde]
pub struct ForeignAddressResponse {
    /// `None` when the local account has no identity mapping (0x-prefixed hex)
    pub address: Option<String>,
}
