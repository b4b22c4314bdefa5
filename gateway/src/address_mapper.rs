//! Client for the identity address mapper contract.
//!
//! The gateway only reads identities; a failing query (unreachable contract,
//! malformed response) becomes [`ContractError::AddressMapperUnavailable`]
//! and aborts the calling entry point.

use cosmwasm_std::{Addr, QuerierWrapper};

use common::mapper::{AddressMapperQueryMsg, ForeignAddressResponse, LocalAddressResponse};
use common::ForeignAddress;

use crate::error::ContractError;

pub struct AddressMapper<'a> {
    querier: QuerierWrapper<'a>,
    contract: &'a Addr,
}

impl<'a> AddressMapper<'a> {
    pub fn new(querier: QuerierWrapper<'a>, contract: &'a Addr) -> Self {
        Self { querier, contract }
    }

    /// Local account bound to a Mainnet account, if any
    pub fn resolve_local(&self, foreign: &ForeignAddress) -> Result<Option<Addr>, ContractError> {
        let res: LocalAddressResponse = self
            .querier
            .query_wasm_smart(
                self.contract,
                &AddressMapperQueryMsg::LocalAddress {
                    foreign: foreign.to_hex(),
                },
            )
            .map_err(|e| ContractError::AddressMapperUnavailable {
                reason: e.to_string(),
            })?;
        Ok(res.address)
    }

    /// Mainnet account bound to a local account, if any
    pub fn resolve_foreign(&self, local: &Addr) -> Result<Option<ForeignAddress>, ContractError> {
        let res: ForeignAddressResponse = self
            .querier
            .query_wasm_smart(
                self.contract,
                &AddressMapperQueryMsg::ForeignAddress {
                    local: local.to_string(),
                },
            )
            .map_err(|e| ContractError::AddressMapperUnavailable {
                reason: e.to_string(),
            })?;
        res.address
            .map(|hex| {
                ForeignAddress::from_hex(&hex).map_err(|e| {
                    ContractError::AddressMapperUnavailable {
                        reason: format!("malformed foreign address {hex}: {e}"),
                    }
                })
            })
            .transpose()
    }

    /// Like [`Self::resolve_foreign`], failing when no identity exists
    pub fn require_foreign(&self, local: &Addr) -> Result<ForeignAddress, ContractError> {
        self.resolve_foreign(local)?
            .ok_or_else(|| ContractError::IdentityNotMapped {
                account: local.to_string(),
            })
    }
}
