use common::{AddressError, SignatureError};
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only the local account can bind its identity")]
    Unauthorized,

    #[error("Invalid Mainnet address: {0}")]
    InvalidForeignAddress(#[from] AddressError),

    #[error("Invalid identity proof: {0}")]
    InvalidSignature(#[from] SignatureError),

    #[error("Identity mapping already exists for {address}")]
    IdentityMappingExists { address: String },
}
