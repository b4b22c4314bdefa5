//! Common - Shared Types and Utilities for the Transfer Gateway Contracts
//!
//! This package provides the pieces both the gateway and the address mapper
//! need to agree on: Mainnet address encoding, keccak hashing, typed
//! signature recovery, and the message interfaces of the collaborator
//! contracts the gateway talks to.

pub mod foreign_address;
pub mod hash;
pub mod mapper;
pub mod signature;
pub mod token;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use foreign_address::{AddressError, ForeignAddress};
pub use hash::{bytes32_to_hex, keccak256, mapping_hash};
pub use signature::{recover_signer, verify_signer, SignatureError, SignatureScheme};
