//! Mainnet (Ethereum-compatible) address encoding.
//!
//! Addresses are 20 raw bytes. On the wire they travel as `0x`-prefixed hex
//! strings; in storage they are kept as the raw byte array so they can be
//! used directly as map keys.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hash::keccak256;

/// Length of a raw Mainnet address
pub const FOREIGN_ADDRESS_LEN: usize = 20;

#[derive(Error, Debug, PartialEq)]
pub enum AddressError {
    #[error("Invalid hex encoding: {reason}")]
    InvalidHex { reason: String },

    #[error("Invalid address length: expected 20 bytes, got {got}")]
    InvalidLength { got: usize },

    #[error("Invalid public key: expected 65-byte uncompressed key, got {got} bytes")]
    InvalidPublicKey { got: usize },
}

/// A Mainnet account or contract address
#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
pub struct ForeignAddress([u8; FOREIGN_ADDRESS_LEN]);

impl ForeignAddress {
    pub const fn new(raw: [u8; FOREIGN_ADDRESS_LEN]) -> Self {
        Self(raw)
    }

    /// Parse a hex string, with or without the `0x` prefix. Checksummed
    /// (mixed case) input is accepted but the checksum is not enforced.
    pub fn from_hex(input: &str) -> Result<Self, AddressError> {
        let stripped = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        let bytes = hex::decode(stripped).map_err(|e| AddressError::InvalidHex {
            reason: e.to_string(),
        })?;
        Self::from_slice(&bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, AddressError> {
        let raw: [u8; FOREIGN_ADDRESS_LEN] = bytes
            .try_into()
            .map_err(|_| AddressError::InvalidLength { got: bytes.len() })?;
        Ok(Self(raw))
    }

    /// Derive the address owning an uncompressed secp256k1 public key
    /// (`0x04 ‖ x ‖ y`): the last 20 bytes of `keccak256(x ‖ y)`.
    pub fn from_public_key(public_key: &[u8]) -> Result<Self, AddressError> {
        if public_key.len() != 65 || public_key[0] != 0x04 {
            return Err(AddressError::InvalidPublicKey {
                got: public_key.len(),
            });
        }
        let digest = keccak256(&public_key[1..]);
        let mut raw = [0u8; FOREIGN_ADDRESS_LEN];
        raw.copy_from_slice(&digest[12..]);
        Ok(Self(raw))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_array(self) -> [u8; FOREIGN_ADDRESS_LEN] {
        self.0
    }

    /// Lowercase `0x`-prefixed hex form
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for ForeignAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ForeignAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; FOREIGN_ADDRESS_LEN]> for ForeignAddress {
    fn from(raw: [u8; FOREIGN_ADDRESS_LEN]) -> Self {
        Self(raw)
    }
}
