//! Keccak hashing shared by the gateway and the address mapper.
//!
//! Every payload that a Mainnet key signs is reduced to a 32-byte keccak256
//! digest first. Layouts follow Solidity's `abi.encodePacked`, so the same
//! digests can be rebuilt on Mainnet with `keccak256(abi.encodePacked(...))`.

use tiny_keccak::{Hasher, Keccak};

use crate::foreign_address::ForeignAddress;

/// Compute keccak256 hash of arbitrary data
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(data);
    let mut output = [0u8; 32];
    hasher.finalize(&mut output);
    output
}

/// Digest binding a Mainnet address to a local-chain address.
///
/// Used both for identity proofs (account ↔ account) and for contract
/// mapping proofs (contract ↔ contract). The local address is encoded as the
/// UTF-8 bytes of its bech32 string.
///
/// Layout: `keccak256(foreign (20 bytes) ‖ local (utf-8))`
pub fn mapping_hash(foreign: &ForeignAddress, local: &str) -> [u8; 32] {
    let mut data = Vec::with_capacity(20 + local.len());
    data.extend_from_slice(foreign.as_bytes());
    data.extend_from_slice(local.as_bytes());
    keccak256(&data)
}

/// Convert 32-byte hash to hex string (for attributes/logging)
pub fn bytes32_to_hex(bytes: &[u8; 32]) -> String {
    format!("0x{}", hex::encode(bytes))
}
