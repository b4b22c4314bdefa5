//! Withdrawal payload hashing
//!
//! Oracles sign the payload hash of a withdrawal receipt; the Mainnet gateway
//! rebuilds the same digest before releasing the token.
//!
//! # Mainnet Reference
//! ```solidity
//! keccak256(abi.encodePacked(tokenOwner, tokenContract, value, nonce, address(this)))
//! ```
//!
//! # Byte Layout (124 bytes total)
//! - Bytes 0-19:    foreign owner (address)
//! - Bytes 20-39:   foreign token contract (address)
//! - Bytes 40-71:   value (uint256, big-endian)
//! - Bytes 72-103:  receipt id / nonce (uint256, big-endian, left-padded)
//! - Bytes 104-123: Mainnet gateway (address)

use common::{keccak256, ForeignAddress};
use cosmwasm_std::Uint256;

const PAYLOAD_LEN: usize = 20 + 20 + 32 + 32 + 20;

pub fn withdrawal_payload_hash(
    foreign_owner: &ForeignAddress,
    foreign_contract: &ForeignAddress,
    value: Uint256,
    receipt_id: u64,
    mainnet_gateway: &ForeignAddress,
) -> [u8; 32] {
    let mut data = [0u8; PAYLOAD_LEN];

    data[0..20].copy_from_slice(foreign_owner.as_bytes());
    data[20..40].copy_from_slice(foreign_contract.as_bytes());
    data[40..72].copy_from_slice(&value.to_be_bytes());
    // u64 nonce goes into the last 8 bytes of its slot
    data[72 + 24..104].copy_from_slice(&receipt_id.to_be_bytes());
    data[104..124].copy_from_slice(mainnet_gateway.as_bytes());

    keccak256(&data)
}
