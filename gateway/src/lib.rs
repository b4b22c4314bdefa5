//! Transfer Gateway Contract - Mainnet ↔ Local Token Gateway
//!
//! Oracles relay Mainnet gateway events into this contract; users prove who
//! they are through the address mapper and move tokens between the chains.
//!
//! # Deposit Flow (Mainnet → Local)
//! 1. User deposits an ERC721 token into the Mainnet gateway
//! 2. An oracle submits the deposit in a `ProcessEventBatch`
//! 3. If the token contract is mapped and the depositor has an identity
//!    mapping, the local token contract transfers the token to the user
//! 4. Otherwise the deposit is parked until `ReclaimTokens` can deliver it
//!
//! # Withdrawal Flow (Local → Mainnet)
//! 1. User sends the local token to the gateway with `WithdrawToMainnet`
//! 2. Oracles sign the receipt's payload hash until the quorum is reached
//! 3. The user redeems the confirmed receipt on Mainnet
//! 4. The Mainnet withdrawal event clears the receipt
//!
//! # Contract Mappings
//! - Anyone holding the foreign contract creator's signature may propose a
//!   mapping, which claims both addresses while pending
//! - Oracles attest the creator on Mainnet to confirm or reject it

pub mod address_mapper;
mod auth;
pub mod contract;
pub mod error;
mod execute;
pub mod hash;
pub mod msg;
mod query;
pub mod registry;
pub mod state;

pub use crate::error::ContractError;
pub use crate::hash::withdrawal_payload_hash;
