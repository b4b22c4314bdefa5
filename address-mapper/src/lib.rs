//! Address Mapper Contract - Mainnet ↔ Local Identity Registry
//!
//! A local account binds itself to a Mainnet account by presenting a typed
//! signature from the Mainnet key over `keccak256(foreign ‖ local)`. Each
//! side can be bound at most once. The gateway resolves identities through
//! the queries in [`common::mapper`].

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
