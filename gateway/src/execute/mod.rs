//! Execute handlers for the transfer gateway contract.
//!
//! Handlers are organized by category:
//! - `access` - Oracle, withdrawer and quorum management
//! - `mainnet_events` - Ingestion of Mainnet event batches
//! - `contract_mapping` - Proposal, attestation and owner-authorized mappings
//! - `reclaim` - Delivery of parked deposits
//! - `withdrawal` - Withdrawal receipts and their oracle confirmation

mod access;
mod contract_mapping;
mod mainnet_events;
mod reclaim;
mod withdrawal;

pub use access::*;
pub use contract_mapping::*;
pub use mainnet_events::*;
pub use reclaim::*;
pub use withdrawal::*;
