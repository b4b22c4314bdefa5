//! State definitions for the transfer gateway contract
//!
//! The gateway's singleton state lives in [`STATE`]; everything else is keyed
//! storage owned exclusively by the gateway.

use common::ForeignAddress;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Binary, Uint256};
use cw_storage_plus::{Item, Map};

// ============================================================================
// Core State
// ============================================================================

/// Gateway singleton state
#[cw_serde]
pub struct GatewayState {
    /// Owner, manages oracles, withdrawers and authorized mappings
    pub owner: Addr,
    /// Highest Mainnet block whose events have been fully applied
    pub last_mainnet_block_num: u64,
    /// Distinct oracle signatures needed to confirm a withdrawal receipt
    pub withdrawal_quorum: u32,
    /// Contract resolving Mainnet ↔ local identities
    pub address_mapper: Addr,
    /// Gateway contract on Mainnet that redeems confirmed receipts
    pub mainnet_gateway: ForeignAddress,
    /// Next contract mapping identifier
    pub next_contract_mapping_id: u64,
    /// Next withdrawal receipt identifier (also the Mainnet withdrawal nonce)
    pub next_withdrawal_receipt_id: u64,
}

/// Registered oracle
#[cw_serde]
pub struct OracleInfo {
    /// Mainnet key the oracle signs withdrawal receipts with
    pub signer: ForeignAddress,
}

/// Asset class of a Mainnet token contract
#[cw_serde]
#[derive(Copy, Eq)]
pub enum TokenKind {
    Erc721,
    Erc20,
    Eth,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Erc721 => write!(f, "erc721"),
            TokenKind::Erc20 => write!(f, "erc20"),
            TokenKind::Eth => write!(f, "eth"),
        }
    }
}

// ============================================================================
// Contract Mappings
// ============================================================================

#[cw_serde]
#[derive(Copy, Eq)]
pub enum MappingStatus {
    /// Proposed, waiting for an oracle to attest the contract creator
    Pending,
    /// Usable for routing deposits and withdrawals
    Confirmed,
}

/// Binding between a Mainnet token contract and its local counterpart.
///
/// Both addresses are claimed (see [`FOREIGN_CONTRACT_IDS`] and
/// [`LOCAL_CONTRACT_IDS`]) for as long as the mapping exists, pending or not.
#[cw_serde]
pub struct ContractMapping {
    pub id: u64,
    pub foreign_contract: ForeignAddress,
    pub local_contract: Addr,
    /// Creator recovered from `creator_signature`, `None` for owner-authorized mappings
    pub creator: Option<ForeignAddress>,
    pub creator_signature: Binary,
    /// Mainnet transaction that deployed the foreign contract
    pub foreign_tx_hash: Binary,
    pub status: MappingStatus,
}

// ============================================================================
// Unclaimed Deposits
// ============================================================================

/// Deposits of one Mainnet contract by one depositor that could not be routed
#[cw_serde]
pub struct UnclaimedToken {
    pub token_contract: ForeignAddress,
    pub token_kind: TokenKind,
    /// Values in deposit order
    pub values: Vec<Uint256>,
}

// ============================================================================
// Withdrawal Receipts
// ============================================================================

#[cw_serde]
#[derive(Copy, Eq)]
pub enum ReceiptStatus {
    Pending,
    Confirmed,
}

#[cw_serde]
pub struct OracleSignature {
    pub oracle: Addr,
    pub signature: Binary,
}

/// A token handed to the gateway for withdrawal to Mainnet
#[cw_serde]
pub struct WithdrawalReceipt {
    pub id: u64,
    /// Local account that handed the token over
    pub token_owner: Addr,
    /// Mainnet account receiving the token
    pub foreign_owner: ForeignAddress,
    pub local_contract: Addr,
    pub foreign_contract: ForeignAddress,
    pub token_kind: TokenKind,
    pub value: Uint256,
    /// Digest every oracle signs, see [`crate::hash::withdrawal_payload_hash`]
    pub payload_hash: Binary,
    /// One entry per distinct oracle, in submission order
    pub signatures: Vec<OracleSignature>,
    pub status: ReceiptStatus,
}

// ============================================================================
// Constants
// ============================================================================

/// Contract name for cw2 migration info
pub const CONTRACT_NAME: &str = "crates.io:transfer-gateway";

/// Contract version for cw2 migration info
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Storage
// ============================================================================

pub const STATE: Item<GatewayState> = Item::new("state");

/// Key: oracle address
pub const ORACLES: Map<&Addr, OracleInfo> = Map::new("oracles");

/// Key: withdrawer address, Value: whether active
pub const TOKEN_WITHDRAWERS: Map<&Addr, bool> = Map::new("token_withdrawers");

/// Key: mapping id
pub const CONTRACT_MAPPINGS: Map<u64, ContractMapping> = Map::new("contract_mappings");

/// Claim on a Mainnet contract address. Key: 20-byte address, Value: mapping id
pub const FOREIGN_CONTRACT_IDS: Map<&[u8], u64> = Map::new("foreign_contract_ids");

/// Claim on a local contract address. Key: local address, Value: mapping id
pub const LOCAL_CONTRACT_IDS: Map<&Addr, u64> = Map::new("local_contract_ids");

/// Key: (depositor 20 bytes, token contract 20 bytes)
pub const UNCLAIMED_TOKENS: Map<(&[u8], &[u8]), UnclaimedToken> = Map::new("unclaimed_tokens");

/// Depositors with parked values per contract, mirrors [`UNCLAIMED_TOKENS`].
/// Key: (token contract 20 bytes, depositor 20 bytes)
pub const UNCLAIMED_DEPOSITORS: Map<(&[u8], &[u8]), bool> = Map::new("unclaimed_depositors");

/// Key: receipt id
pub const WITHDRAWAL_RECEIPTS: Map<u64, WithdrawalReceipt> = Map::new("withdrawal_receipts");

/// Outstanding receipt per local token owner. Key: owner, Value: receipt id
pub const RECEIPT_BY_OWNER: Map<&Addr, u64> = Map::new("receipt_by_owner");
