//! Error types for the transfer gateway contract
//!
//! Every variant aborts the whole entry point; the host rolls back any state
//! written before the error was returned.

use common::{AddressError, SignatureError};
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized: only the owner can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only an oracle can perform this action")]
    UnauthorizedOracle,

    #[error("Unauthorized: caller is not an authorized token withdrawer")]
    UnauthorizedWithdrawer,

    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Event batch is empty")]
    EmptyEventBatch,

    #[error("Invalid event batch: block {block} is below previously seen block {last_seen}")]
    InvalidEventBatch { block: u64, last_seen: u64 },

    #[error("No new events in batch: all blocks up to {last_block} have been processed")]
    NoNewEvents { last_block: u64 },

    #[error("Unsupported token kind: {kind}")]
    UnsupportedTokenKind { kind: String },

    #[error("Invalid Mainnet address: {0}")]
    InvalidForeignAddress(#[from] AddressError),

    #[error("Invalid withdrawal quorum: must be at least 1")]
    InvalidQuorum,

    #[error("Invalid receive message: {reason}")]
    InvalidReceiveMsg { reason: String },

    // ========================================================================
    // Conflict Errors
    // ========================================================================

    #[error("Contract mapping already exists")]
    ContractMappingExists,

    #[error("Oracle already registered")]
    OracleAlreadyRegistered,

    #[error("Account already has a pending withdrawal: receipt {receipt_id}")]
    PendingWithdrawalExists { receipt_id: u64 },

    // ========================================================================
    // Not Found Errors
    // ========================================================================

    #[error("Contract mapping not found: {contract}")]
    ContractMappingNotFound { contract: String },

    #[error("Identity not mapped: {account}")]
    IdentityNotMapped { account: String },

    #[error("Withdrawal receipt not found: {receipt_id}")]
    WithdrawalReceiptNotFound { receipt_id: u64 },

    // ========================================================================
    // Signature Errors
    // ========================================================================

    #[error("Invalid signature: {0}")]
    InvalidSignature(#[from] SignatureError),

    // ========================================================================
    // Dependency Errors
    // ========================================================================

    #[error("Address mapper query failed: {reason}")]
    AddressMapperUnavailable { reason: String },
}
