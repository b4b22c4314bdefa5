//! Message types for the transfer gateway contract.

use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint256};

use common::token::TokenReceiveMsg;

use crate::state::{MappingStatus, ReceiptStatus, TokenKind};

// ============================================================================
// Instantiate
// ============================================================================

#[cw_serde]
pub struct InstantiateMsg {
    /// Owner address (manages oracles, withdrawers and authorized mappings)
    pub owner: String,
    /// Initial oracle set
    pub oracles: Vec<OracleConfig>,
    /// Address mapper contract resolving identities
    pub address_mapper: String,
    /// Mainnet gateway contract address (0x-prefixed hex)
    pub mainnet_gateway: String,
    /// Oracle signatures required to confirm a withdrawal receipt
    pub withdrawal_quorum: u32,
    /// Highest Mainnet block already accounted for, defaults to 0
    pub last_mainnet_block_num: Option<u64>,
}

#[cw_serde]
pub struct OracleConfig {
    /// Local address the oracle submits transactions from
    pub address: String,
    /// Mainnet address of the oracle's signing key (0x-prefixed hex)
    pub signer: String,
}

// ============================================================================
// Execute
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Access Control (owner only)
    // ========================================================================
    /// Register an oracle and its withdrawal signing key
    AddOracle { oracle: String, signer: String },

    /// Deregister an oracle, removing a non-member is a no-op
    RemoveOracle { oracle: String },

    AddTokenWithdrawer { withdrawer: String },

    RemoveTokenWithdrawer { withdrawer: String },

    /// Set the number of oracle signatures a withdrawal receipt needs
    UpdateWithdrawalQuorum { quorum: u32 },

    // ========================================================================
    // Event Ingestion (oracle only)
    // ========================================================================
    /// Apply Mainnet events in block order
    ProcessEventBatch { events: Vec<MainnetEvent> },

    // ========================================================================
    // Contract Mappings
    // ========================================================================
    /// Propose binding a Mainnet token contract to a local token contract.
    ///
    /// `foreign_contract_creator_sig` is a typed signature by the key that
    /// deployed `foreign_contract`, over
    /// `keccak256(foreign_contract ‖ local_contract)`.
    ProposeContractMapping {
        foreign_contract: String,
        local_contract: String,
        foreign_contract_creator_sig: Binary,
        foreign_contract_tx_hash: Binary,
    },

    /// Oracle attestations of who created proposed foreign contracts
    VerifyContractCreators {
        creators: Vec<VerifiedContractCreator>,
    },

    /// Owner shortcut creating a confirmed mapping without attestation
    AddAuthorizedContractMapping {
        foreign_contract: String,
        local_contract: String,
    },

    // ========================================================================
    // Reclaim
    // ========================================================================
    /// Transfer the caller's parked deposits whose contracts are now mapped
    ReclaimTokens {},

    /// Owner sweep of parked deposits of one contract for all mapped depositors
    ReclaimContractTokens { foreign_contract: String },

    // ========================================================================
    // Withdrawals
    // ========================================================================
    /// Receive hook called by local token contracts
    ReceiveToken(TokenReceiveMsg),

    /// Oracle signature over a withdrawal receipt's payload hash
    ConfirmWithdrawalReceipt { receipt_id: u64, signature: Binary },
}

/// Payload of [`ExecuteMsg::ReceiveToken`]
#[cw_serde]
pub enum ReceiveMsg {
    /// Withdraw the received token to the sender's Mainnet identity
    WithdrawToMainnet {},
}

/// A Mainnet event relayed by an oracle
#[cw_serde]
pub struct MainnetEvent {
    pub eth_block: u64,
    pub payload: MainnetPayload,
}

#[cw_serde]
pub enum MainnetPayload {
    /// Tokens were deposited into the Mainnet gateway
    Deposit(MainnetTokenDeposited),
    /// A withdrawal receipt was redeemed on Mainnet
    Withdrawal(MainnetTokenWithdrawn),
}

#[cw_serde]
pub struct MainnetTokenDeposited {
    pub token_kind: TokenKind,
    /// Mainnet token contract (0x-prefixed hex)
    pub token_contract: String,
    /// Mainnet depositor (0x-prefixed hex)
    pub token_owner: String,
    /// Token id for ERC721, amount otherwise
    pub value: Uint256,
}

#[cw_serde]
pub struct MainnetTokenWithdrawn {
    pub token_kind: TokenKind,
    pub token_contract: String,
    pub token_owner: String,
    pub value: Uint256,
    pub receipt_id: u64,
}

#[cw_serde]
pub struct VerifiedContractCreator {
    pub contract_mapping_id: u64,
    /// Creator observed on Mainnet (0x-prefixed hex)
    pub creator: String,
    /// Contract observed on Mainnet (0x-prefixed hex)
    pub contract: String,
}

#[cw_serde]
pub struct MigrateMsg {}

// ============================================================================
// Query
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(StateResponse)]
    State {},

    #[returns(OraclesResponse)]
    Oracles {},

    #[returns(TokenWithdrawersResponse)]
    TokenWithdrawers {},

    /// Parked deposits of a Mainnet depositor
    #[returns(UnclaimedTokensResponse)]
    UnclaimedTokens { owner: String },

    /// Pending contract mappings awaiting creator attestation
    #[returns(UnverifiedContractCreatorsResponse)]
    UnverifiedContractCreators {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    /// Local contract confirmed for a Mainnet contract
    #[returns(ContractMappingResponse)]
    LocalContract { foreign_contract: String },

    /// Mainnet contract confirmed for a local contract
    #[returns(ContractMappingResponse)]
    ForeignContract { local_contract: String },

    #[returns(WithdrawalReceiptResponse)]
    WithdrawalReceipt { receipt_id: u64 },

    /// Receipts still waiting for oracle quorum
    #[returns(WithdrawalReceiptsResponse)]
    PendingWithdrawalReceipts {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

// ============================================================================
// Query Responses
// ============================================================================

#[cw_serde]
pub struct StateResponse {
    pub owner: Addr,
    pub last_mainnet_block_num: u64,
    pub withdrawal_quorum: u32,
    pub address_mapper: Addr,
    pub mainnet_gateway: String,
    pub oracle_count: u32,
}

#[cw_serde]
pub struct OracleResponse {
    pub oracle: Addr,
    pub signer: String,
}

#[cw_serde]
pub struct OraclesResponse {
    pub oracles: Vec<OracleResponse>,
}

#[cw_serde]
pub struct TokenWithdrawersResponse {
    pub withdrawers: Vec<Addr>,
}

#[cw_serde]
pub struct UnclaimedTokenEntry {
    pub token_contract: String,
    pub token_kind: TokenKind,
    pub values: Vec<Uint256>,
}

#[cw_serde]
pub struct UnclaimedTokensResponse {
    pub owner: String,
    pub tokens: Vec<UnclaimedTokenEntry>,
}

#[cw_serde]
pub struct UnverifiedContractCreator {
    pub contract_mapping_id: u64,
    pub foreign_contract: String,
    pub local_contract: Addr,
    pub foreign_contract_tx_hash: Binary,
}

#[cw_serde]
pub struct UnverifiedContractCreatorsResponse {
    pub creators: Vec<UnverifiedContractCreator>,
}

#[cw_serde]
pub struct ContractMappingResponse {
    pub contract_mapping_id: u64,
    pub foreign_contract: String,
    pub local_contract: Addr,
    pub status: MappingStatus,
}

#[cw_serde]
pub struct WithdrawalReceiptResponse {
    pub receipt_id: u64,
    pub token_owner: Addr,
    pub foreign_owner: String,
    pub local_contract: Addr,
    pub foreign_contract: String,
    pub token_kind: TokenKind,
    pub value: Uint256,
    pub payload_hash: Binary,
    /// Oracles that signed, in submission order
    pub signers: Vec<Addr>,
    pub signatures: Vec<Binary>,
    pub status: ReceiptStatus,
}

#[cw_serde]
pub struct WithdrawalReceiptsResponse {
    pub receipts: Vec<WithdrawalReceiptResponse>,
}
