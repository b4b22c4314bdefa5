//! Shared cw-multi-test setup for the gateway integration tests.

#![allow(dead_code)]

pub mod mock_nft;

use cosmwasm_std::{to_json_binary, Addr, Binary, Empty, Uint256};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use common::testing::TestSigner;
use common::{ForeignAddress, SignatureScheme};
use gateway::msg::{
    ExecuteMsg, InstantiateMsg, MainnetEvent, MainnetPayload, MainnetTokenDeposited,
    MainnetTokenWithdrawn, OracleConfig, QueryMsg, ReceiveMsg, StateResponse,
    UnclaimedTokensResponse, WithdrawalReceiptResponse,
};
use gateway::state::TokenKind;

/// Mainnet gateway bound into every withdrawal payload
pub const MAINNET_GATEWAY: ForeignAddress = ForeignAddress::new([0xee; 20]);

/// Mainnet NFT contract mirrored by the mock local NFT contract
pub const FOREIGN_NFT: ForeignAddress = ForeignAddress::new([0xaa; 20]);

/// Seed of the key that deployed `FOREIGN_NFT`
pub const CREATOR_SEED: u8 = 50;

pub fn contract_gateway() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        gateway::contract::execute,
        gateway::contract::instantiate,
        gateway::contract::query,
    );
    Box::new(contract)
}

pub fn contract_mapper() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        address_mapper::contract::execute,
        address_mapper::contract::instantiate,
        address_mapper::contract::query,
    );
    Box::new(contract)
}

pub struct Oracle {
    pub addr: Addr,
    pub signer: TestSigner,
}

pub struct Suite {
    pub app: App,
    pub owner: Addr,
    pub gateway: Addr,
    pub mapper: Addr,
    pub nft: Addr,
    pub oracles: Vec<Oracle>,
}

impl Suite {
    /// One oracle, quorum of one
    pub fn new() -> Self {
        Self::with_oracles(1, 1)
    }

    pub fn with_oracles(count: u8, quorum: u32) -> Self {
        let mut app = App::default();
        let owner = Addr::unchecked("terra1owner");

        let oracles: Vec<Oracle> = (0..count)
            .map(|i| Oracle {
                addr: Addr::unchecked(format!("terra1oracle{}", i)),
                signer: TestSigner::new(100 + i),
            })
            .collect();

        let mapper_code = app.store_code(contract_mapper());
        let mapper = app
            .instantiate_contract(
                mapper_code,
                owner.clone(),
                &address_mapper::msg::InstantiateMsg {},
                &[],
                "address-mapper",
                None,
            )
            .unwrap();

        let gateway_code = app.store_code(contract_gateway());
        let gateway = app
            .instantiate_contract(
                gateway_code,
                owner.clone(),
                &InstantiateMsg {
                    owner: owner.to_string(),
                    oracles: oracles
                        .iter()
                        .map(|o| OracleConfig {
                            address: o.addr.to_string(),
                            signer: o.signer.address().to_hex(),
                        })
                        .collect(),
                    address_mapper: mapper.to_string(),
                    mainnet_gateway: MAINNET_GATEWAY.to_hex(),
                    withdrawal_quorum: quorum,
                    last_mainnet_block_num: None,
                },
                &[],
                "transfer-gateway",
                Some(owner.to_string()),
            )
            .unwrap();

        let nft_code = app.store_code(mock_nft::contract());
        let nft = app
            .instantiate_contract(
                nft_code,
                owner.clone(),
                &mock_nft::InstantiateMsg {
                    gateway: gateway.to_string(),
                },
                &[],
                "local-nft",
                None,
            )
            .unwrap();

        Self {
            app,
            owner,
            gateway,
            mapper,
            nft,
            oracles,
        }
    }

    pub fn oracle(&self) -> Addr {
        self.oracles[0].addr.clone()
    }

    // ========================================================================
    // Execute helpers
    // ========================================================================

    pub fn execute(&mut self, sender: &Addr, msg: &ExecuteMsg) -> anyhow::Result<AppResponse> {
        self.app
            .execute_contract(sender.clone(), self.gateway.clone(), msg, &[])
    }

    pub fn process(&mut self, events: Vec<MainnetEvent>) -> anyhow::Result<AppResponse> {
        let oracle = self.oracle();
        self.execute(&oracle, &ExecuteMsg::ProcessEventBatch { events })
    }

    /// Bind `local` to the Mainnet identity of `signer`
    pub fn map_identity(&mut self, local: &Addr, signer: &TestSigner) {
        self.app
            .execute_contract(
                local.clone(),
                self.mapper.clone(),
                &address_mapper::msg::ExecuteMsg::AddIdentityMapping {
                    foreign: signer.address().to_hex(),
                    local: local.to_string(),
                    signature: signer.sign_mapping(local.as_str()),
                },
                &[],
            )
            .unwrap();
    }

    /// Owner-authorized `FOREIGN_NFT` ↔ mock NFT mapping
    pub fn map_nft_contract(&mut self) {
        let owner = self.owner.clone();
        let msg = ExecuteMsg::AddAuthorizedContractMapping {
            foreign_contract: FOREIGN_NFT.to_hex(),
            local_contract: self.nft.to_string(),
        };
        self.execute(&owner, &msg).unwrap();
    }

    /// Propose `FOREIGN_NFT` ↔ mock NFT, signed by the contract creator
    pub fn propose_nft_mapping(&mut self, proposer: &Addr) -> anyhow::Result<AppResponse> {
        let creator = TestSigner::new(CREATOR_SEED);
        let msg = ExecuteMsg::ProposeContractMapping {
            foreign_contract: FOREIGN_NFT.to_hex(),
            local_contract: self.nft.to_string(),
            foreign_contract_creator_sig: creator
                .sign_contract_mapping(&FOREIGN_NFT, self.nft.as_str()),
            foreign_contract_tx_hash: Binary::from(vec![0x7a; 32]),
        };
        self.execute(proposer, &msg)
    }

    /// Local user hands `token_id` to the gateway for withdrawal
    pub fn withdraw_to_mainnet(
        &mut self,
        holder: &Addr,
        token_id: u64,
    ) -> anyhow::Result<AppResponse> {
        self.app.execute_contract(
            holder.clone(),
            self.nft.clone(),
            &mock_nft::ExecuteMsg::SendToken {
                contract: self.gateway.to_string(),
                token_id: Uint256::from(token_id),
                msg: to_json_binary(&ReceiveMsg::WithdrawToMainnet {}).unwrap(),
            },
            &[],
        )
    }

    /// Oracle `index` signs receipt `receipt_id` with its registered key
    pub fn confirm(&mut self, index: usize, receipt_id: u64) -> anyhow::Result<AppResponse> {
        let receipt = self.receipt(receipt_id);
        let hash: [u8; 32] = receipt.payload_hash.to_array().unwrap();
        let signature = self.oracles[index].signer.sign(SignatureScheme::Eip712, &hash);
        let oracle = self.oracles[index].addr.clone();
        self.execute(
            &oracle,
            &ExecuteMsg::ConfirmWithdrawalReceipt {
                receipt_id,
                signature,
            },
        )
    }

    pub fn mint_local(&mut self, token_id: u64, owner: &Addr) {
        self.app
            .execute_contract(
                self.owner.clone(),
                self.nft.clone(),
                &mock_nft::ExecuteMsg::Mint {
                    token_id: Uint256::from(token_id),
                    owner: owner.to_string(),
                },
                &[],
            )
            .unwrap();
    }

    pub fn freeze_nft(&mut self, frozen: bool) {
        self.app
            .execute_contract(
                self.owner.clone(),
                self.nft.clone(),
                &mock_nft::ExecuteMsg::SetFrozen { frozen },
                &[],
            )
            .unwrap();
    }

    // ========================================================================
    // Query helpers
    // ========================================================================

    pub fn state(&self) -> StateResponse {
        self.app
            .wrap()
            .query_wasm_smart(&self.gateway, &QueryMsg::State {})
            .unwrap()
    }

    pub fn unclaimed(&self, owner: &ForeignAddress) -> UnclaimedTokensResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &self.gateway,
                &QueryMsg::UnclaimedTokens {
                    owner: owner.to_hex(),
                },
            )
            .unwrap()
    }

    pub fn receipt(&self, receipt_id: u64) -> WithdrawalReceiptResponse {
        self.app
            .wrap()
            .query_wasm_smart(&self.gateway, &QueryMsg::WithdrawalReceipt { receipt_id })
            .unwrap()
    }

    pub fn nft_owner(&self, token_id: u64) -> Option<Addr> {
        let res: mock_nft::OwnerOfResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                &self.nft,
                &mock_nft::QueryMsg::OwnerOf {
                    token_id: Uint256::from(token_id),
                },
            )
            .unwrap();
        res.owner
    }
}

// ============================================================================
// Event builders
// ============================================================================

pub fn deposit(eth_block: u64, owner: &ForeignAddress, token_id: u64) -> MainnetEvent {
    deposit_of(eth_block, owner, &FOREIGN_NFT, TokenKind::Erc721, token_id)
}

pub fn deposit_of(
    eth_block: u64,
    owner: &ForeignAddress,
    contract: &ForeignAddress,
    kind: TokenKind,
    value: u64,
) -> MainnetEvent {
    MainnetEvent {
        eth_block,
        payload: MainnetPayload::Deposit(MainnetTokenDeposited {
            token_kind: kind,
            token_contract: contract.to_hex(),
            token_owner: owner.to_hex(),
            value: Uint256::from(value),
        }),
    }
}

pub fn withdrawal(
    eth_block: u64,
    owner: &ForeignAddress,
    token_id: u64,
    receipt_id: u64,
) -> MainnetEvent {
    MainnetEvent {
        eth_block,
        payload: MainnetPayload::Withdrawal(MainnetTokenWithdrawn {
            token_kind: TokenKind::Erc721,
            token_contract: FOREIGN_NFT.to_hex(),
            token_owner: owner.to_hex(),
            value: Uint256::from(token_id),
            receipt_id,
        }),
    }
}

/// Root cause of a failed execution, as displayed
pub fn err_string(err: anyhow::Error) -> String {
    err.root_cause().to_string()
}
