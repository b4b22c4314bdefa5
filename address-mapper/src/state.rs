use common::ForeignAddress;
use cosmwasm_std::Addr;
use cw_storage_plus::Map;

pub const CONTRACT_NAME: &str = "crates.io:address-mapper";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Key: 20-byte Mainnet address
pub const LOCAL_BY_FOREIGN: Map<&[u8], Addr> = Map::new("local_by_foreign");

pub const FOREIGN_BY_LOCAL: Map<&Addr, ForeignAddress> = Map::new("foreign_by_local");
