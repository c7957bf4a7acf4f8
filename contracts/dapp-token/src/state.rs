use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Fixed at instantiation, there is no mint or burn
    pub total_supply: Uint128,
}

pub const TOKEN_INFO: Item<TokenInfo> = Item::new("token_info");

pub const BALANCES: Map<&Addr, Uint128> = Map::new("balances");

/// Allowances keyed by (owner, spender)
pub const ALLOWANCES: Map<(&Addr, &Addr), Uint128> = Map::new("allowances");
