use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};
use shared::AssetInfo;

#[cw_serde]
pub struct Config {
    /// Account credited with the taker fee
    pub fee_account: Addr,
    /// Fee out of 100, charged on the amount the filler gives up
    pub fee_percent: u64,
    /// Bank denomination treated as `AssetInfo::Native`
    pub native_denom: String,
}

#[cw_serde]
pub enum OrderStatus {
    Open,
    Filled,
    Cancelled,
}

#[cw_serde]
pub struct Order {
    /// Sequential ID, starting at 0
    pub id: u64,
    /// Order creator
    pub creator: Addr,
    /// Asset the creator wants to receive
    pub asset_get: AssetInfo,
    pub amount_get: Uint128,
    /// Asset the creator gives up
    pub asset_give: AssetInfo,
    pub amount_give: Uint128,
    /// Created timestamp
    pub created_at: u64,
    /// Status
    pub status: OrderStatus,
}

impl Order {
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Number of orders ever created, also the next order ID
pub const ORDER_COUNT: Item<u64> = Item::new("order_count");

/// Orders indexed by ID, never removed
pub const ORDERS: Map<u64, Order> = Map::new("orders");

/// Orders by creator (for queries)
pub const CREATOR_ORDERS: Map<(&Addr, u64), ()> = Map::new("creator_orders");

/// Custodied balances keyed by (asset storage key, user)
pub const TOKENS: Map<(&str, &Addr), Uint128> = Map::new("tokens");

pub fn load_balance(storage: &dyn Storage, asset: &AssetInfo, user: &Addr) -> StdResult<Uint128> {
    Ok(TOKENS
        .may_load(storage, (asset.storage_key().as_str(), user))?
        .unwrap_or_default())
}
