use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use shared::AssetInfo;

use crate::state::OrderStatus;

#[cw_serde]
pub struct InstantiateMsg {
    pub fee_account: String,
    /// Out of 100
    pub fee_percent: u64,
    pub native_denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deposit the attached native coin
    DepositNative {},
    /// Deposit tokens previously approved for this contract
    DepositToken { asset: AssetInfo, amount: Uint128 },
    /// Withdraw native currency to the sender
    WithdrawNative { amount: Uint128 },
    /// Withdraw tokens to the sender
    WithdrawToken { asset: AssetInfo, amount: Uint128 },
    /// Offer `amount_give` of `asset_give` for `amount_get` of `asset_get`
    MakeOrder {
        asset_get: AssetInfo,
        amount_get: Uint128,
        asset_give: AssetInfo,
        amount_give: Uint128,
    },
    /// Cancel an open order (creator only)
    CancelOrder { order_id: u64 },
    /// Fill an open order in full, paying the fee on top
    FillOrder { order_id: u64 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(FeeAccountResponse)]
    FeeAccount {},

    #[returns(FeePercentResponse)]
    FeePercent {},

    #[returns(ConfigResponse)]
    Config {},

    /// Custodied balance of `user`
    #[returns(BalanceResponse)]
    Balance { asset: AssetInfo, user: String },

    /// Same as `Balance`
    #[returns(BalanceResponse)]
    Tokens { asset: AssetInfo, user: String },

    #[returns(OrderCountResponse)]
    OrderCount {},

    #[returns(OrderResponse)]
    Order { order_id: u64 },

    #[returns(OrderFilledResponse)]
    OrderFilled { order_id: u64 },

    #[returns(OrderCancelledResponse)]
    OrderCancelled { order_id: u64 },

    /// Get orders by creator
    #[returns(OrdersResponse)]
    OrdersByCreator {
        creator: String,
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

// Response types

#[cw_serde]
pub struct FeeAccountResponse {
    pub fee_account: Addr,
}

#[cw_serde]
pub struct FeePercentResponse {
    pub fee_percent: u64,
}

#[cw_serde]
pub struct ConfigResponse {
    pub fee_account: Addr,
    pub fee_percent: u64,
    pub native_denom: String,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct OrderCountResponse {
    pub count: u64,
}

#[cw_serde]
pub struct OrderResponse {
    pub id: u64,
    pub creator: Addr,
    pub asset_get: AssetInfo,
    pub amount_get: Uint128,
    pub asset_give: AssetInfo,
    pub amount_give: Uint128,
    pub created_at: u64,
    pub status: OrderStatus,
}

#[cw_serde]
pub struct OrderFilledResponse {
    pub filled: bool,
}

#[cw_serde]
pub struct OrderCancelledResponse {
    pub cancelled: bool,
}

#[cw_serde]
pub struct OrdersResponse {
    pub orders: Vec<OrderResponse>,
}
