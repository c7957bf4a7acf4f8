use cosmwasm_std::{
    coins, entry_point, to_json_binary, BankMsg, Binary, Deps, DepsMut, Env, MessageInfo,
    Order as StdOrder, OverflowError, OverflowOperation, Response, StdResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;
use cw_storage_plus::Bound;
use dapp_token::msg::{
    AllowanceResponse as TokenAllowanceResponse, BalanceResponse as TokenBalanceResponse,
    ExecuteMsg as TokenExecuteMsg, QueryMsg as TokenQueryMsg,
};
use shared::{calculate_percentage, AssetInfo};

use crate::error::ContractError;
use crate::msg::{
    BalanceResponse, ConfigResponse, ExecuteMsg, FeeAccountResponse, FeePercentResponse,
    InstantiateMsg, OrderCancelledResponse, OrderCountResponse, OrderFilledResponse,
    OrderResponse, OrdersResponse, QueryMsg,
};
use crate::settlement::BalanceSheet;
use crate::state::{
    load_balance, Config, Order, OrderStatus, CONFIG, CREATOR_ORDERS, ORDERS, ORDER_COUNT,
};

const CONTRACT_NAME: &str = "crates.io:exchange";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const MAX_FEE_PERCENT: u64 = 100;
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let fee_account = deps.api.addr_validate(&msg.fee_account)?;
    if msg.fee_percent > MAX_FEE_PERCENT {
        return Err(ContractError::InvalidFeePercent {});
    }
    if msg.native_denom.trim().is_empty() {
        return Err(ContractError::InvalidDenom {});
    }

    let config = Config {
        fee_account,
        fee_percent: msg.fee_percent,
        native_denom: msg.native_denom,
    };
    CONFIG.save(deps.storage, &config)?;
    ORDER_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("fee_account", config.fee_account)
        .add_attribute("fee_percent", config.fee_percent.to_string())
        .add_attribute("native_denom", config.native_denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    // Native currency only enters through an explicit deposit
    if !matches!(msg, ExecuteMsg::DepositNative {}) && !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds {});
    }

    match msg {
        ExecuteMsg::DepositNative {} => execute_deposit_native(deps, info),
        ExecuteMsg::DepositToken { asset, amount } => {
            execute_deposit_token(deps, env, info, asset, amount)
        }
        ExecuteMsg::WithdrawNative { amount } => execute_withdraw_native(deps, info, amount),
        ExecuteMsg::WithdrawToken { asset, amount } => {
            execute_withdraw_token(deps, info, asset, amount)
        }
        ExecuteMsg::MakeOrder {
            asset_get,
            amount_get,
            asset_give,
            amount_give,
        } => execute_make_order(
            deps,
            env,
            info,
            asset_get,
            amount_get,
            asset_give,
            amount_give,
        ),
        ExecuteMsg::CancelOrder { order_id } => execute_cancel_order(deps, env, info, order_id),
        ExecuteMsg::FillOrder { order_id } => execute_fill_order(deps, env, info, order_id),
    }
}

pub fn execute_deposit_native(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    let amount = match info.funds.as_slice() {
        [] => return Err(ContractError::NoFunds {}),
        [coin] if coin.denom == config.native_denom => coin.amount,
        _ => {
            return Err(ContractError::InvalidFunds {
                denom: config.native_denom,
            })
        }
    };

    let asset = AssetInfo::Native;
    let mut sheet = BalanceSheet::new();
    let balance = sheet.credit(deps.storage, &asset, &info.sender, amount)?;
    sheet.commit(deps.storage)?;

    Ok(Response::new()
        .add_attribute("method", "deposit")
        .add_attribute("asset", asset.to_string())
        .add_attribute("user", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("balance", balance))
}

pub fn execute_deposit_token(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: AssetInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let asset = asset.validate(deps.api)?;
    let contract_addr = match &asset {
        AssetInfo::Native => return Err(ContractError::InvalidAsset {}),
        AssetInfo::Token { contract_addr } => contract_addr.clone(),
    };

    // The ledger only reports failure by erroring the whole transaction,
    // so check both preconditions up front to return a typed error
    let allowance: TokenAllowanceResponse = deps.querier.query_wasm_smart(
        &contract_addr,
        &TokenQueryMsg::Allowance {
            owner: info.sender.to_string(),
            spender: env.contract.address.to_string(),
        },
    )?;
    if allowance.allowance < amount {
        return Err(ContractError::TransferRejected {
            reason: "insufficient allowance".to_string(),
        });
    }
    let owned: TokenBalanceResponse = deps.querier.query_wasm_smart(
        &contract_addr,
        &TokenQueryMsg::Balance {
            address: info.sender.to_string(),
        },
    )?;
    if owned.balance < amount {
        return Err(ContractError::TransferRejected {
            reason: "insufficient token balance".to_string(),
        });
    }

    let mut sheet = BalanceSheet::new();
    let balance = sheet.credit(deps.storage, &asset, &info.sender, amount)?;
    sheet.commit(deps.storage)?;

    let transfer = WasmMsg::Execute {
        contract_addr,
        msg: to_json_binary(&TokenExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: env.contract.address.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("method", "deposit")
        .add_attribute("asset", asset.to_string())
        .add_attribute("user", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("balance", balance))
}

pub fn execute_withdraw_native(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let asset = AssetInfo::Native;

    // Debit before releasing funds
    let mut sheet = BalanceSheet::new();
    let balance = sheet.debit(deps.storage, &asset, &info.sender, amount)?;
    sheet.commit(deps.storage)?;

    let mut response = Response::new();
    // The bank module rejects zero-amount coins
    if !amount.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(amount.u128(), config.native_denom),
        });
    }

    Ok(response
        .add_attribute("method", "withdraw")
        .add_attribute("asset", asset.to_string())
        .add_attribute("user", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("balance", balance))
}

pub fn execute_withdraw_token(
    deps: DepsMut,
    info: MessageInfo,
    asset: AssetInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let asset = asset.validate(deps.api)?;
    let contract_addr = match &asset {
        AssetInfo::Native => return Err(ContractError::InvalidAsset {}),
        AssetInfo::Token { contract_addr } => contract_addr.clone(),
    };

    let mut sheet = BalanceSheet::new();
    let balance = sheet.debit(deps.storage, &asset, &info.sender, amount)?;
    sheet.commit(deps.storage)?;

    let transfer = WasmMsg::Execute {
        contract_addr,
        msg: to_json_binary(&TokenExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount,
        })?,
        funds: vec![],
    };

    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("method", "withdraw")
        .add_attribute("asset", asset.to_string())
        .add_attribute("user", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("balance", balance))
}

pub fn execute_make_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset_get: AssetInfo,
    amount_get: Uint128,
    asset_give: AssetInfo,
    amount_give: Uint128,
) -> Result<Response, ContractError> {
    let asset_get = asset_get.validate(deps.api)?;
    let asset_give = asset_give.validate(deps.api)?;

    let order_id = ORDER_COUNT.load(deps.storage)?;
    let next_id = order_id
        .checked_add(1)
        .ok_or_else(|| OverflowError::new(OverflowOperation::Add, order_id, 1))?;
    ORDER_COUNT.save(deps.storage, &next_id)?;

    // Balances are not reserved here, they are checked when the order is filled
    let order = Order {
        id: order_id,
        creator: info.sender.clone(),
        asset_get,
        amount_get,
        asset_give,
        amount_give,
        created_at: env.block.time.seconds(),
        status: OrderStatus::Open,
    };

    ORDERS.save(deps.storage, order_id, &order)?;
    CREATOR_ORDERS.save(deps.storage, (&info.sender, order_id), &())?;

    Ok(Response::new()
        .add_attribute("method", "order")
        .add_attribute("order_id", order_id.to_string())
        .add_attribute("user", info.sender)
        .add_attribute("asset_get", order.asset_get.to_string())
        .add_attribute("amount_get", amount_get)
        .add_attribute("asset_give", order.asset_give.to_string())
        .add_attribute("amount_give", amount_give)
        .add_attribute("timestamp", order.created_at.to_string()))
}

pub fn execute_cancel_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    order_id: u64,
) -> Result<Response, ContractError> {
    ORDERS.update(deps.storage, order_id, |maybe_order| {
        let mut order = maybe_order.ok_or(ContractError::OrderNotFound {})?;

        if !order.is_open() {
            return Err(ContractError::OrderAlreadyFinalized {});
        }

        if info.sender != order.creator {
            return Err(ContractError::Unauthorized {});
        }

        order.status = OrderStatus::Cancelled;
        Ok(order)
    })?;

    Ok(Response::new()
        .add_attribute("method", "cancel")
        .add_attribute("order_id", order_id.to_string())
        .add_attribute("user", info.sender)
        .add_attribute("timestamp", env.block.time.seconds().to_string()))
}

pub fn execute_fill_order(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    order_id: u64,
) -> Result<Response, ContractError> {
    let mut order = ORDERS
        .may_load(deps.storage, order_id)?
        .ok_or(ContractError::OrderNotFound {})?;
    if !order.is_open() {
        return Err(ContractError::OrderAlreadyFinalized {});
    }

    let config = CONFIG.load(deps.storage)?;
    let filler = info.sender;
    let fee = calculate_percentage(order.amount_get, config.fee_percent);

    // Both legs are applied to the sheet first; any shortfall aborts
    // before a single balance is written
    let mut sheet = BalanceSheet::new();
    sheet.debit(
        deps.storage,
        &order.asset_get,
        &filler,
        order.amount_get.checked_add(fee)?,
    )?;
    sheet.credit(deps.storage, &order.asset_get, &order.creator, order.amount_get)?;
    sheet.credit(deps.storage, &order.asset_get, &config.fee_account, fee)?;
    sheet.debit(deps.storage, &order.asset_give, &order.creator, order.amount_give)?;
    sheet.credit(deps.storage, &order.asset_give, &filler, order.amount_give)?;
    sheet.commit(deps.storage)?;

    order.status = OrderStatus::Filled;
    ORDERS.save(deps.storage, order_id, &order)?;

    Ok(Response::new()
        .add_attribute("method", "trade")
        .add_attribute("order_id", order_id.to_string())
        .add_attribute("user", order.creator)
        .add_attribute("asset_get", order.asset_get.to_string())
        .add_attribute("amount_get", order.amount_get)
        .add_attribute("asset_give", order.asset_give.to_string())
        .add_attribute("amount_give", order.amount_give)
        .add_attribute("user_fill", filler)
        .add_attribute("fee", fee)
        .add_attribute("timestamp", env.block.time.seconds().to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::FeeAccount {} => to_json_binary(&query_fee_account(deps)?),
        QueryMsg::FeePercent {} => to_json_binary(&query_fee_percent(deps)?),
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Balance { asset, user } | QueryMsg::Tokens { asset, user } => {
            to_json_binary(&query_balance(deps, asset, user)?)
        }
        QueryMsg::OrderCount {} => to_json_binary(&query_order_count(deps)?),
        QueryMsg::Order { order_id } => to_json_binary(&query_order(deps, order_id)?),
        QueryMsg::OrderFilled { order_id } => to_json_binary(&OrderFilledResponse {
            filled: order_has_status(deps, order_id, OrderStatus::Filled)?,
        }),
        QueryMsg::OrderCancelled { order_id } => to_json_binary(&OrderCancelledResponse {
            cancelled: order_has_status(deps, order_id, OrderStatus::Cancelled)?,
        }),
        QueryMsg::OrdersByCreator {
            creator,
            start_after,
            limit,
        } => to_json_binary(&query_orders_by_creator(deps, creator, start_after, limit)?),
    }
}

fn query_fee_account(deps: Deps) -> StdResult<FeeAccountResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(FeeAccountResponse {
        fee_account: config.fee_account,
    })
}

fn query_fee_percent(deps: Deps) -> StdResult<FeePercentResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(FeePercentResponse {
        fee_percent: config.fee_percent,
    })
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        fee_account: config.fee_account,
        fee_percent: config.fee_percent,
        native_denom: config.native_denom,
    })
}

fn query_balance(deps: Deps, asset: AssetInfo, user: String) -> StdResult<BalanceResponse> {
    let asset = asset.validate(deps.api)?;
    let user = deps.api.addr_validate(&user)?;
    let balance = load_balance(deps.storage, &asset, &user)?;
    Ok(BalanceResponse { balance })
}

fn query_order_count(deps: Deps) -> StdResult<OrderCountResponse> {
    let count = ORDER_COUNT.load(deps.storage)?;
    Ok(OrderCountResponse { count })
}

fn query_order(deps: Deps, order_id: u64) -> StdResult<OrderResponse> {
    let order = ORDERS.load(deps.storage, order_id)?;
    Ok(order_to_response(order))
}

/// Unknown IDs are neither filled nor cancelled
fn order_has_status(deps: Deps, order_id: u64, status: OrderStatus) -> StdResult<bool> {
    let order = ORDERS.may_load(deps.storage, order_id)?;
    Ok(order.is_some_and(|order| order.status == status))
}

fn query_orders_by_creator(
    deps: Deps,
    creator: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<OrdersResponse> {
    let creator_addr = deps.api.addr_validate(&creator)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let orders = CREATOR_ORDERS
        .prefix(&creator_addr)
        .keys(deps.storage, start, None, StdOrder::Ascending)
        .take(limit)
        .map(|item| {
            let order_id = item?;
            let order = ORDERS.load(deps.storage, order_id)?;
            Ok(order_to_response(order))
        })
        .collect::<StdResult<Vec<_>>>()?;

    Ok(OrdersResponse { orders })
}

fn order_to_response(order: Order) -> OrderResponse {
    OrderResponse {
        id: order.id,
        creator: order.creator,
        asset_get: order.asset_get,
        amount_get: order.amount_get,
        asset_give: order.asset_give,
        amount_give: order.amount_give,
        created_at: order.created_at,
        status: order.status,
    }
}
