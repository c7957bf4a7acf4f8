use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response,
    StdResult, Storage, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{
    AllowanceResponse, BalanceResponse, ExecuteMsg, InstantiateMsg, QueryMsg, TokenInfoResponse,
};
use crate::state::{TokenInfo, ALLOWANCES, BALANCES, TOKEN_INFO};

const CONTRACT_NAME: &str = "crates.io:dapp-token";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_NAME: &str = "DApp Token";
const DEFAULT_SYMBOL: &str = "DAPP";
const DEFAULT_DECIMALS: u8 = 18;
const DEFAULT_WHOLE_SUPPLY: u128 = 1_000_000;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let decimals = msg.decimals.unwrap_or(DEFAULT_DECIMALS);
    let total_supply = match msg.total_supply {
        Some(supply) => supply,
        None => Uint128::new(DEFAULT_WHOLE_SUPPLY)
            .checked_mul(Uint128::new(10u128).checked_pow(decimals.into())?)?,
    };

    let token_info = TokenInfo {
        name: msg.name.unwrap_or_else(|| DEFAULT_NAME.to_string()),
        symbol: msg.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
        decimals,
        total_supply,
    };
    TOKEN_INFO.save(deps.storage, &token_info)?;
    BALANCES.save(deps.storage, &info.sender, &total_supply)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("name", token_info.name)
        .add_attribute("symbol", token_info.symbol)
        .add_attribute("decimals", decimals.to_string())
        .add_attribute("total_supply", total_supply)
        .add_attribute("owner", info.sender))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    if !info.funds.is_empty() {
        return Err(ContractError::UnexpectedFunds {});
    }

    match msg {
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, info, recipient, amount)
        }
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => execute_transfer_from(deps, info, owner, recipient, amount),
        ExecuteMsg::Approve { spender, amount } => execute_approve(deps, info, spender, amount),
    }
}

fn validate_addr(deps: Deps, addr: &str) -> Result<Addr, ContractError> {
    if addr.trim().is_empty() {
        return Err(ContractError::InvalidAddress {});
    }
    Ok(deps.api.addr_validate(addr)?)
}

fn move_balance(
    storage: &mut dyn Storage,
    from: &Addr,
    to: &Addr,
    amount: Uint128,
) -> Result<(), ContractError> {
    let from_balance = BALANCES.may_load(storage, from)?.unwrap_or_default();
    if from_balance < amount {
        return Err(ContractError::InsufficientBalance {});
    }
    BALANCES.save(storage, from, &(from_balance - amount))?;

    let to_balance = BALANCES.may_load(storage, to)?.unwrap_or_default();
    BALANCES.save(storage, to, &to_balance.checked_add(amount)?)?;
    Ok(())
}

pub fn execute_transfer(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let recipient_addr = validate_addr(deps.as_ref(), &recipient)?;

    move_balance(deps.storage, &info.sender, &recipient_addr, amount)?;

    Ok(Response::new()
        .add_attribute("method", "transfer")
        .add_attribute("from", info.sender)
        .add_attribute("to", recipient_addr)
        .add_attribute("amount", amount))
}

pub fn execute_transfer_from(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let owner_addr = validate_addr(deps.as_ref(), &owner)?;
    let recipient_addr = validate_addr(deps.as_ref(), &recipient)?;

    let allowance = ALLOWANCES
        .may_load(deps.storage, (&owner_addr, &info.sender))?
        .unwrap_or_default();
    if allowance < amount {
        return Err(ContractError::InsufficientAllowance {});
    }

    // Balance check happens before the allowance is touched
    move_balance(deps.storage, &owner_addr, &recipient_addr, amount)?;
    ALLOWANCES.save(
        deps.storage,
        (&owner_addr, &info.sender),
        &(allowance - amount),
    )?;

    Ok(Response::new()
        .add_attribute("method", "transfer_from")
        .add_attribute("from", owner_addr)
        .add_attribute("to", recipient_addr)
        .add_attribute("by", info.sender)
        .add_attribute("amount", amount))
}

pub fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let spender_addr = validate_addr(deps.as_ref(), &spender)?;

    ALLOWANCES.save(deps.storage, (&info.sender, &spender_addr), &amount)?;

    Ok(Response::new()
        .add_attribute("method", "approve")
        .add_attribute("owner", info.sender)
        .add_attribute("spender", spender_addr)
        .add_attribute("amount", amount))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::TokenInfo {} => to_json_binary(&query_token_info(deps)?),
        QueryMsg::Balance { address } => to_json_binary(&query_balance(deps, address)?),
        QueryMsg::Allowance { owner, spender } => {
            to_json_binary(&query_allowance(deps, owner, spender)?)
        }
    }
}

fn query_token_info(deps: Deps) -> StdResult<TokenInfoResponse> {
    let info = TOKEN_INFO.load(deps.storage)?;
    Ok(TokenInfoResponse {
        name: info.name,
        symbol: info.symbol,
        decimals: info.decimals,
        total_supply: info.total_supply,
    })
}

fn query_balance(deps: Deps, address: String) -> StdResult<BalanceResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let balance = BALANCES.may_load(deps.storage, &addr)?.unwrap_or_default();
    Ok(BalanceResponse { balance })
}

fn query_allowance(deps: Deps, owner: String, spender: String) -> StdResult<AllowanceResponse> {
    let owner_addr = deps.api.addr_validate(&owner)?;
    let spender_addr = deps.api.addr_validate(&spender)?;
    let allowance = ALLOWANCES
        .may_load(deps.storage, (&owner_addr, &spender_addr))?
        .unwrap_or_default();
    Ok(AllowanceResponse { allowance })
}
