use cosmwasm_std::{coins, Addr, Empty, Uint128};
use cw_multi_test::{App, Contract, ContractWrapper, Executor};

use dapp_token::msg::{
    AllowanceResponse, BalanceResponse, ExecuteMsg, InstantiateMsg, QueryMsg, TokenInfoResponse,
};
use dapp_token::ContractError;

const ONE: u128 = 1_000_000_000_000_000_000;
const DEPLOYER: &str = "deployer";
const RECEIVER: &str = "receiver";
const SPENDER: &str = "spender";

fn token_contract() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        dapp_token::contract::execute,
        dapp_token::contract::instantiate,
        dapp_token::contract::query,
    ))
}

fn tokens(n: u128) -> Uint128 {
    Uint128::new(n * ONE)
}

fn setup() -> (App, Addr) {
    let mut app = App::new(|router, _, storage| {
        router
            .bank
            .init_balance(storage, &Addr::unchecked(DEPLOYER), coins(1_000, "uatom"))
            .unwrap();
    });
    let code_id = app.store_code(token_contract());
    let token = app
        .instantiate_contract(
            code_id,
            Addr::unchecked(DEPLOYER),
            &InstantiateMsg::default(),
            &[],
            "dapp-token",
            None,
        )
        .unwrap();
    (app, token)
}

fn balance(app: &App, token: &Addr, address: &str) -> Uint128 {
    let res: BalanceResponse = app
        .wrap()
        .query_wasm_smart(
            token,
            &QueryMsg::Balance {
                address: address.to_string(),
            },
        )
        .unwrap();
    res.balance
}

#[test]
fn deploys_full_supply_to_instantiator() {
    let (app, token) = setup();
    let info: TokenInfoResponse = app
        .wrap()
        .query_wasm_smart(&token, &QueryMsg::TokenInfo {})
        .unwrap();
    assert_eq!(info.name, "DApp Token");
    assert_eq!(info.symbol, "DAPP");
    assert_eq!(info.decimals, 18);
    assert_eq!(info.total_supply, tokens(1_000_000));
    assert_eq!(balance(&app, &token, DEPLOYER), tokens(1_000_000));
}

#[test]
fn transfer_approve_transfer_from() {
    let (mut app, token) = setup();

    app.execute_contract(
        Addr::unchecked(DEPLOYER),
        token.clone(),
        &ExecuteMsg::Transfer {
            recipient: RECEIVER.to_string(),
            amount: tokens(3),
        },
        &[],
    )
    .unwrap();
    assert_eq!(balance(&app, &token, DEPLOYER), tokens(999_997));
    assert_eq!(balance(&app, &token, RECEIVER), tokens(3));

    app.execute_contract(
        Addr::unchecked(RECEIVER),
        token.clone(),
        &ExecuteMsg::Approve {
            spender: SPENDER.to_string(),
            amount: tokens(2),
        },
        &[],
    )
    .unwrap();

    app.execute_contract(
        Addr::unchecked(SPENDER),
        token.clone(),
        &ExecuteMsg::TransferFrom {
            owner: RECEIVER.to_string(),
            recipient: DEPLOYER.to_string(),
            amount: tokens(2),
        },
        &[],
    )
    .unwrap();
    assert_eq!(balance(&app, &token, RECEIVER), tokens(1));
    assert_eq!(balance(&app, &token, DEPLOYER), tokens(999_999));

    let allowance: AllowanceResponse = app
        .wrap()
        .query_wasm_smart(
            &token,
            &QueryMsg::Allowance {
                owner: RECEIVER.to_string(),
                spender: SPENDER.to_string(),
            },
        )
        .unwrap();
    assert_eq!(allowance.allowance, Uint128::zero());

    // The allowance is spent
    let err = app
        .execute_contract(
            Addr::unchecked(SPENDER),
            token.clone(),
            &ExecuteMsg::TransferFrom {
                owner: RECEIVER.to_string(),
                recipient: SPENDER.to_string(),
                amount: tokens(1),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::InsufficientAllowance {}
    );
}

#[test]
fn failed_transfer_leaves_balances_unchanged() {
    let (mut app, token) = setup();
    let err = app
        .execute_contract(
            Addr::unchecked(RECEIVER),
            token.clone(),
            &ExecuteMsg::Transfer {
                recipient: DEPLOYER.to_string(),
                amount: tokens(1),
            },
            &[],
        )
        .unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::InsufficientBalance {}
    );
    assert_eq!(balance(&app, &token, DEPLOYER), tokens(1_000_000));

    // Native funds are refused and returned
    let err = app
        .execute_contract(
            Addr::unchecked(DEPLOYER),
            token.clone(),
            &ExecuteMsg::Transfer {
                recipient: RECEIVER.to_string(),
                amount: tokens(1),
            },
            &coins(100, "uatom"),
        )
        .unwrap_err();
    assert_eq!(
        err.downcast::<ContractError>().unwrap(),
        ContractError::UnexpectedFunds {}
    );
    let bank = app.wrap().query_balance(DEPLOYER, "uatom").unwrap();
    assert_eq!(bank.amount, Uint128::new(1_000));
}
