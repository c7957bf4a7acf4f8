use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

#[cw_serde]
#[derive(Default)]
pub struct InstantiateMsg {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
    /// Total supply in base units, minted to the instantiator
    pub total_supply: Option<Uint128>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Move tokens from the sender to `recipient`
    Transfer { recipient: String, amount: Uint128 },
    /// Spend `owner`'s tokens out of the allowance granted to the sender
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    /// Set the allowance of `spender` over the sender's tokens
    Approve { spender: String, amount: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(TokenInfoResponse)]
    TokenInfo {},

    #[returns(BalanceResponse)]
    Balance { address: String },

    #[returns(AllowanceResponse)]
    Allowance { owner: String, spender: String },
}

#[cw_serde]
pub struct TokenInfoResponse {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Uint128,
}

#[cw_serde]
pub struct BalanceResponse {
    pub balance: Uint128,
}

#[cw_serde]
pub struct AllowanceResponse {
    pub allowance: Uint128,
}
