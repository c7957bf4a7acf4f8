// Shared types and utilities for the DApp exchange contracts on CosmWasm

use std::fmt;

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Api, StdResult, Uint128};

/// An asset the exchange can custody.
///
/// Native currency is its own variant instead of a reserved "null" token
/// address, so an unset or malformed address can never be mistaken for it.
#[cw_serde]
pub enum AssetInfo {
    /// The chain's bank denomination configured on the exchange
    Native,
    /// A token ledger contract
    Token { contract_addr: String },
}

impl AssetInfo {
    pub fn token(contract_addr: impl Into<String>) -> Self {
        AssetInfo::Token {
            contract_addr: contract_addr.into(),
        }
    }

    /// Validate the token address and return the normalized asset
    pub fn validate(&self, api: &dyn Api) -> StdResult<AssetInfo> {
        match self {
            AssetInfo::Native => Ok(AssetInfo::Native),
            AssetInfo::Token { contract_addr } => {
                let addr = api.addr_validate(contract_addr)?;
                Ok(AssetInfo::Token {
                    contract_addr: addr.into_string(),
                })
            }
        }
    }

    /// Key under which balances of this asset are stored
    pub fn storage_key(&self) -> String {
        match self {
            AssetInfo::Native => "native".to_string(),
            AssetInfo::Token { contract_addr } => format!("token:{}", contract_addr),
        }
    }
}

impl fmt::Display for AssetInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetInfo::Native => write!(f, "native"),
            AssetInfo::Token { contract_addr } => write!(f, "{}", contract_addr),
        }
    }
}

// Common helper functions

/// Percentage of `amount`, rounded down
pub fn calculate_percentage(amount: Uint128, percentage: u64) -> Uint128 {
    amount.multiply_ratio(percentage, 100u128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;

    #[test]
    fn test_calculate_percentage() {
        let amount = Uint128::new(1000);
        let result = calculate_percentage(amount, 10);
        assert_eq!(result, Uint128::new(100));
    }

    #[test]
    fn test_calculate_percentage_floors() {
        assert_eq!(calculate_percentage(Uint128::new(19), 10), Uint128::new(1));
        assert_eq!(calculate_percentage(Uint128::new(9), 10), Uint128::zero());
        assert_eq!(calculate_percentage(Uint128::new(1000), 0), Uint128::zero());
    }

    #[test]
    fn test_fee_on_one_token() {
        let one = Uint128::new(1_000_000_000_000_000_000);
        assert_eq!(
            calculate_percentage(one, 10),
            Uint128::new(100_000_000_000_000_000)
        );
    }

    #[test]
    fn test_storage_keys_are_distinct() {
        let native = AssetInfo::Native;
        let token = AssetInfo::token("native");
        assert_ne!(native.storage_key(), token.storage_key());
        assert_eq!(token.storage_key(), "token:native");
    }

    #[test]
    fn test_validate() {
        let api = MockApi::default();
        assert_eq!(AssetInfo::Native.validate(&api).unwrap(), AssetInfo::Native);
        let token = AssetInfo::token("dapptoken");
        assert_eq!(token.validate(&api).unwrap(), token);
        assert!(AssetInfo::token("").validate(&api).is_err());
    }
}
