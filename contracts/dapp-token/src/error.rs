use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Invalid address: must not be empty")]
    InvalidAddress {},

    #[error("Insufficient balance")]
    InsufficientBalance {},

    #[error("Insufficient allowance")]
    InsufficientAllowance {},

    #[error("This contract does not accept native funds")]
    UnexpectedFunds {},
}
