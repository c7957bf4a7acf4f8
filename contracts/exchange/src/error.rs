use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Order not found")]
    OrderNotFound {},

    #[error("Order already filled or cancelled")]
    OrderAlreadyFinalized {},

    #[error("Insufficient balance")]
    InsufficientBalance {},

    #[error("Invalid asset for this operation")]
    InvalidAsset {},

    #[error("Token transfer rejected: {reason}")]
    TransferRejected { reason: String },

    #[error("No funds sent")]
    NoFunds {},

    #[error("Only a single coin of {denom} can be deposited")]
    InvalidFunds { denom: String },

    #[error("Funds can only be sent with a native deposit")]
    UnexpectedFunds {},

    #[error("Fee percent must be between 0 and 100")]
    InvalidFeePercent {},

    #[error("Native denom must not be empty")]
    InvalidDenom {},
}
