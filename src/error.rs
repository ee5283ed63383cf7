use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid Length")]
    InvalidLength {},

    #[error("Invalid Shares")]
    InvalidShares {},

    #[error("Invalid Payees")]
    InvalidPayees {},

    #[error("Unknown payee {address}")]
    UnknownPayee { address: String },

    #[error("No payment due for account")]
    NoPaymentDue {},
}
