//! Единый тип ошибок публичного API.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoletoError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Wallet {wallet:?} is not supported by bank {bank}")]
    UnsupportedWalletCode { bank: &'static str, wallet: String },

    #[error("Field {field} has {len} digits, fixed width is {width}")]
    FieldTooLong {
        field: &'static str,
        width: usize,
        len: usize,
    },

    #[error("Check value {0} has no digit mapping")]
    UnmappedCheckValue(u32),

    #[error("Unknown bank: {0}")]
    UnknownBank(String),

    #[error("Bank {0} is already registered")]
    DuplicateBank(String),

    #[error("Global bank registry is already installed")]
    RegistryInstalled,

    #[error("Due date {0} is outside the due-date factor range")]
    DueDateOutOfRange(NaiveDate),
}

pub type Result<T> = std::result::Result<T, BoletoError>;
