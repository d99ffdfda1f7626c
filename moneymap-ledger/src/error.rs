use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Description cannot be empty")]
    EmptyDescription,

    #[error("Amount must be greater than zero")]
    NonPositiveAmount,

    #[error("Amount cannot exceed 10000000000.00")]
    AmountTooLarge,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}
