mod amount;
mod category;
mod error;
pub mod fixtures;
mod ledger;
mod macros;
pub mod summary;
mod transaction;

pub use crate::amount::Amount;
pub use crate::category::Category;
pub use crate::error::LedgerError;
pub use crate::ledger::{InsertPosition, Ledger};
pub use crate::summary::{MonthlyTotals, Summary};
pub use crate::transaction::{
    parse_date, NewTransaction, Transaction, TransactionId, TransactionKind,
};
