use thiserror::Error;

use crate::domain::{Amount, DateFormat};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Invalid kind '{0}'. Use 'income' or 'expense'")]
    InvalidKind(String),

    #[error("Invalid date format '{input}'. Use '{expected}'")]
    InvalidDateFormat {
        input: String,
        expected: DateFormat,
    },

    #[error("Invalid amount {0}. Amount must be greater than zero")]
    InvalidAmount(Amount),
}
