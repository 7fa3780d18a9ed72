use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Amount, format_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Income => "income",
            Kind::Expense => "expense",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Case-insensitive: "Income", "INCOME" and "income" are all accepted.
/// Surrounding whitespace is not stripped.
impl FromStr for Kind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Kind::Income),
            "expense" => Ok(Kind::Expense),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseKindError(pub String);

impl fmt::Display for ParseKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid kind '{}', expected 'income' or 'expense'", self.0)
    }
}

impl std::error::Error for ParseKindError {}

/// A single dated income or expense.
/// Transactions are immutable once stored in a ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date the transaction happened on
    pub date: NaiveDate,
    /// Free-form label
    pub description: String,
    /// Always positive
    pub amount: Amount,
    pub kind: Kind,
}

impl Transaction {
    /// Build a transaction from already validated parts.
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Amount, kind: Kind) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            kind,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == Kind::Income
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.date.format("%Y-%m-%d"),
            self.description,
            format_amount(self.amount),
            self.kind
        )
    }
}
