use std::fmt;

/// Amounts are plain decimal quantities. No currency is attached.
pub type Amount = f64;

/// Format an amount with two decimals.
/// Example: 1000.0 -> "1000.00", 12.345 -> "12.35"
pub fn format_amount(amount: Amount) -> String {
    format!("{:.2}", amount)
}

/// Parse a decimal string into an amount.
/// Example: "50.00" -> 50.0, "12.5" -> 12.5, "-3" -> -3.0
///
/// Sign and magnitude are not checked here; the ledger decides what it accepts.
pub fn parse_amount(input: &str) -> Result<Amount, ParseAmountError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    input
        .parse::<f64>()
        .map_err(|_| ParseAmountError::InvalidFormat(input.to_string()))
}

/// True when the amount may be stored: finite and strictly positive.
pub fn is_valid_amount(amount: Amount) -> bool {
    amount.is_finite() && amount > 0.0
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseAmountError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for ParseAmountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseAmountError::Empty => write!(f, "amount is empty"),
            ParseAmountError::InvalidFormat(input) => write!(f, "invalid amount '{}'", input),
        }
    }
}

impl std::error::Error for ParseAmountError {}
