use serde::{Deserialize, Serialize};

use super::{Amount, Kind, Transaction};

/// Income and expense totals over a set of transactions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub income_total: Amount,
    pub expense_total: Amount,
}

/// Sum amounts per kind in a single pass.
pub fn summarize(transactions: &[Transaction]) -> Summary {
    transactions
        .iter()
        .fold(Summary::default(), |mut summary, tx| {
            match tx.kind {
                Kind::Income => summary.income_total += tx.amount,
                Kind::Expense => summary.expense_total += tx.amount,
            }
            summary
        })
}
