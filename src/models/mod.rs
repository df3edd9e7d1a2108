mod errors;
mod summary;
mod transaction;

use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

pub use errors::{AggregateError, RecordError};
pub use summary::{GroupTotals, HourlySummary, TypeSummary};
pub use transaction::{CleanedTransaction, TransactionEvent};

/// Declaration order is the output order of every summary table.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Payment,
    Transfer
}

impl Display for TransactionType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Payment => "PAYMENT",
            TransactionType::Transfer => "TRANSFER"
        };

        formatter.write_str(name)
    }
}
