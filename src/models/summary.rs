use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TransactionType;

/// Running count and sum for one aggregation group.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct GroupTotals {
    pub total_transactions: u64,
    pub total_amount: Decimal
}

impl GroupTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one more transaction amount into the group, `None` on decimal overflow.
    pub fn checked_add(self, amount: Decimal) -> Option<GroupTotals> {
        Some(Self {
            total_transactions: self.total_transactions.checked_add(1)?,
            total_amount: self.total_amount.checked_add(amount)?
        })
    }

    /// Combines the partial totals of two partitions, `None` on overflow.
    pub fn checked_merge(self, other: GroupTotals) -> Option<GroupTotals> {
        Some(Self {
            total_transactions: self.total_transactions.checked_add(other.total_transactions)?,
            total_amount: self.total_amount.checked_add(other.total_amount)?
        })
    }
}

/// One row of the flat fact table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeSummary {
    pub transaction_type: TransactionType,
    pub total_transactions: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal
}

impl TypeSummary {
    pub fn new(transaction_type: TransactionType, totals: GroupTotals) -> Self {
        Self {
            transaction_type,
            total_transactions: totals.total_transactions,
            total_amount: totals.total_amount
        }
    }
}

/// One row of the gold table. `hour_window` is the start of the bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySummary {
    pub transaction_type: TransactionType,
    pub total_transactions: u64,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    pub hour_window: DateTime<Utc>
}

impl HourlySummary {
    pub fn new(transaction_type: TransactionType, hour_window: DateTime<Utc>, totals: GroupTotals) -> Self {
        Self {
            transaction_type,
            total_transactions: totals.total_transactions,
            total_amount: totals.total_amount,
            hour_window
        }
    }
}
