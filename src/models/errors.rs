use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::{TransactionEvent, TransactionType};
use crate::types::{AccountId, TimestampError, TransactionId};

/// Reasons a bronze record does not make it into silver. None of them are fatal to a run.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Malformed timestamp for transaction [{transaction_id}]:[{transaction_type}] for account [{account_id}]: {source}")]
    MalformedTimestamp {
        transaction_id: TransactionId,
        account_id: AccountId,
        transaction_type: TransactionType,
        source: TimestampError
    },
    #[error("Amount [{amount}] must be positive for transaction [{transaction_id}]:[{transaction_type}] for account [{account_id}]")]
    NonPositiveAmount {
        transaction_id: TransactionId,
        account_id: AccountId,
        transaction_type: TransactionType,
        amount: Decimal
    },
    #[error("Duplicate transaction [{transaction_id}]:[{transaction_type}] for account [{account_id}] dropped")]
    DuplicateTransaction {
        transaction_id: TransactionId,
        account_id: AccountId,
        transaction_type: TransactionType
    }
}

impl RecordError {
    pub fn malformed_timestamp(event: &TransactionEvent, source: TimestampError) -> Self {
        Self::MalformedTimestamp {
            transaction_id: event.transaction_id.clone(),
            account_id: event.account_id.clone(),
            transaction_type: event.transaction_type,
            source
        }
    }

    pub fn non_positive_amount(event: &TransactionEvent) -> Self {
        Self::NonPositiveAmount {
            transaction_id: event.transaction_id.clone(),
            account_id: event.account_id.clone(),
            transaction_type: event.transaction_type,
            amount: event.amount
        }
    }

    pub fn duplicate_transaction(transaction_id: &str, account_id: &str, transaction_type: TransactionType) -> Self {
        Self::DuplicateTransaction {
            transaction_id: transaction_id.to_string(),
            account_id: account_id.to_string(),
            transaction_type
        }
    }
}

#[derive(Debug, Error)]
pub enum AggregateError {
    #[error("Numeric overflow occurred while summing group [{group}]")]
    Overflow {
        group: String
    }
}

impl AggregateError {
    pub fn overflow<K: std::fmt::Debug>(group: &K) -> Self {
        Self::Overflow { group: format!("{group:?}") }
    }
}
