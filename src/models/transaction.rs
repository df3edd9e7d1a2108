use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{RecordError, TransactionType};
use crate::types::{parse_timestamp, AccountId, TransactionId};

/// Represents a single raw (bronze) message exactly as the producer published it.
///
/// Nothing is validated at this tier. The `timestamp` stays in its wire form so a
/// bad value only costs the record, not the whole snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionEvent {
    /// Producer assigned identifier, duplicates may arrive.
    pub transaction_id: TransactionId,
    /// Account reference in the `ACC-####` form.
    pub account_id: AccountId,
    /// Amount in currency units.
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    /// ISO-8601 instant, UTC when no offset is present.
    pub timestamp: String
}

/// A validated (silver) transaction: positive amount and a real UTC instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedTransaction {
    pub transaction_id: TransactionId,
    pub account_id: AccountId,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub timestamp: DateTime<Utc>
}

impl TryFrom<TransactionEvent> for CleanedTransaction {
    type Error = RecordError;

    /// The timestamp is checked before the amount, a record failing both reports the timestamp.
    fn try_from(event: TransactionEvent) -> Result<Self, Self::Error> {
        let timestamp = parse_timestamp(&event.timestamp)
            .map_err(|error| RecordError::malformed_timestamp(&event, error))?;

        if event.amount <= Decimal::ZERO {
            return Err(RecordError::non_positive_amount(&event))
        }

        Ok(Self {
            transaction_id: event.transaction_id,
            account_id: event.account_id,
            amount: event.amount,
            transaction_type: event.transaction_type,
            timestamp
        })
    }
}
