use std::collections::HashSet;

use tracing::debug;

use crate::models::{CleanedTransaction, RecordError, TransactionEvent};

/// Counts of what happened to the bronze snapshot on its way to silver.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct CleaningReport {
    pub rows_read: usize,
    pub undecodable_messages: usize,
    pub malformed_timestamps: usize,
    pub non_positive_amounts: usize,
    pub duplicates: usize,
    pub rows_kept: usize
}

impl CleaningReport {
    /// Accounts for raw messages the store could not decode into events at all.
    pub fn with_undecodable(mut self, undecodable: usize) -> Self {
        self.rows_read += undecodable;
        self.undecodable_messages += undecodable;
        self
    }

    pub fn rows_dropped(&self) -> usize {
        self.undecodable_messages + self.malformed_timestamps + self.non_positive_amounts + self.duplicates
    }
}

/// Turns a bronze snapshot into its silver replacement.
///
/// Records are visited in ingestion order. A record is dropped when its timestamp does not
/// parse or its amount is not positive. Among the remaining records the first one seen for a
/// `transaction_id` is kept and every later copy is dropped, so an invalid first copy never
/// shadows a valid later one. Survivors keep their relative ingestion order.
pub fn clean(events: Vec<TransactionEvent>) -> (Vec<CleanedTransaction>, CleaningReport) {
    let mut report = CleaningReport { rows_read: events.len(), ..CleaningReport::default() };
    let mut seen = HashSet::with_capacity(events.len());
    let mut silver = Vec::with_capacity(events.len());

    for event in events {
        let transaction = match CleanedTransaction::try_from(event) {
            Ok(transaction) => transaction,
            Err(error) => {
                if matches!(error, RecordError::MalformedTimestamp { .. }) {
                    report.malformed_timestamps += 1;
                } else {
                    report.non_positive_amounts += 1;
                }

                debug!("{error}");
                continue;
            }
        };

        if !seen.insert(transaction.transaction_id.clone()) {
            report.duplicates += 1;
            debug!("{}", RecordError::duplicate_transaction(&transaction.transaction_id, &transaction.account_id, transaction.transaction_type));
            continue;
        }

        silver.push(transaction);
    }

    report.rows_kept = silver.len();

    (silver, report)
}
