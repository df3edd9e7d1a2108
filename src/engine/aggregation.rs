use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use futures::future::join_all;
use tracing::error;

use crate::actors::{ActorError, PartitionActor};
use crate::models::{AggregateError, CleanedTransaction, GroupTotals, HourlySummary, TypeSummary};
use crate::types::hour_bucket;

/// Groups silver rows by a key, spreading the input round-robin over partition actors
/// and merging their partial totals.
pub struct Aggregator {
    partitions: usize
}

impl Aggregator {
    pub fn new(partitions: usize) -> Self {
        Self {
            partitions: partitions.max(1)
        }
    }

    pub fn partitions(&self) -> usize {
        self.partitions
    }

    /// Count and sum per transaction type, sorted by type.
    pub async fn by_type(&self, rows: &[CleanedTransaction]) -> Result<Vec<TypeSummary>, ActorError> {
        let groups = self.group_by(rows, |row| row.transaction_type).await?;

        let mut summaries: Vec<TypeSummary> = groups.into_iter()
            .map(|(transaction_type, totals)| TypeSummary::new(transaction_type, totals))
            .collect();

        summaries.sort_by_key(|summary| summary.transaction_type);

        Ok(summaries)
    }

    /// Count and sum per (transaction type, UTC hour bucket), sorted by type then hour.
    pub async fn by_type_and_hour(&self, rows: &[CleanedTransaction]) -> Result<Vec<HourlySummary>, ActorError> {
        let groups = self.group_by(rows, |row| (row.transaction_type, hour_bucket(&row.timestamp))).await?;

        let mut summaries: Vec<HourlySummary> = groups.into_iter()
            .map(|((transaction_type, hour_window), totals)| HourlySummary::new(transaction_type, hour_window, totals))
            .collect();

        summaries.sort_by_key(|summary| (summary.transaction_type, summary.hour_window));

        Ok(summaries)
    }

    async fn group_by<K, F>(&self, rows: &[CleanedTransaction], key_of: F) -> Result<HashMap<K, GroupTotals>, ActorError>
    where
        K: Eq + Hash + Debug + Send + 'static,
        F: Fn(&CleanedTransaction) -> K
    {
        let actors: Vec<PartitionActor<K>> = (0..self.partitions).map(PartitionActor::new).collect();

        for (index, row) in rows.iter().enumerate() {
            let partition = index % actors.len();

            if !actors[partition].accept(key_of(row), row.amount) {
                error!("Partition actor [{partition}] could not accept transaction [{}]", row.transaction_id);
            }
        }

        let mut groups = HashMap::<K, GroupTotals>::new();

        //NOTE: Every actor is awaited even when one fails so no task outlives the stage.
        for result in join_all(actors.into_iter().map(|actor| actor.despawn())).await {
            for (key, partial) in result? {
                let merged = match groups.get(&key) {
                    Some(totals) => totals.checked_merge(partial),
                    None => Some(partial)
                }.ok_or_else(|| AggregateError::overflow(&key))?;

                groups.insert(key, merged);
            }
        }

        Ok(groups)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(1)
    }
}

