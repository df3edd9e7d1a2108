use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use rust_decimal::Decimal;
use tokio::spawn;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::actors::ActorError;
use crate::models::{AggregateError, GroupTotals};

type PartialGroups<K> = HashMap<K, GroupTotals>;

/// Folds the amounts of one input partition into per-key totals on its own task.
pub struct PartitionActor<K> {
    partition: usize,
    sender: mpsc::UnboundedSender<(K, Decimal)>,
    handle: JoinHandle<Result<PartialGroups<K>, AggregateError>>
}

impl<K> PartitionActor<K>
where
    K: Eq + Hash + Debug + Send + 'static
{
    /// Spawns a new actor for the given partition index.
    pub fn new(partition: usize) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<(K, Decimal)>();

        let handle = spawn(async move {
            let mut groups = PartialGroups::new();

            while let Some((key, amount)) = receiver.recv().await {
                let current = groups.get(&key).copied().unwrap_or_else(GroupTotals::new);
                let totals = current.checked_add(amount)
                    .ok_or_else(|| AggregateError::overflow(&key))?;

                groups.insert(key, totals);
            }

            debug!("Partition [{partition}] folded [{}] groups", groups.len());

            Ok::<_, AggregateError>(groups)
        });

        Self { partition, sender, handle }
    }

    /// Queues one amount for the group `key`. Returns `false` once the actor has stopped.
    pub fn accept(&self, key: K, amount: Decimal) -> bool {
        self.sender.send((key, amount)).is_ok()
    }

    /// Closes the input channel and waits for the partition's partial totals.
    pub async fn despawn(self) -> Result<PartialGroups<K>, ActorError> {
        let Self { partition, sender, handle } = self;
        drop(sender);

        let groups = handle.await
            .map_err(|source| ActorError::Terminated { partition, source })??;

        Ok(groups)
    }
}
