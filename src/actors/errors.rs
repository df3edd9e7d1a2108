use thiserror::Error;
use tokio::task::JoinError;

use crate::models::AggregateError;

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("{0}")]
    Aggregate(#[from] AggregateError),
    #[error("Partition actor [{partition}] terminated abnormally: {source}")]
    Terminated {
        partition: usize,
        source: JoinError
    }
}
