use std::fmt;
use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::actors::ActorError;
use crate::storage::StorageError;

/// The step of a run an error was raised in.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Stage {
    Session,
    Cleaning,
    Fact,
    Windowed
}

impl Display for Stage {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Session => "session",
            Stage::Cleaning => "cleaning",
            Stage::Fact => "fact",
            Stage::Windowed => "windowed"
        };

        formatter.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Storage failure in [{stage}] stage: {source}")]
    Storage {
        stage: Stage,
        source: StorageError
    },
    #[error("Aggregation failure in [{stage}] stage: {source}")]
    Aggregation {
        stage: Stage,
        source: ActorError
    }
}

impl PipelineError {
    pub fn storage(stage: Stage) -> impl FnOnce(StorageError) -> Self {
        move |source| Self::Storage { stage, source }
    }

    pub fn aggregation(stage: Stage) -> impl FnOnce(ActorError) -> Self {
        move |source| Self::Aggregation { stage, source }
    }

    pub fn stage(&self) -> Stage {
        match self {
            Self::Storage { stage, .. } | Self::Aggregation { stage, .. } => *stage
        }
    }
}
