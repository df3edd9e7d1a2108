mod errors;
mod file_warehouse;
mod memory_warehouse;

use std::fmt;
use std::fmt::{Display, Formatter};

use crate::models::{CleanedTransaction, HourlySummary, TransactionEvent, TypeSummary};

pub use errors::StorageError;
pub use file_warehouse::{FileSession, FileWarehouse};
pub use memory_warehouse::{MemorySession, MemoryWarehouse, TableData};

/// Fully qualified table identifier, displayed as `project.dataset.table`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TableId {
    pub project: String,
    pub dataset: String,
    pub table: String
}

impl TableId {
    pub fn new(project: &str, dataset: &str, table: &str) -> Self {
        Self {
            project: project.to_string(),
            dataset: dataset.to_string(),
            table: table.to_string()
        }
    }
}

impl Display for TableId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}.{}.{}", self.project, self.dataset, self.table)
    }
}

/// A bronze table as read: decodable events in ingestion order and the count of messages that were not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSnapshot {
    pub events: Vec<TransactionEvent>,
    pub undecodable: usize
}

/// A storage backend able to hand out sessions scoped to one project.
pub trait Warehouse: Send + Sync + 'static {
    type Session: Session;

    fn open(&self, project_id: &str) -> Result<Self::Session, StorageError>;
}

/// Table access for the duration of one pipeline run. Dropping the session releases it.
///
/// Every `overwrite_*` call must be atomic for readers: either the previous content or
/// the new rows are visible, never a mix, and a failed call leaves the previous content.
pub trait Session: Send + Sync {
    fn read_raw(&self, table: &TableId) -> Result<RawSnapshot, StorageError>;
    fn read_silver(&self, table: &TableId) -> Result<Vec<CleanedTransaction>, StorageError>;
    fn overwrite_silver(&self, table: &TableId, rows: &[CleanedTransaction]) -> Result<(), StorageError>;
    fn overwrite_fact(&self, table: &TableId, rows: &[TypeSummary]) -> Result<(), StorageError>;
    fn overwrite_gold(&self, table: &TableId, rows: &[HourlySummary]) -> Result<(), StorageError>;
}
