use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::models::{CleanedTransaction, HourlySummary, TransactionEvent, TypeSummary};
use crate::storage::{RawSnapshot, Session, StorageError, TableId, Warehouse};

/// The typed content of one table.
#[derive(Debug, Clone, PartialEq)]
pub enum TableData {
    Raw(Vec<TransactionEvent>),
    Silver(Vec<CleanedTransaction>),
    Fact(Vec<TypeSummary>),
    Gold(Vec<HourlySummary>)
}

/// Process-local warehouse. Each overwrite swaps the whole table value in a single insert.
#[derive(Clone, Default)]
pub struct MemoryWarehouse {
    tables: Arc<DashMap<TableId, TableData>>
}

impl MemoryWarehouse {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(DashMap::new())
        }
    }

    pub fn insert(&self, table: &TableId, data: TableData) {
        self.tables.insert(table.clone(), data);
    }

    pub fn get(&self, table: &TableId) -> Option<TableData> {
        self.tables.get(table).map(|entry| entry.value().clone())
    }
}

impl Warehouse for MemoryWarehouse {
    type Session = MemorySession;

    fn open(&self, project_id: &str) -> Result<MemorySession, StorageError> {
        debug!("Opened in-memory session for project [{project_id}]");

        Ok(MemorySession {
            tables: self.tables.clone(),
            project_id: project_id.to_string()
        })
    }
}

pub struct MemorySession {
    tables: Arc<DashMap<TableId, TableData>>,
    project_id: String
}

impl MemorySession {
    fn read(&self, table: &TableId) -> Result<TableData, StorageError> {
        self.tables.get(table)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| StorageError::TableNotFound { table: table.to_string() })
    }
}

impl Session for MemorySession {
    fn read_raw(&self, table: &TableId) -> Result<RawSnapshot, StorageError> {
        match self.read(table)? {
            TableData::Raw(events) => Ok(RawSnapshot { events, undecodable: 0 }),
            _ => Err(StorageError::SchemaMismatch { table: table.to_string(), expected: "raw" })
        }
    }

    fn read_silver(&self, table: &TableId) -> Result<Vec<CleanedTransaction>, StorageError> {
        match self.read(table)? {
            TableData::Silver(rows) => Ok(rows),
            _ => Err(StorageError::SchemaMismatch { table: table.to_string(), expected: "silver" })
        }
    }

    fn overwrite_silver(&self, table: &TableId, rows: &[CleanedTransaction]) -> Result<(), StorageError> {
        self.tables.insert(table.clone(), TableData::Silver(rows.to_vec()));
        Ok(())
    }

    fn overwrite_fact(&self, table: &TableId, rows: &[TypeSummary]) -> Result<(), StorageError> {
        self.tables.insert(table.clone(), TableData::Fact(rows.to_vec()));
        Ok(())
    }

    fn overwrite_gold(&self, table: &TableId, rows: &[HourlySummary]) -> Result<(), StorageError> {
        self.tables.insert(table.clone(), TableData::Gold(rows.to_vec()));
        Ok(())
    }
}

impl Drop for MemorySession {
    fn drop(&mut self) {
        debug!("Released in-memory session for project [{}]", self.project_id);
    }
}
