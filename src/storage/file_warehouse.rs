use std::fs::{create_dir_all, File};
use std::io::{self, BufRead, BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use std::str::from_utf8;

use csv::{ReaderBuilder, WriterBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::models::{CleanedTransaction, HourlySummary, TransactionEvent, TypeSummary};
use crate::storage::{RawSnapshot, Session, StorageError, TableId, Warehouse};

const RAW_EXTENSION: &str = "jsonl";
const TABLE_EXTENSION: &str = "csv";

/// Directory backed warehouse laid out as `{root}/{project}/{dataset}/{table}.{ext}`.
///
/// Bronze tables are JSON Lines exactly as the producer published them, every other
/// tier is a CSV file replaced through a temporary file and a rename.
pub struct FileWarehouse {
    root: PathBuf
}

impl FileWarehouse {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf()
        }
    }
}

impl Warehouse for FileWarehouse {
    type Session = FileSession;

    fn open(&self, project_id: &str) -> Result<FileSession, StorageError> {
        let project_root = self.root.join(project_id);
        create_dir_all(&project_root)?;

        debug!("Opened file session at [{}]", project_root.display());

        Ok(FileSession { root: self.root.clone(), project_root })
    }
}

pub struct FileSession {
    root: PathBuf,
    project_root: PathBuf
}

impl FileSession {
    fn path(&self, table: &TableId, extension: &str) -> PathBuf {
        self.root
            .join(&table.project)
            .join(&table.dataset)
            .join(format!("{}.{extension}", table.table))
    }

    fn open_table(&self, table: &TableId, path: &Path) -> Result<File, StorageError> {
        File::open(path).map_err(|error| match error.kind() {
            ErrorKind::NotFound => StorageError::TableNotFound { table: table.to_string() },
            _ => StorageError::Io(error)
        })
    }

    fn read_csv<R: DeserializeOwned>(&self, table: &TableId) -> Result<Vec<R>, StorageError> {
        let file = self.open_table(table, &self.path(table, TABLE_EXTENSION))?;

        //NOTE: Tier tables are read untrimmed, whitespace in an id is part of the id.
        let mut reader = ReaderBuilder::new().from_reader(BufReader::new(file));

        let rows = reader.deserialize::<R>().collect::<Result<Vec<R>, csv::Error>>()?;

        Ok(rows)
    }

    fn overwrite_csv<R: Serialize>(&self, table: &TableId, rows: &[R]) -> Result<(), StorageError> {
        let path = self.path(table, TABLE_EXTENSION);
        let directory = path.parent().ok_or_else(|| {
            io::Error::new(ErrorKind::InvalidInput, format!("Table [{table}] has no parent directory"))
        })?;

        create_dir_all(directory)?;

        //NOTE: The temporary file lives next to the target so the final rename never crosses filesystems.
        let mut staging = NamedTempFile::new_in(directory)?;
        {
            let mut writer = WriterBuilder::new().from_writer(staging.as_file_mut());

            for row in rows {
                writer.serialize(row)?;
            }

            writer.flush()?;
        }

        staging.as_file().sync_all()?;
        staging.persist(&path)?;

        debug!("Committed [{}] rows to [{}]", rows.len(), path.display());

        Ok(())
    }
}

impl Session for FileSession {
    fn read_raw(&self, table: &TableId) -> Result<RawSnapshot, StorageError> {
        let file = self.open_table(table, &self.path(table, RAW_EXTENSION))?;
        let mut snapshot = RawSnapshot::default();

        //NOTE: Lines are split as bytes so a single non UTF-8 message costs only that message.
        for (offset, line) in BufReader::new(file).split(b'\n').enumerate() {
            let line = line?;

            let message = match from_utf8(&line) {
                Ok(message) => message,
                Err(error) => {
                    warn!("Undecodable message at offset [{offset}] in table [{table}]: {error}");
                    snapshot.undecodable += 1;
                    continue;
                }
            };

            if message.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<TransactionEvent>(message) {
                Ok(event) => snapshot.events.push(event),
                Err(error) => {
                    warn!("Undecodable message at offset [{offset}] in table [{table}]: {error}");
                    snapshot.undecodable += 1;
                }
            }
        }

        Ok(snapshot)
    }

    fn read_silver(&self, table: &TableId) -> Result<Vec<CleanedTransaction>, StorageError> {
        self.read_csv(table)
    }

    fn overwrite_silver(&self, table: &TableId, rows: &[CleanedTransaction]) -> Result<(), StorageError> {
        self.overwrite_csv(table, rows)
    }

    fn overwrite_fact(&self, table: &TableId, rows: &[TypeSummary]) -> Result<(), StorageError> {
        self.overwrite_csv(table, rows)
    }

    fn overwrite_gold(&self, table: &TableId, rows: &[HourlySummary]) -> Result<(), StorageError> {
        self.overwrite_csv(table, rows)
    }
}

impl Drop for FileSession {
    fn drop(&mut self) {
        debug!("Released file session at [{}]", self.project_root.display());
    }
}
