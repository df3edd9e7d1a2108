
use std::env;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::thread::available_parallelism;

use crate::engine::TableLayout;

const DEFAULT_PROJECT_ID: &str = "jaffle-shop-481012";
const DEFAULT_WAREHOUSE_ROOT: &str = "warehouse";

/// Settings for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub project_id: String,
    pub layout: TableLayout,
    pub warehouse_root: PathBuf,
    pub partitions: usize
}

impl PipelineConfig {
    /// Resolves the configuration from the optional project argument and the process environment.
    ///
    /// Environment variables:
    /// - `PROJECT_ID` (used when no argument is given, default: jaffle-shop-481012)
    /// - `PIPELINE_DATASET` (default: banking_prod)
    /// - `WAREHOUSE_ROOT` (default: warehouse)
    /// - `PIPELINE_PARTITIONS` (default: available parallelism)
    pub fn from_env(project_argument: Option<&str>) -> Self {
        Self::from_lookup(project_argument, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(project_argument: Option<&str>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>
    {
        let project_id = project_argument
            .map(str::to_string)
            .or_else(|| lookup("PROJECT_ID"))
            .filter(|project_id| !project_id.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PROJECT_ID.to_string());

        let mut layout = TableLayout::default();

        if let Some(dataset) = lookup("PIPELINE_DATASET") {
            layout.dataset = dataset;
        }

        let partitions = lookup("PIPELINE_PARTITIONS")
            .and_then(|value| value.parse::<NonZeroUsize>().ok())
            .or_else(|| available_parallelism().ok())
            .map_or(1, NonZeroUsize::get);

        Self {
            project_id,
            layout,
            warehouse_root: lookup("WAREHOUSE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WAREHOUSE_ROOT)),
            partitions
        }
    }
}
