use std::sync::Arc;

use tracing::info;

use crate::engine::cleaning::{clean, CleaningReport};
use crate::engine::errors::{PipelineError, Stage};
use crate::engine::Aggregator;
use crate::models::{HourlySummary, TypeSummary};
use crate::storage::{Session, TableId, Warehouse};

/// Table names of one medallion dataset, independent of the project.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TableLayout {
    pub dataset: String,
    pub raw: String,
    pub silver: String,
    pub fact: String,
    pub gold: String
}

impl TableLayout {
    pub fn qualify(&self, project_id: &str) -> Tables {
        Tables {
            raw: TableId::new(project_id, &self.dataset, &self.raw),
            silver: TableId::new(project_id, &self.dataset, &self.silver),
            fact: TableId::new(project_id, &self.dataset, &self.fact),
            gold: TableId::new(project_id, &self.dataset, &self.gold)
        }
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            dataset: "banking_prod".to_string(),
            raw: "banking_raw".to_string(),
            silver: "banking_silver".to_string(),
            fact: "transactions_fact".to_string(),
            gold: "banking_gold".to_string()
        }
    }
}

/// Fully qualified tables for one run.
#[derive(Debug, Clone)]
pub struct Tables {
    pub raw: TableId,
    pub silver: TableId,
    pub fact: TableId,
    pub gold: TableId
}

/// Progress of a single run. States are only ever entered in declaration order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum PipelineState {
    BronzeReady,
    SilverReady,
    FactReady,
    GoldReady
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub project_id: String,
    pub state: PipelineState,
    pub cleaning: CleaningReport,
    pub fact: Vec<TypeSummary>,
    pub gold: Vec<HourlySummary>
}

/// Batch bronze -> silver -> {fact, gold} pipeline over a warehouse.
pub struct MedallionPipeline<W: Warehouse> {
    warehouse: Arc<W>,
    layout: TableLayout,
    aggregator: Aggregator
}

impl<W: Warehouse> MedallionPipeline<W> {
    pub fn new(warehouse: Arc<W>) -> Self {
        Self {
            warehouse,
            layout: TableLayout::default(),
            aggregator: Aggregator::default()
        }
    }

    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_partitions(mut self, partitions: usize) -> Self {
        self.aggregator = Aggregator::new(partitions);
        self
    }

    /// Runs cleaning, fact aggregation and windowed aggregation once for `project_id`.
    ///
    /// Each stage starts only after the previous stage's overwrite has committed. Any storage
    /// or aggregation failure aborts the run immediately, tables not yet written keep their
    /// previous content. The warehouse session is released when this returns, either way.
    pub async fn run(&self, project_id: &str) -> Result<RunSummary, PipelineError> {
        let session = self.warehouse.open(project_id)
            .map_err(PipelineError::storage(Stage::Session))?;
        let tables = self.layout.qualify(project_id);
        let mut state = PipelineState::BronzeReady;

        let cleaning = self.clean_bronze(&session, &tables)?;
        state = advance(state, PipelineState::SilverReady);

        let fact = self.aggregate_by_type(&session, &tables).await?;
        state = advance(state, PipelineState::FactReady);

        let gold = self.aggregate_by_hour(&session, &tables).await?;
        state = advance(state, PipelineState::GoldReady);

        info!("Medallion pipeline complete for project [{project_id}]");

        Ok(RunSummary {
            project_id: project_id.to_string(),
            state,
            cleaning,
            fact,
            gold
        })
    }

    fn clean_bronze(&self, session: &W::Session, tables: &Tables) -> Result<CleaningReport, PipelineError> {
        info!("Reading bronze table [{}]", tables.raw);

        let bronze = session.read_raw(&tables.raw)
            .map_err(PipelineError::storage(Stage::Cleaning))?;
        let (silver, report) = clean(bronze.events);
        let report = report.with_undecodable(bronze.undecodable);

        info!(
            "Cleaned [{}] bronze rows: kept [{}], undecodable [{}], malformed timestamps [{}], non-positive amounts [{}], duplicates [{}]",
            report.rows_read,
            report.rows_kept,
            report.undecodable_messages,
            report.malformed_timestamps,
            report.non_positive_amounts,
            report.duplicates
        );

        session.overwrite_silver(&tables.silver, &silver)
            .map_err(PipelineError::storage(Stage::Cleaning))?;

        info!("Wrote [{}] rows to silver table [{}]", silver.len(), tables.silver);

        Ok(report)
    }

    async fn aggregate_by_type(&self, session: &W::Session, tables: &Tables) -> Result<Vec<TypeSummary>, PipelineError> {
        let silver = session.read_silver(&tables.silver)
            .map_err(PipelineError::storage(Stage::Fact))?;

        let summaries = self.aggregator.by_type(&silver).await
            .map_err(PipelineError::aggregation(Stage::Fact))?;

        session.overwrite_fact(&tables.fact, &summaries)
            .map_err(PipelineError::storage(Stage::Fact))?;

        info!("Wrote [{}] rows to fact table [{}]", summaries.len(), tables.fact);

        Ok(summaries)
    }

    async fn aggregate_by_hour(&self, session: &W::Session, tables: &Tables) -> Result<Vec<HourlySummary>, PipelineError> {
        let silver = session.read_silver(&tables.silver)
            .map_err(PipelineError::storage(Stage::Windowed))?;

        let summaries = self.aggregator.by_type_and_hour(&silver).await
            .map_err(PipelineError::aggregation(Stage::Windowed))?;

        session.overwrite_gold(&tables.gold, &summaries)
            .map_err(PipelineError::storage(Stage::Windowed))?;

        info!("Wrote [{}] rows to gold table [{}] across [{}] partitions", summaries.len(), tables.gold, self.aggregator.partitions());

        Ok(summaries)
    }
}

fn advance(from: PipelineState, to: PipelineState) -> PipelineState {
    info!("Pipeline state [{from:?}] -> [{to:?}]");
    to
}
