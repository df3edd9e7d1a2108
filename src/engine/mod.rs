mod aggregation;
mod cleaning;
mod errors;
mod pipeline;

pub use aggregation::Aggregator;
pub use cleaning::{clean, CleaningReport};
pub use errors::{PipelineError, Stage};
pub use pipeline::{MedallionPipeline, PipelineState, RunSummary, TableLayout, Tables};
