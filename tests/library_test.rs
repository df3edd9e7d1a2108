use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;

use medallion_pipeline::engine::{MedallionPipeline, PipelineState, Stage, TableLayout};
use medallion_pipeline::models::{TransactionEvent, TransactionType};
use medallion_pipeline::storage::{MemoryWarehouse, TableData};

const PROJECT: &str = "embedded-project";

fn create_event(transaction_id: &str, amount: &str, timestamp: &str) -> Result<TransactionEvent> {
    Ok(TransactionEvent {
        transaction_id: transaction_id.to_string(),
        account_id: "ACC-2002".to_string(),
        amount: Decimal::from_str(amount)?,
        transaction_type: TransactionType::Payment,
        timestamp: timestamp.to_string()
    })
}

#[tokio::test]
async fn test_embedded_run_on_memory_warehouse() -> Result<()> {
    let warehouse = Arc::new(MemoryWarehouse::new());
    let tables = TableLayout::default().qualify(PROJECT);
    warehouse.insert(&tables.raw, TableData::Raw(vec![
        create_event("p-1", "12.50", "2024-03-01T08:10:00")?,
        create_event("p-2", "7.50", "2024-03-01T09:00:00")?,
        create_event("p-1", "12.50", "2024-03-01T08:10:00")?
    ]));

    let summary = MedallionPipeline::new(Arc::clone(&warehouse)).with_partitions(2).run(PROJECT).await?;

    assert_eq!(summary.state, PipelineState::GoldReady);
    assert_eq!(summary.cleaning.rows_kept, 2);
    assert_eq!(summary.cleaning.duplicates, 1);
    assert_eq!(summary.fact.len(), 1);
    assert_eq!(summary.fact[0].total_transactions, 2);
    assert_eq!(summary.fact[0].total_amount, Decimal::from_str("20.00")?);
    assert_eq!(summary.gold.len(), 2);
    assert!(matches!(warehouse.get(&tables.gold), Some(TableData::Gold(rows)) if rows == summary.gold));

    Ok(())
}

#[tokio::test]
async fn test_embedded_run_rejects_raw_table_with_wrong_tier() -> Result<()> {
    let warehouse = Arc::new(MemoryWarehouse::new());
    let tables = TableLayout::default().qualify(PROJECT);
    warehouse.insert(&tables.raw, TableData::Silver(Vec::new()));

    let error = MedallionPipeline::new(warehouse).run(PROJECT).await.err();

    assert_eq!(error.map(|error| error.stage()), Some(Stage::Cleaning));

    Ok(())
}
