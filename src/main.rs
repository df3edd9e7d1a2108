use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use chrono::SecondsFormat;
use tracing::level_filters::LevelFilter;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use medallion_pipeline::config::PipelineConfig;
use medallion_pipeline::engine::{MedallionPipeline, RunSummary};
use medallion_pipeline::storage::FileWarehouse;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: The only part of the invocation contract is the project id, the rest is ambient configuration.
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 3 || args.iter().skip(1).any(|arg| arg == "-h" || arg == "--help") {
        eprintln!("Usage: medallion-pipeline [project_id:optional] [log_level:optional] > [summary].csv");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: info)");
        exit(1);
    }

    let log_level = args.get(2)
        .map(|s| parse_log_level(s)).unwrap_or(LevelFilter::INFO);

    setup_logging(log_level);

    let config = PipelineConfig::from_env(args.get(1).map(String::as_str));

    if args.len() < 2 {
        info!("No project id argument provided, using [{}]", config.project_id);
    }

    let warehouse = Arc::new(FileWarehouse::new(&config.warehouse_root));
    let pipeline = MedallionPipeline::new(warehouse)
        .with_layout(config.layout.clone())
        .with_partitions(config.partitions);

    let timer = Instant::now();
    let summary = match pipeline.run(&config.project_id).await {
        Ok(summary) => summary,
        Err(error) => {
            error!("Medallion pipeline aborted during [{}] stage: {error}", error.stage());
            return Err(error.into());
        }
    };
    let duration = timer.elapsed();

    info!(
        "Project [{}] reached [{:?}]: [{}] bronze rows ([{}] dropped) into [{}] silver, [{}] fact and [{}] gold rows in: {duration:?}",
        summary.project_id,
        summary.state,
        summary.cleaning.rows_read,
        summary.cleaning.rows_dropped(),
        summary.cleaning.rows_kept,
        summary.fact.len(),
        summary.gold.len()
    );

    write_results_to_stdout(&summary)?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the result tables, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_results_to_stdout(summary: &RunSummary) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "transaction_type,total_transactions,total_amount")?;

    for row in &summary.fact {
        writeln!(output, "{},{},{}", row.transaction_type, row.total_transactions, row.total_amount)?;
    }

    writeln!(output)?;
    writeln!(output, "transaction_type,hour_window,total_transactions,total_amount")?;

    for row in &summary.gold {
        writeln!(
            output,
            "{},{},{},{}",
            row.transaction_type,
            row.hour_window.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            row.total_transactions,
            row.total_amount
        )?;
    }

    output.flush()?;

    Ok(())
}
