use std::env;
use std::fs::{create_dir_all, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::exit;
use std::thread::sleep;
use std::time::Duration;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::Rng;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde_json::json;
use uuid::Uuid;

const TRANSACTION_TYPES: [&str; 4] = ["DEPOSIT", "WITHDRAWAL", "PAYMENT", "TRANSFER"];

struct GeneratorConfig {
    num_messages: usize,
    delay: Duration,
    dirty_ratio: f64,
    output_path: PathBuf
}

impl GeneratorConfig {
    fn from_env() -> Option<Self> {
        let project_id = env::var("PROJECT_ID").ok().filter(|value| !value.is_empty())?;
        let dataset = env::var("PIPELINE_DATASET").unwrap_or_else(|_| "banking_prod".to_string());
        let root = env::var("WAREHOUSE_ROOT").unwrap_or_else(|_| "warehouse".to_string());

        Some(Self {
            num_messages: env::var("NUM_MESSAGES").ok().and_then(|s| s.parse().ok()).unwrap_or(50),
            delay: env::var("DELAY").ok()
                .and_then(|s| s.parse::<f64>().ok())
                .and_then(|seconds| Duration::try_from_secs_f64(seconds).ok())
                .unwrap_or(Duration::from_millis(500)),
            dirty_ratio: env::var("DIRTY_RATIO").ok().and_then(|s| s.parse().ok()).unwrap_or(0.0),
            output_path: PathBuf::from(root).join(project_id).join(dataset).join("banking_raw.jsonl")
        })
    }
}

fn main() -> io::Result<()> {
    let Some(config) = GeneratorConfig::from_env() else {
        eprintln!("PROJECT_ID environment variable is required");
        exit(1);
    };

    println!("Generating {} transactions into {}...", config.num_messages, config.output_path.display());

    if let Some(parent) = config.output_path.parent() {
        create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(&config.output_path)?;
    let mut writer = BufWriter::new(file);
    let mut rng = rand::thread_rng();
    let mut previous: Option<serde_json::Value> = None;

    for _ in 0..config.num_messages {
        let message = match previous.take() {
            Some(duplicate) if rng.gen_bool(config.dirty_ratio.clamp(0.0, 1.0) / 2.0) => duplicate,
            _ => generate_transaction(&mut rng, config.dirty_ratio)
        };

        writeln!(writer, "{message}")?;
        //NOTE: Flushed per message so the raw table grows like a subscriber sink would.
        writer.flush()?;
        println!("Published: {message}");

        previous = Some(message);
        sleep(config.delay);
    }

    println!("Done generating transactions.");

    Ok(())
}

fn generate_transaction<R: Rng>(rng: &mut R, dirty_ratio: f64) -> serde_json::Value {
    let mut amount = Decimal::from_f64(rng.gen_range(10.0..5000.0))
        .unwrap_or(Decimal::ONE_HUNDRED)
        .round_dp(2);

    if rng.gen_bool(dirty_ratio.clamp(0.0, 1.0) / 2.0) {
        amount = -amount;
    }

    json!({
        "transaction_id": Uuid::new_v4().to_string(),
        "account_id": format!("ACC-{}", rng.gen_range(1000..=9999)),
        "amount": amount.to_f64().unwrap_or_default(),
        "transaction_type": TRANSACTION_TYPES.choose(rng).copied().unwrap_or("DEPOSIT"),
        "timestamp": Utc::now().naive_utc().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    })
}
