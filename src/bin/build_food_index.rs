// ABOUTME: Builds the local SQLite product index from an Open Food Facts JSONL export
// ABOUTME: Keeps products with a name and positive calories, then reports category coverage
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Product index builder for `FoodVantage`.
//!
//! Reads an Open Food Facts product export (one JSON object per line), keeps
//! products that have a name and a positive calorie value, and writes them to
//! the `products` table the local resolver searches.
//!
//! Usage:
//! ```bash
//! # Build from an export (uses VANTAGE_DATABASE_URL or the default path)
//! cargo run --bin build-food-index -- --input products.jsonl
//!
//! # Override database URL and only take the first 100k products
//! cargo run --bin build-food-index -- --input products.jsonl \
//!     --database-url sqlite:./data/vantage_core.db --limit 100000
//!
//! # Replace an existing index
//! cargo run --bin build-food-index -- --input products.jsonl --force
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use food_vantage::config::DatabaseConfig;
use food_vantage::constants::{defaults, env_keys};
use food_vantage::database::SqliteFoodStore;
use food_vantage::external::open_food_facts::OffProduct;
use food_vantage::intelligence::FoodKnowledgeBase;
use food_vantage::logging::{init_logging, LoggingConfig};
use std::env;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use tracing::{info, warn};
use vantage_core::models::NutrientRow;

/// Rows written per transaction
const INSERT_BATCH_SIZE: usize = 5_000;

#[derive(Parser)]
#[command(
    name = "build-food-index",
    about = "FoodVantage product index builder",
    long_about = "Load an Open Food Facts JSONL export into the local SQLite product index"
)]
struct BuildArgs {
    /// Open Food Facts export, one product per line
    #[arg(long, short = 'i')]
    input: PathBuf,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Stop after this many accepted products
    #[arg(long)]
    limit: Option<usize>,

    /// Replace existing products instead of refusing to run
    #[arg(long)]
    force: bool,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Counters reported at the end of a build
#[derive(Debug, Default)]
struct BuildStats {
    lines: usize,
    malformed: usize,
    skipped: usize,
    accepted: usize,
}

/// Parse one export line into a row worth indexing
fn parse_line(line: &str) -> Result<Option<NutrientRow>, serde_json::Error> {
    let product: OffProduct = serde_json::from_str(line)?;
    Ok(product
        .to_nutrient_row(None)
        .filter(|row| row.calories > 0.0))
}

async fn flush(store: &SqliteFoodStore, batch: &mut Vec<NutrientRow>) -> Result<u64> {
    if batch.is_empty() {
        return Ok(0);
    }
    let inserted = store
        .insert_products(batch)
        .await
        .context("failed to insert product batch")?;
    batch.clear();
    Ok(inserted)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = BuildArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    init_logging(&LoggingConfig {
        level: log_level.into(),
        ..LoggingConfig::from_env()
    })?;

    info!("=== FoodVantage Product Index Builder ===");

    let database_url = args
        .database_url
        .or_else(|| env::var(env_keys::DATABASE_URL).ok())
        .unwrap_or_else(|| defaults::DATABASE_URL.into());

    info!("Opening product index: {}", database_url);
    let store = SqliteFoodStore::new(DatabaseConfig::writable(database_url));
    store.migrate().await?;

    let existing = store.count().await?;
    if existing > 0 {
        if !args.force {
            info!(
                "Product index already holds {} products. Use --force to rebuild.",
                existing
            );
            return Ok(());
        }
        let removed = store.clear().await?;
        info!("Removed {} existing products", removed);
    }

    let file = File::open(&args.input)
        .with_context(|| format!("failed to open {}", args.input.display()))?;
    let reader = BufReader::new(file);

    let mut stats = BuildStats::default();
    let mut batch = Vec::with_capacity(INSERT_BATCH_SIZE);
    let mut inserted = 0_u64;

    for line in reader.lines() {
        let line = line.context("failed to read input line")?;
        if line.trim().is_empty() {
            continue;
        }
        stats.lines += 1;

        match parse_line(&line) {
            Ok(Some(row)) => {
                stats.accepted += 1;
                batch.push(row);
            }
            Ok(None) => stats.skipped += 1,
            Err(e) => {
                stats.malformed += 1;
                warn!(line = stats.lines, error = %e, "skipping malformed product");
            }
        }

        if batch.len() >= INSERT_BATCH_SIZE {
            inserted += flush(&store, &mut batch).await?;
            info!("Indexed {} products...", inserted);
        }
        if args.limit.is_some_and(|limit| stats.accepted >= limit) {
            break;
        }
    }
    inserted += flush(&store, &mut batch).await?;

    info!(
        lines = stats.lines,
        accepted = stats.accepted,
        skipped = stats.skipped,
        malformed = stats.malformed,
        "Indexed {} products",
        inserted
    );

    let knowledge_base = FoodKnowledgeBase::load(&store).await?;
    info!("Category coverage over {} foods:", knowledge_base.len());
    for (category, count) in knowledge_base.category_counts() {
        info!("  {:<22} {}", category.as_str(), count);
    }

    info!("=== Index build complete ===");
    Ok(())
}
