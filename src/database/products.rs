// ABOUTME: SQLite-backed product index with a lazily opened, shared connection pool
// ABOUTME: Substring search, bulk load and the write path used by the index builder
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::FoodStore;
use crate::config::DatabaseConfig;
use crate::constants::limits::SHORT_NAME_MAX_SPACES;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use tokio::sync::OnceCell;
use tracing::{debug, info};
use vantage_core::errors::{AppError, AppResult};
use vantage_core::models::{normalize_nutrient, NovaGroup, NutrientRow};

/// Columns selected for every read. Numeric columns are cast so malformed
/// text values decode as numbers (or NULL) instead of failing the row.
const PRODUCT_COLUMNS: &str = r"
    product_name,
    brand,
    CAST(calories AS REAL) AS calories,
    CAST(sugar AS REAL) AS sugar,
    CAST(fiber AS REAL) AS fiber,
    CAST(protein AS REAL) AS protein,
    CAST(fat AS REAL) AS fat,
    CAST(sodium_mg AS REAL) AS sodium_mg,
    CAST(carbs AS REAL) AS carbs,
    CAST(nova_group AS REAL) AS nova_group
";

/// Product index over a `SQLite` database.
///
/// The pool is opened on first use. Concurrent first calls share a single
/// initialisation; later calls reuse the same pool.
pub struct SqliteFoodStore {
    config: DatabaseConfig,
    pool: OnceCell<SqlitePool>,
}

impl SqliteFoodStore {
    /// Create a store that connects lazily with `config`
    #[must_use]
    pub const fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceCell::const_new(),
        }
    }

    /// Wrap an already open pool
    #[must_use]
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self {
            config: DatabaseConfig::default(),
            pool: OnceCell::new_with(Some(pool)),
        }
    }

    /// Whether the pool has been opened
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.pool.initialized()
    }

    /// Shared pool, opening it on first use
    ///
    /// # Errors
    ///
    /// Returns a retryable `RESOURCE_UNAVAILABLE` error if the database cannot be opened
    pub async fn pool(&self) -> AppResult<&SqlitePool> {
        self.pool.get_or_try_init(|| open_pool(&self.config)).await
    }

    /// Create the `products` table and its name index
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created
    pub async fn migrate(&self) -> AppResult<()> {
        let pool = self.pool().await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS products (
                product_name TEXT,
                brand TEXT,
                calories REAL,
                sugar REAL,
                fiber REAL,
                protein REAL,
                fat REAL,
                sodium_mg REAL,
                carbs REAL,
                nova_group INTEGER
            )
            ",
        )
        .execute(pool)
        .await
        .map_err(|e| AppError::from(e).with_context("Failed to create products table"))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_name ON products(product_name)")
            .execute(pool)
            .await
            .map_err(|e| AppError::from(e).with_context("Failed to create products index"))?;

        Ok(())
    }

    /// Insert one row. The name is stored trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_product(&self, row: &NutrientRow) -> AppResult<()> {
        let pool = self.pool().await?;
        insert_query(row)
            .execute(pool)
            .await
            .map_err(|e| AppError::from(e).with_context("Failed to insert product"))?;
        Ok(())
    }

    /// Insert many rows in one transaction, returning the number written
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; nothing is written in that case
    pub async fn insert_products(&self, rows: &[NutrientRow]) -> AppResult<u64> {
        let pool = self.pool().await?;
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| AppError::from(e).with_context("Failed to begin transaction"))?;

        let mut written = 0_u64;
        for row in rows {
            let result = insert_query(row)
                .execute(&mut *tx)
                .await
                .map_err(|e| AppError::from(e).with_context("Failed to insert product"))?;
            written += result.rows_affected();
        }

        tx.commit()
            .await
            .map_err(|e| AppError::from(e).with_context("Failed to commit products"))?;
        Ok(written)
    }

    /// Delete every row, returning how many were removed
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails
    pub async fn clear(&self) -> AppResult<u64> {
        let pool = self.pool().await?;
        let result = sqlx::query("DELETE FROM products")
            .execute(pool)
            .await
            .map_err(|e| AppError::from(e).with_context("Failed to clear products"))?;
        Ok(result.rows_affected())
    }

    /// Number of stored rows
    ///
    /// # Errors
    ///
    /// Returns an error if the count query fails
    pub async fn count(&self) -> AppResult<i64> {
        let pool = self.pool().await?;
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await
            .map_err(|e| AppError::from(e).with_context("Failed to count products"))?;
        Ok(count)
    }
}

#[async_trait]
impl FoodStore for SqliteFoodStore {
    async fn search(&self, needle: &str, max_rows: usize) -> AppResult<Vec<NutrientRow>> {
        let pool = self.pool().await?;
        let needle = needle.trim().to_lowercase();

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE product_name IS NOT NULL AND instr(lower(product_name), $1) > 0
             ORDER BY
                CASE
                    WHEN lower(trim(product_name)) = $1 THEN 0
                    WHEN instr(product_name, ',') = 0
                        AND (brand IS NULL OR trim(brand) = '') THEN 1
                    WHEN length(trim(product_name))
                        - length(replace(trim(product_name), ' ', '')) <= {SHORT_NAME_MAX_SPACES} THEN 2
                    ELSE 3
                END ASC,
                length(trim(product_name)) ASC,
                max(coalesce(CAST(sugar AS REAL), 0), 0) DESC,
                rowid ASC
             LIMIT $2"
        );
        let rows = sqlx::query(&sql)
            .bind(&needle)
            .bind(sql_limit(max_rows))
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::from(e).with_context("Failed to search products"))?;

        debug!(needle = %needle, matches = rows.len(), "product index search");
        Ok(rows.iter().filter_map(row_to_nutrient_row).collect())
    }

    async fn load_all(&self, max_rows: usize) -> AppResult<Vec<NutrientRow>> {
        let pool = self.pool().await?;
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE product_name IS NOT NULL
             ORDER BY rowid ASC
             LIMIT $1"
        );
        let rows = sqlx::query(&sql)
            .bind(sql_limit(max_rows))
            .fetch_all(pool)
            .await
            .map_err(|e| AppError::from(e).with_context("Failed to load products"))?;

        Ok(rows.iter().filter_map(row_to_nutrient_row).collect())
    }
}

async fn open_pool(config: &DatabaseConfig) -> AppResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .map_err(|e| {
            AppError::config_invalid(format!("Invalid database url '{}': {e}", config.url))
        })?
        .read_only(config.read_only)
        .create_if_missing(!config.read_only);

    // Every connection to an in-memory database is its own database
    let max_connections = if config.is_memory() {
        1
    } else {
        config.max_connections
    };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(|e| {
            AppError::store_unavailable(format!("Failed to open product index: {e}")).with_source(e)
        })?;

    info!(
        url = %config.url,
        read_only = config.read_only,
        max_connections,
        "product index pool opened"
    );
    Ok(pool)
}

fn insert_query(
    row: &NutrientRow,
) -> sqlx::query::Query<'_, sqlx::Sqlite, sqlx::sqlite::SqliteArguments<'_>> {
    sqlx::query(
        r"
        INSERT INTO products
            (product_name, brand, calories, sugar, fiber, protein, fat, sodium_mg, carbs, nova_group)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        ",
    )
    .bind(row.name.trim().to_lowercase())
    .bind(row.brand_trimmed().map(str::to_owned))
    .bind(row.calories)
    .bind(row.sugar_g)
    .bind(row.fiber_g)
    .bind(row.protein_g)
    .bind(row.fat_g)
    .bind(row.sodium_mg)
    .bind(row.carbs_g)
    .bind(row.nova_group.map(|g| i64::from(g.value())))
}

fn sql_limit(max_rows: usize) -> i64 {
    i64::try_from(max_rows).unwrap_or(i64::MAX)
}

fn optional_real(row: &SqliteRow, column: &str) -> Option<f64> {
    row.try_get::<Option<f64>, _>(column).ok().flatten()
}

/// Rows without a usable name are skipped; unreadable numbers become zero
fn row_to_nutrient_row(row: &SqliteRow) -> Option<NutrientRow> {
    let name: String = row.try_get::<Option<String>, _>("product_name").ok().flatten()?;
    if name.trim().is_empty() {
        return None;
    }
    let brand = row.try_get::<Option<String>, _>("brand").ok().flatten();

    let mut nutrient_row = NutrientRow::new(name, brand);
    nutrient_row.calories = normalize_nutrient(optional_real(row, "calories"));
    nutrient_row.sugar_g = normalize_nutrient(optional_real(row, "sugar"));
    nutrient_row.fiber_g = normalize_nutrient(optional_real(row, "fiber"));
    nutrient_row.protein_g = normalize_nutrient(optional_real(row, "protein"));
    nutrient_row.fat_g = normalize_nutrient(optional_real(row, "fat"));
    nutrient_row.sodium_mg = normalize_nutrient(optional_real(row, "sodium_mg"));
    nutrient_row.carbs_g = optional_real(row, "carbs").map(|c| normalize_nutrient(Some(c)));
    nutrient_row.nova_group = optional_real(row, "nova_group").and_then(NovaGroup::from_lossy);
    Some(nutrient_row)
}
