// ABOUTME: Integration tests for the SQLite product index
// ABOUTME: Lazy pool initialisation, substring search order, read-only mode and row decoding
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use food_vantage::config::DatabaseConfig;
use food_vantage::database::{FoodStore, SqliteFoodStore};
use std::sync::Arc;
use tempfile::TempDir;

/// File-backed index seeded with the fixtures; the directory must outlive the store
async fn create_file_index() -> Result<(TempDir, String)> {
    common::init_test_logging();
    let dir = tempfile::tempdir()?;
    let url = format!("sqlite:{}", dir.path().join("vantage_core.db").display());

    let writer = SqliteFoodStore::new(DatabaseConfig::writable(url.clone()));
    writer.migrate().await?;
    writer.insert_products(&common::fixture_rows()).await?;
    writer.pool().await?.close().await;

    Ok((dir, url))
}

fn read_only(url: &str) -> SqliteFoodStore {
    SqliteFoodStore::new(DatabaseConfig {
        url: url.to_owned(),
        ..DatabaseConfig::default()
    })
}

#[tokio::test]
async fn test_pool_opens_lazily_once() -> Result<()> {
    let (_dir, url) = create_file_index().await?;
    let store = Arc::new(read_only(&url));
    assert!(!store.is_initialized());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.search("yogurt", 10).await })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await??.len(), 4);
    }
    assert!(store.is_initialized());
    Ok(())
}

#[tokio::test]
async fn test_read_only_rejects_writes() -> Result<()> {
    let (_dir, url) = create_file_index().await?;
    let store = read_only(&url);

    let row = common::nutrient_row("kale", None, 49.0, 0.0, 4.1, 4.3, 0.9, 38.0, 1);
    assert!(store.insert_product(&row).await.is_err());
    assert_eq!(store.count().await?, 8);
    Ok(())
}

#[tokio::test]
async fn test_search_is_case_insensitive_substring() -> Result<()> {
    let store = common::create_seeded_store().await?;

    let rows = store.search("  YOGURT ", 10).await?;
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();

    // Unbranded first, sweeter first within a length, comma names last
    assert_eq!(
        names,
        vec![
            "berry yogurt",
            "plain yogurt",
            "greek yogurt",
            "yogurt drink, strawberry flavour",
        ]
    );
    Ok(())
}

async fn seed_milk_rows(store: &SqliteFoodStore) -> Result<()> {
    store
        .insert_products(&[
            common::nutrient_row("milk, whole", Some("Acme"), 61.0, 4.8, 0.0, 3.2, 3.3, 43.0, 1),
            common::nutrient_row("organic milk", None, 64.0, 5.0, 0.0, 3.3, 3.6, 44.0, 1),
            common::nutrient_row("milk aaaa", Some("Zed"), 50.0, 1.0, 0.0, 3.0, 1.0, 40.0, 2),
            common::nutrient_row("milk zzzz", Some("Zed"), 70.0, 9.0, 0.0, 3.0, 1.0, 40.0, 2),
        ])
        .await?;
    Ok(())
}

#[tokio::test]
async fn test_search_ranks_before_cutting_pool() -> Result<()> {
    let store = common::create_seeded_store().await?;
    seed_milk_rows(&store).await?;

    let names = |rows: Vec<vantage_core::models::NutrientRow>| {
        rows.into_iter().map(|r| r.name).collect::<Vec<_>>()
    };

    // A longer unbranded name outranks shorter branded ones even at pool size 1
    assert_eq!(names(store.search("milk", 1).await?), vec!["organic milk"]);

    // Equal tier and length fall to the sweeter row, not the alphabetical one
    assert_eq!(
        names(store.search("milk", 4).await?),
        vec!["organic milk", "milk zzzz", "milk aaaa", "milk, whole"]
    );
    Ok(())
}

#[tokio::test]
async fn test_exact_name_ranks_first_in_store() -> Result<()> {
    let store = common::create_seeded_store().await?;
    seed_milk_rows(&store).await?;
    store
        .insert_product(&common::nutrient_row(
            "Milk",
            Some("Dairyland"),
            42.0,
            5.0,
            0.0,
            3.4,
            1.0,
            44.0,
            1,
        ))
        .await?;

    let found = store.search("MILK", 1).await?;
    assert_eq!(found[0].name, "milk");
    assert_eq!(found[0].brand.as_deref(), Some("Dairyland"));
    Ok(())
}

#[tokio::test]
async fn test_search_respects_row_cap() -> Result<()> {
    let store = common::create_seeded_store().await?;

    assert_eq!(store.search("yogurt", 2).await?.len(), 2);
    assert!(store.search("unobtainium", 10).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_names_stored_lowercase_brand_kept() -> Result<()> {
    let store = common::create_seeded_store().await?;
    let row = common::nutrient_row("  Cola Zero ", Some("Coca-Cola"), 0.3, 0.0, 0.0, 0.0, 0.0, 10.0, 4);
    store.insert_product(&row).await?;

    let found = store.search("cola zero", 1).await?;
    assert_eq!(found[0].name, "cola zero");
    assert_eq!(found[0].brand.as_deref(), Some("Coca-Cola"));
    assert_eq!(found[0].nova_group.map(|g| g.value()), Some(4));
    Ok(())
}

#[tokio::test]
async fn test_malformed_values_decode_as_zero() -> Result<()> {
    let store = common::create_seeded_store().await?;
    let pool = store.pool().await?;

    sqlx::query(
        "INSERT INTO products (product_name, brand, calories, sugar, nova_group)
         VALUES ('mystery bar', NULL, 'n/a', -4, NULL)",
    )
    .execute(pool)
    .await?;
    sqlx::query("INSERT INTO products (product_name, calories) VALUES (NULL, 100)")
        .execute(pool)
        .await?;
    sqlx::query("INSERT INTO products (product_name, calories) VALUES ('   ', 100)")
        .execute(pool)
        .await?;

    let found = store.search("mystery", 5).await?;
    assert_eq!(found.len(), 1);
    assert!(found[0].calories.abs() < f64::EPSILON);
    assert!(found[0].sugar_g.abs() < f64::EPSILON);
    assert!(found[0].nova_group.is_none());

    // Unnamed rows never reach callers
    assert_eq!(store.load_all(100).await?.len(), 9);
    Ok(())
}

#[tokio::test]
async fn test_load_all_keeps_insert_order() -> Result<()> {
    let store = common::create_seeded_store().await?;

    let names: Vec<String> = store
        .load_all(100)
        .await?
        .into_iter()
        .map(|r| r.name)
        .collect();
    let expected: Vec<String> = common::fixture_rows().into_iter().map(|r| r.name).collect();
    assert_eq!(names, expected);

    assert_eq!(store.load_all(3).await?.len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_clear_and_count() -> Result<()> {
    let store = common::create_seeded_store().await?;

    assert_eq!(store.count().await?, 8);
    assert_eq!(store.clear().await?, 8);
    assert_eq!(store.count().await?, 0);
    assert!(store.search("salmon", 5).await?.is_empty());
    Ok(())
}
