// ABOUTME: Engine-wide constants grouped by domain
// ABOUTME: Defaults, environment variable names, limits and external service names
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Constants Module
//!
//! Hardcoded defaults and names shared by the configuration layer, the store,
//! the remote client and the index builder.

/// Default configuration values
pub mod defaults {
    /// Local product index
    pub const DATABASE_URL: &str = "sqlite:./data/vantage_core.db";

    /// Pool size for the read-only product index
    pub const DATABASE_MAX_CONNECTIONS: u32 = 4;

    /// Open Food Facts public API
    pub const OPEN_FOOD_FACTS_BASE_URL: &str = "https://world.openfoodfacts.org";

    /// Remote lookup timeout
    pub const OPEN_FOOD_FACTS_TIMEOUT_SECS: u64 = 10;

    /// Open Food Facts asks clients to identify themselves
    pub const OPEN_FOOD_FACTS_USER_AGENT: &str =
        concat!("FoodVantage/", env!("CARGO_PKG_VERSION"), " (food_vantage engine)");

    /// Results returned when a caller does not pass a limit
    pub const RESULT_LIMIT: usize = 5;

    /// Substring matches fetched from the store before ranking
    pub const CANDIDATE_POOL: usize = 500;
}

/// Environment variable names
pub mod env_keys {
    /// Product index URL
    pub const DATABASE_URL: &str = "VANTAGE_DATABASE_URL";
    /// Generic database URL, consulted when the engine-specific one is unset
    pub const FALLBACK_DATABASE_URL: &str = "DATABASE_URL";
    /// Open the index read-only
    pub const DATABASE_READ_ONLY: &str = "VANTAGE_DATABASE_READ_ONLY";
    /// Pool size
    pub const DATABASE_MAX_CONNECTIONS: &str = "VANTAGE_DATABASE_MAX_CONNECTIONS";
    /// Enable the remote fallback
    pub const OFF_ENABLED: &str = "OFF_ENABLED";
    /// Remote base URL
    pub const OFF_BASE_URL: &str = "OFF_BASE_URL";
    /// Remote timeout in seconds
    pub const OFF_TIMEOUT_SECS: &str = "OFF_TIMEOUT_SECS";
    /// Remote user agent
    pub const OFF_USER_AGENT: &str = "OFF_USER_AGENT";
    /// Default result count
    pub const RESOLVER_DEFAULT_LIMIT: &str = "RESOLVER_DEFAULT_LIMIT";
    /// Store candidate pool
    pub const RESOLVER_CANDIDATE_POOL: &str = "RESOLVER_CANDIDATE_POOL";
    /// Log output format (json, pretty, compact)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}

/// Hard limits enforced by validation
pub mod limits {
    /// Longest allowed remote timeout
    pub const MAX_TIMEOUT_SECS: u64 = 60;

    /// Largest result limit a caller may request
    pub const MAX_RESULT_LIMIT: usize = 50;

    /// Rows loaded into a knowledge base
    pub const MAX_KNOWLEDGE_BASE_ROWS: usize = 200_000;

    /// Remote entries fetched per requested result, to absorb duplicates
    pub const REMOTE_OVERFETCH_FACTOR: usize = 2;

    /// Names with at most this many spaces rank as short matches
    pub const SHORT_NAME_MAX_SPACES: usize = 2;
}

/// External service names used in errors and logs
pub mod services {
    /// Open Food Facts
    pub const OPEN_FOOD_FACTS: &str = "Open Food Facts";
}

/// Service name reported in structured logs
pub mod service_names {
    /// The engine itself
    pub const FOOD_VANTAGE: &str = "food_vantage";
}
