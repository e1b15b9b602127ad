// ABOUTME: Remote fallback resolver that never fails its caller
// ABOUTME: Transport errors, timeouts and empty results all collapse into "not found"
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::score_rows;
use crate::external::RemoteFoodSource;
use crate::formatters::{MatchSource, ScoredFood};
use tracing::{debug, instrument, warn};

/// Query `source` and score its rows.
///
/// Returns `None` on any failure or when nothing usable comes back; callers
/// cannot tell an outage from a genuine miss.
#[instrument(skip(source), fields(source = source.name()))]
pub async fn resolve_remote(
    source: &dyn RemoteFoodSource,
    query: &str,
    limit: usize,
) -> Option<Vec<ScoredFood>> {
    let rows = match source.search(query, limit).await {
        Ok(rows) => rows,
        Err(e) => {
            warn!(
                error = %e,
                retryable = e.is_retryable(),
                "remote fallback failed, treating as not found"
            );
            return None;
        }
    };

    let mut results = score_rows(rows, MatchSource::Remote);
    results.truncate(limit);
    debug!(results = results.len(), "remote resolution");

    if results.is_empty() {
        None
    } else {
        Some(results)
    }
}
