// src/enrichment/batch.rs
use futures::future::join_all;
use std::future::Future;
use tracing::{debug, warn};

use super::error::EnrichError;
use super::types::{EnrichedRecord, ResolvedRecord};

/// Runs `enrich` over `records` in consecutive batches of at most
/// `batch_size`. Batches are strictly sequential; records inside a batch
/// run concurrently, which caps in-flight fetches and rendered sessions.
/// Output keeps the input order regardless of which record finishes
/// first; failed records are dropped with a warning.
pub async fn run_batches<F, Fut>(
    records: Vec<ResolvedRecord>,
    batch_size: usize,
    enrich: F,
) -> Vec<EnrichedRecord>
where
    F: Fn(ResolvedRecord) -> Fut,
    Fut: Future<Output = Result<EnrichedRecord, EnrichError>>,
{
    let batch_size = batch_size.max(1);
    let mut enriched = Vec::with_capacity(records.len());

    for (index, batch) in records.chunks(batch_size).enumerate() {
        debug!("Processing batch {} ({} records)", index + 1, batch.len());

        let results = join_all(batch.iter().cloned().map(&enrich)).await;
        for (record, result) in batch.iter().zip(results) {
            match result {
                Ok(item) => enriched.push(item),
                Err(e) => warn!("Dropping '{}' from results: {}", record.name, e),
            }
        }
    }

    enriched
}
