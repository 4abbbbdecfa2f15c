use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::enrichment::{EnrichedRecord, RunCounters};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Everything one pipeline run produced: the enriched records in sheet
/// and batch order, the run-wide counters, and timing for the summary.
#[derive(Debug)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub counters: RunCounters,
    pub records: Vec<EnrichedRecord>,
}
