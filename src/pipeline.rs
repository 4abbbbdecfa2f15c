use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info};

use crate::config::{Config, OutputConfig};
use crate::enrichment::{
    resolver, run_batches, BusinessRecord, Enricher, ResolvedRecord, RunCounters,
};
use crate::models::{Result, RunReport};
use crate::sources::RecordSource;

pub struct Pipeline {
    config: Config,
    source: Box<dyn RecordSource>,
    enricher: Enricher,
}

impl Pipeline {
    pub fn new(config: Config, source: Box<dyn RecordSource>) -> Self {
        let enricher = Enricher::new(&config.fetch_config());
        Self {
            config,
            source,
            enricher,
        }
    }

    /// Walks the configured sheets in order. Sheets are strictly
    /// sequential; concurrency only exists inside a batch. A sheet that
    /// cannot be fetched is logged and skipped, never fatal.
    pub async fn run(&self) -> RunReport {
        let started_at = Utc::now();
        let clock = Instant::now();
        let mut counters = RunCounters::default();
        let mut collected = Vec::new();

        for &sheet_id in &self.config.source.sheet_ids {
            info!("Processing sheet {} from {}", sheet_id, self.source.name());

            let records = match self.source.fetch_records(sheet_id).await {
                Ok(records) => records,
                Err(e) => {
                    error!("Skipping sheet {}: {}", sheet_id, e);
                    continue;
                }
            };
            info!("Sheet {} yielded {} records", sheet_id, records.len());

            let resolved = resolve_records(records);
            let enriched = run_batches(resolved, self.config.scraping.batch_size, |record| {
                self.enricher.enrich(record)
            })
            .await;

            for record in &enriched {
                counters.observe(record);
            }
            collected.extend(enriched);
        }

        RunReport {
            started_at,
            elapsed: clock.elapsed(),
            counters,
            records: collected,
        }
    }
}

/// Applies the domain resolver to every record; the raw sheet phone
/// column does not survive this step.
pub fn resolve_records(records: Vec<BusinessRecord>) -> Vec<ResolvedRecord> {
    records
        .into_iter()
        .map(|record| {
            let website = resolver::resolve_website(&record);
            ResolvedRecord {
                name: record.name,
                keyword: record.keyword,
                website,
            }
        })
        .collect()
}

pub fn report_summary(report: &RunReport) {
    info!(
        "Run started {} finished in {:.1}s",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.elapsed.as_secs_f64()
    );
    info!("Enriched records: {}", report.records.len());
    info!("Sites with email: {}", report.counters.sites_with_email);
    info!("Total emails: {}", report.counters.total_emails);
    debug!("Final site info: {:#?}", report.records);
}

/// Writes the accumulated records as a single JSON array, once, at the
/// end of the run.
pub async fn export_report(report: &RunReport, output: &OutputConfig) -> Result<()> {
    tokio::fs::create_dir_all(&output.directory).await?;
    let path = Path::new(&output.directory).join(&output.filename);

    let json = if output.pretty_json {
        serde_json::to_string_pretty(&report.records)?
    } else {
        serde_json::to_string(&report.records)?
    };
    tokio::fs::write(&path, json).await?;

    info!("✅ Results written to {}", path.display());
    Ok(())
}
