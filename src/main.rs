use models::Result;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod enrichment;
mod models;
mod pipeline;
mod sources;

use config::{load_config, Config};
use pipeline::Pipeline;
use sources::GoogleSheetSource;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    std::env::set_var(
        "RUST_LOG",
        format!("contact_scraper={},hyper=warn", config.logging.level),
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("contact_scraper=info".parse().unwrap()),
        )
        .init();

    info!(
        "🕷️  Starting enrichment of {} sheets (batch size {})",
        config.source.sheet_ids.len(),
        config.scraping.batch_size
    );

    let source = GoogleSheetSource::new(
        config.source.spreadsheet_id.clone(),
        Duration::from_secs(config.scraping.request_timeout_seconds),
    );
    let pipeline = Pipeline::new(config.clone(), Box::new(source));

    tokio::select! {
        report = pipeline.run() => {
            pipeline::report_summary(&report);
            pipeline::export_report(&report, &config.output).await?;
        }
        _ = signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
