use serde::{Deserialize, Serialize};

use crate::enrichment::FetchConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub source: SourceConfig,
    pub scraping: ScrapingConfig,
    pub render: RenderConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    pub spreadsheet_id: String,
    pub sheet_ids: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScrapingConfig {
    /// Records enriched concurrently per batch; also the cap on
    /// simultaneous rendered browser sessions.
    pub batch_size: usize,
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RenderConfig {
    pub webdriver_url: String,
    pub headless: bool,
    pub wait_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    pub directory: String,
    pub filename: String,
    pub pretty_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig {
                spreadsheet_id: String::new(),
                sheet_ids: Vec::new(),
            },
            scraping: ScrapingConfig {
                batch_size: 30,
                request_timeout_seconds: 30,
                user_agent: "Mozilla/5.0 (compatible; ContactScraper/1.0)".to_string(),
            },
            render: RenderConfig {
                webdriver_url: "http://localhost:4444".to_string(),
                headless: true,
                wait_timeout_seconds: 20,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            output: OutputConfig {
                directory: "out".to_string(),
                filename: "contact-sites-info.json".to_string(),
                pretty_json: true,
            },
        }
    }
}

impl Config {
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.scraping.user_agent.clone(),
            request_timeout_seconds: self.scraping.request_timeout_seconds,
            webdriver_url: self.render.webdriver_url.clone(),
            headless: self.render.headless,
            render_wait_timeout_seconds: self.render.wait_timeout_seconds,
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}
