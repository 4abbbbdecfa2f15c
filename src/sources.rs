use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::enrichment::{BusinessRecord, EnrichError};
use crate::models::Result;

/// Where business records come from. One implementation per upstream;
/// the pipeline only ever sees this trait.
#[async_trait]
pub trait RecordSource: Send + Sync {
    fn name(&self) -> &str;

    /// Returns the records of one sheet, in sheet order.
    async fn fetch_records(&self, sheet_id: u64) -> Result<Vec<BusinessRecord>>;
}

/// Pulls rows from a publicly shared Google Sheets spreadsheet through
/// the gviz endpoint, which needs no credentials.
pub struct GoogleSheetSource {
    client: reqwest::Client,
    spreadsheet_id: String,
}

impl GoogleSheetSource {
    pub fn new(spreadsheet_id: String, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            spreadsheet_id,
        }
    }
}

#[async_trait]
impl RecordSource for GoogleSheetSource {
    fn name(&self) -> &str {
        "google-sheets"
    }

    async fn fetch_records(&self, sheet_id: u64) -> Result<Vec<BusinessRecord>> {
        let url = format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq?gid={}",
            self.spreadsheet_id, sheet_id
        );
        debug!("Fetching sheet: {}", url);

        let payload = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_gviz_records(&payload)
    }
}

#[derive(Debug, Deserialize)]
struct GvizResponse {
    table: GvizTable,
}

#[derive(Debug, Deserialize)]
struct GvizTable {
    cols: Vec<GvizColumn>,
    rows: Vec<GvizRow>,
}

#[derive(Debug, Deserialize)]
struct GvizColumn {
    #[serde(default)]
    label: String,
}

#[derive(Debug, Deserialize)]
struct GvizRow {
    #[serde(default)]
    c: Vec<Option<GvizCell>>,
}

#[derive(Debug, Deserialize)]
struct GvizCell {
    #[serde(default)]
    v: Option<Value>,
}

/// The gviz endpoint wraps its JSON in a
/// `google.visualization.Query.setResponse(...)` call; unwrap it, then
/// map labeled columns onto record fields.
pub fn parse_gviz_records(payload: &str) -> Result<Vec<BusinessRecord>> {
    let start = payload.find('{').ok_or_else(|| parse_error(payload))?;
    let end = payload.rfind('}').ok_or_else(|| parse_error(payload))?;
    let response: GvizResponse = serde_json::from_str(&payload[start..=end])?;

    let column = |wanted: &str| {
        response
            .table
            .cols
            .iter()
            .position(|col| col.label.eq_ignore_ascii_case(wanted))
    };
    let name_col = column("name");
    let keyword_col = column("keyword");
    let website_col = column("website");
    let phone_col = column("phone");

    let records: Vec<BusinessRecord> = response
        .table
        .rows
        .iter()
        .map(|row| BusinessRecord {
            name: cell_text(row, name_col).unwrap_or_default(),
            keyword: cell_text(row, keyword_col).unwrap_or_default(),
            website: cell_text(row, website_col).unwrap_or_default(),
            phone: cell_text(row, phone_col),
        })
        .filter(|record| !record.name.is_empty() || !record.website.is_empty())
        .collect();

    debug!("Parsed {} records from sheet payload", records.len());
    Ok(records)
}

fn cell_text(row: &GvizRow, index: Option<usize>) -> Option<String> {
    let cell = row.c.get(index?)?.as_ref()?;
    match cell.v.as_ref()? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn parse_error(payload: &str) -> EnrichError {
    EnrichError::Parse {
        context: "sheet response".to_string(),
        reason: format!("no JSON object in {} bytes of payload", payload.len()),
    }
}
