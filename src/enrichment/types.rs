// src/enrichment/types.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRecord {
    pub name: String,
    pub keyword: String,
    pub website: String,
    pub phone: Option<String>,
}

/// A business record whose `website` has been narrowed down to a single
/// canonical candidate (possibly empty when no usable candidate exists).
/// The raw sheet phone column is dropped here; scraped numbers replace it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedRecord {
    pub name: String,
    pub keyword: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteSignals {
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub social_media_links: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedRecord {
    pub name: String,
    pub keyword: String,
    pub website: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub social_media_links: Vec<String>,
}

impl EnrichedRecord {
    pub fn from_parts(record: ResolvedRecord, signals: SiteSignals) -> Self {
        Self {
            name: record.name,
            keyword: record.keyword,
            website: record.website,
            emails: signals.emails,
            phone_numbers: signals.phone_numbers,
            social_media_links: signals.social_media_links,
        }
    }
}

/// Run-wide tallies, owned by the pipeline driver and folded over the
/// enriched output rather than mutated from inside the orchestrator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub sites_with_email: usize,
    pub total_emails: usize,
}

impl RunCounters {
    pub fn observe(&mut self, record: &EnrichedRecord) {
        if !record.emails.is_empty() {
            self.sites_with_email += 1;
            self.total_emails += record.emails.len();
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub request_timeout_seconds: u64,
    pub webdriver_url: String,
    pub headless: bool,
    pub render_wait_timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; ContactScraper/1.0)".to_string(),
            request_timeout_seconds: 30,
            webdriver_url: "http://localhost:4444".to_string(),
            headless: true,
            render_wait_timeout_seconds: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enriched(emails: Vec<&str>) -> EnrichedRecord {
        EnrichedRecord {
            name: "Joe's Pizza".to_string(),
            keyword: "pizza".to_string(),
            website: "joespizza.com".to_string(),
            emails: emails.into_iter().map(String::from).collect(),
            phone_numbers: vec![],
            social_media_links: vec![],
        }
    }

    #[test]
    fn counters_track_sites_and_email_totals() {
        let mut counters = RunCounters::default();
        counters.observe(&enriched(vec!["a@b.com", "c@d.com"]));
        counters.observe(&enriched(vec![]));
        counters.observe(&enriched(vec!["e@f.com"]));

        assert_eq!(counters.sites_with_email, 2);
        assert_eq!(counters.total_emails, 3);
    }

    #[test]
    fn enriched_record_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(enriched(vec!["a@b.com"])).unwrap();
        assert!(value.get("phoneNumbers").is_some());
        assert!(value.get("socialMediaLinks").is_some());
        assert!(value.get("emails").is_some());
        assert!(value.get("phone_numbers").is_none());
    }
}
