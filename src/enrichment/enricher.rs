// src/enrichment/enricher.rs
use scraper::Html;
use tracing::{debug, info, warn};
use url::Url;

use super::error::EnrichError;
use super::extractor::{clean_and_dedup, ContactExtractor};
use super::fetcher::SiteFetcher;
use super::types::{EnrichedRecord, FetchConfig, ResolvedRecord, SiteSignals};

pub struct Enricher {
    fetcher: SiteFetcher,
    extractor: ContactExtractor,
}

impl Enricher {
    pub fn new(config: &FetchConfig) -> Self {
        Self {
            fetcher: SiteFetcher::new(config),
            extractor: ContactExtractor::new(),
        }
    }

    /// Gathers contact signals for one resolved record: three concurrent
    /// static fetch-and-extract passes, then the rendered Facebook
    /// fallback when the page itself surfaced no email.
    pub async fn enrich(&self, record: ResolvedRecord) -> Result<EnrichedRecord, EnrichError> {
        if record.website.is_empty() {
            return Err(EnrichError::Resolution {
                business: record.name,
            });
        }

        let site_url = Url::parse(&format!("https://{}/", record.website))
            .map_err(|_| EnrichError::Resolution {
                business: record.name.clone(),
            })?
            .to_string();

        let (emails, phone_numbers, social_media_links) = tokio::join!(
            self.scrape_emails(&site_url),
            self.scrape_phone_numbers(&site_url),
            self.scrape_social_links(&site_url),
        );

        // A site that failed all three ways is unreachable; drop the record.
        let (emails, phone_numbers, social_media_links) =
            match (emails, phone_numbers, social_media_links) {
                (Err(e), Err(_), Err(_)) => return Err(e),
                (emails, phone_numbers, social_media_links) => (
                    collected_or_empty(emails, "emails", &record.name),
                    collected_or_empty(phone_numbers, "phone numbers", &record.name),
                    collected_or_empty(social_media_links, "social links", &record.name),
                ),
            };

        let mut signals = SiteSignals {
            emails,
            phone_numbers,
            social_media_links,
        };

        if signals.emails.is_empty() {
            if let Some(profile) = signals
                .social_media_links
                .iter()
                .find(|link| link.contains("facebook"))
            {
                match self.fetcher.fetch_rendered_email(profile).await {
                    Ok(Some(email)) => {
                        info!("Recovered rendered email for {}", record.name);
                        signals.emails.push(email);
                        signals.emails = clean_and_dedup(signals.emails);
                    }
                    Ok(None) => debug!("No email in rendered profile for {}", record.name),
                    Err(e) => warn!("Rendered fallback failed for {}: {}", record.name, e),
                }
            }
        }

        Ok(EnrichedRecord::from_parts(record, signals))
    }

    async fn scrape_emails(&self, url: &str) -> Result<Vec<String>, EnrichError> {
        let body = self.fetcher.fetch_static(url).await?;
        let document = Html::parse_document(&body);
        Ok(self.extractor.extract_emails(&document))
    }

    async fn scrape_phone_numbers(&self, url: &str) -> Result<Vec<String>, EnrichError> {
        let body = self.fetcher.fetch_static(url).await?;
        let document = Html::parse_document(&body);
        Ok(self.extractor.extract_phone_numbers(&document))
    }

    async fn scrape_social_links(&self, url: &str) -> Result<Vec<String>, EnrichError> {
        let body = self.fetcher.fetch_static(url).await?;
        let document = Html::parse_document(&body);
        Ok(self.extractor.extract_social_links(&document))
    }
}

fn collected_or_empty(
    result: Result<Vec<String>, EnrichError>,
    kind: &str,
    business: &str,
) -> Vec<String> {
    match result {
        Ok(values) => values,
        Err(e) => {
            warn!("Could not collect {} for {}: {}", kind, business, e);
            Vec::new()
        }
    }
}
