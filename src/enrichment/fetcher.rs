use regex::Regex;
use std::time::Duration;
use thirtyfour::{error::WebDriverError, By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tracing::{debug, warn};

use super::error::EnrichError;
use super::types::FetchConfig;

pub struct SiteFetcher {
    client: reqwest::Client,
    webdriver_url: String,
    headless: bool,
    render_wait: Duration,
    email_regex: Regex,
}

impl SiteFetcher {
    pub fn new(config: &FetchConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            webdriver_url: config.webdriver_url.clone(),
            headless: config.headless,
            render_wait: Duration::from_secs(config.render_wait_timeout_seconds),
            email_regex: Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap(),
        }
    }

    /// Plain GET of a page body, no script execution.
    pub async fn fetch_static(&self, url: &str) -> Result<String, EnrichError> {
        debug!("Fetching: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|source| EnrichError::Fetch {
                url: url.to_string(),
                source,
            })?;

        let body = response.text().await.map_err(|source| EnrichError::Fetch {
            url: url.to_string(),
            source,
        })?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }

    /// Loads a social profile in a real browser session and scans the
    /// rendered span/anchor text for the first email-shaped value. The
    /// session is torn down on every exit path.
    pub async fn fetch_rendered_email(&self, profile_url: &str) -> Result<Option<String>, EnrichError> {
        let url = normalize_facebook_url(profile_url);
        debug!("Rendering: {}", url);

        let mut caps = DesiredCapabilities::chrome();
        if self.headless {
            caps.set_headless().map_err(|e| render_error(&url, &e))?;
        }

        let driver = WebDriver::new(&self.webdriver_url, caps)
            .await
            .map_err(|e| render_error(&url, &e))?;

        let outcome = self.scan_rendered_text(&driver, &url).await;

        if let Err(e) = driver.quit().await {
            warn!("Failed to shut down rendered session for {}: {}", url, e);
        }

        outcome
    }

    async fn scan_rendered_text(
        &self,
        driver: &WebDriver,
        url: &str,
    ) -> Result<Option<String>, EnrichError> {
        driver.goto(url).await.map_err(|e| render_error(url, &e))?;

        let texts = tokio::time::timeout(self.render_wait, wait_for_rendered_text(driver))
            .await
            .map_err(|_| EnrichError::Render {
                url: url.to_string(),
                reason: format!("no rendered text within {}s", self.render_wait.as_secs()),
            })?
            .map_err(|e| render_error(url, &e))?;

        Ok(texts
            .into_iter()
            .map(|text| text.trim().to_string())
            .find(|text| self.email_regex.is_match(text)))
    }
}

/// Polls until the page has rendered at least one span or anchor with
/// non-empty text, then returns all of their texts.
async fn wait_for_rendered_text(driver: &WebDriver) -> Result<Vec<String>, WebDriverError> {
    loop {
        let mut texts = Vec::new();
        for element in driver.find_all(By::Css("span, a")).await? {
            texts.push(element.text().await?);
        }

        if texts.iter().any(|text| !text.trim().is_empty()) {
            return Ok(texts);
        }

        tokio::time::sleep(Duration::from_millis(250)).await;
    }
}

/// Profile links scraped out of anchors come with tracking prefixes and
/// scheme variants; restart the URL at the `facebook.com/` marker when it
/// is present, otherwise pass the link through unchanged.
pub fn normalize_facebook_url(url: &str) -> String {
    match url.find("facebook.com/") {
        Some(start) => format!("https://{}", &url[start..]),
        None => url.to_string(),
    }
}

fn render_error(url: &str, source: &WebDriverError) -> EnrichError {
    EnrichError::Render {
        url: url.to_string(),
        reason: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facebook_urls_are_rebuilt_from_the_marker() {
        assert_eq!(
            normalize_facebook_url("http://www.facebook.com/joespizza"),
            "https://facebook.com/joespizza"
        );
        assert_eq!(
            normalize_facebook_url("https://l.redirect.net/?u=https://m.facebook.com/joes"),
            "https://facebook.com/joes"
        );
    }

    #[test]
    fn non_facebook_urls_pass_through() {
        assert_eq!(
            normalize_facebook_url("https://instagram.com/joes"),
            "https://instagram.com/joes"
        );
    }

    #[test]
    fn rendered_scan_accepts_only_whole_email_texts() {
        let fetcher = SiteFetcher::new(&FetchConfig::default());
        assert!(fetcher.email_regex.is_match("owner@joespizza.com"));
        assert!(!fetcher.email_regex.is_match("Write to owner@joespizza.com"));
        assert!(!fetcher.email_regex.is_match("not-an-email"));
    }
}
