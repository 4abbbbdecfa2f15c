// src/enrichment/extractor.rs
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::debug;

/// Platform tokens an anchor target must contain to count as a social
/// media link.
pub const SOCIAL_MEDIA_PLATFORMS: [&str; 9] = [
    "facebook",
    "google",
    "instagram",
    "yelp",
    "twitter",
    "tiktok",
    "youtube",
    "skype",
    "linkedin",
];

pub struct ContactExtractor {
    email_regex: Regex,
    phone_regex: Regex,
}

impl ContactExtractor {
    pub fn new() -> Self {
        Self {
            // Permissive local@domain.tld shape; anything stricter loses
            // real addresses on messy pages.
            email_regex: Regex::new(r"[^\s@]+@[^\s@]+\.[^\s@]+").unwrap(),
            phone_regex: Regex::new(r"(?:\+1)?\s?\(?\d{3}\)?[\s-]\d{3}[\s-]\d{4}").unwrap(),
        }
    }

    /// Emails are picked out of span and anchor text only; body-wide
    /// scanning drags in script payloads and data attributes.
    pub fn extract_emails(&self, document: &Html) -> Vec<String> {
        let selector = Selector::parse("span, a").unwrap();
        let mut emails = Vec::new();

        for element in document.select(&selector) {
            let text = element.text().collect::<String>();
            for found in self.email_regex.find_iter(&text) {
                emails.push(found.as_str().to_string());
            }
        }

        let emails = clean_and_dedup(emails);
        debug!("Extracted {} emails", emails.len());
        emails
    }

    /// North-American numbers: optional +1, 3-3-4 grouping with optional
    /// parentheses, dashes or spaces.
    pub fn extract_phone_numbers(&self, document: &Html) -> Vec<String> {
        let selector = Selector::parse("body").unwrap();
        let mut numbers = Vec::new();

        for body in document.select(&selector) {
            let text = body.text().collect::<Vec<_>>().join(" ");
            for found in self.phone_regex.find_iter(&text) {
                numbers.push(found.as_str().to_string());
            }
        }

        let numbers = clean_and_dedup(numbers);
        debug!("Extracted {} phone numbers", numbers.len());
        numbers
    }

    pub fn extract_social_links(&self, document: &Html) -> Vec<String> {
        let selector = Selector::parse("a[href]").unwrap();
        let mut links = Vec::new();

        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                let lowered = href.to_lowercase();
                if SOCIAL_MEDIA_PLATFORMS
                    .iter()
                    .any(|platform| lowered.contains(platform))
                {
                    links.push(href.to_string());
                }
            }
        }

        let links = clean_and_dedup(links);
        debug!("Extracted {} social media links", links.len());
        links
    }
}

/// Shared signal normalization: every whitespace character is stripped,
/// the value is lowercased, and duplicates are collapsed while keeping
/// first-appearance order.
pub fn clean_and_dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();

    for value in values {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if seen.insert(normalized.clone()) {
            cleaned.push(normalized);
        }
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn emails_are_found_in_spans_and_anchors_and_normalized() {
        let document = parse(
            r#"<html><body>
            <span>Contact: Info@Example.COM </span>
            <a href="mailto:sales@shop.io">sales@shop.io</a>
            <p>hidden@paragraph.com</p>
            </body></html>"#,
        );
        let emails = ContactExtractor::new().extract_emails(&document);

        assert_eq!(emails, vec!["info@example.com", "sales@shop.io"]);
    }

    #[test]
    fn duplicate_emails_collapse_case_insensitively() {
        let document = parse(
            r#"<html><body>
            <span>INFO@example.com</span>
            <span>info@example.com</span>
            <a href="/contact">info@example.com</a>
            </body></html>"#,
        );
        let emails = ContactExtractor::new().extract_emails(&document);

        assert_eq!(emails, vec!["info@example.com"]);
    }

    #[test]
    fn phone_numbers_match_north_american_shapes() {
        let document = parse(
            r#"<html><body>
            <p>Call (555) 123-4567 today, or +1 555 987 6543.</p>
            <p>Order #123456789012 is not a phone number.</p>
            </body></html>"#,
        );
        let numbers = ContactExtractor::new().extract_phone_numbers(&document);

        assert_eq!(numbers, vec!["(555)123-4567", "+15559876543"]);
    }

    #[test]
    fn social_links_are_filtered_by_platform_token() {
        let document = parse(
            r#"<html><body>
            <a href="https://www.Facebook.com/joespizza">fb</a>
            <a href="https://instagram.com/joes">ig</a>
            <a href="https://example.com/menu">menu</a>
            </body></html>"#,
        );
        let links = ContactExtractor::new().extract_social_links(&document);

        assert_eq!(
            links,
            vec![
                "https://www.facebook.com/joespizza",
                "https://instagram.com/joes"
            ]
        );
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = clean_and_dedup(vec![
            " Info@Example.COM ".to_string(),
            "info@example.com".to_string(),
            "OWNER@shop.io\n".to_string(),
        ]);
        let twice = clean_and_dedup(once.clone());

        assert_eq!(once, twice);
    }

    #[test]
    fn normalized_values_carry_no_whitespace_or_uppercase() {
        let cleaned = clean_and_dedup(vec![
            "\tA B@c.Com\n".to_string(),
            "+1 (555) 123-4567".to_string(),
        ]);

        for value in &cleaned {
            assert!(!value.chars().any(char::is_whitespace));
            assert_eq!(value, &value.to_lowercase());
        }
    }
}
