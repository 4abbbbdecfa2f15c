use super::types::BusinessRecord;

/// Directory listings sometimes put a social page or a Google business
/// site in the website column next to the real domain.
const SOCIAL_SITE_MARKERS: [&str; 2] = ["facebook.com", "business.site"];

/// Picks the single canonical website for a record. Returns an empty
/// string when the record carries nothing usable.
pub fn resolve_website(record: &BusinessRecord) -> String {
    let raw = record.website.trim();
    if raw.is_empty() {
        return String::new();
    }

    if SOCIAL_SITE_MARKERS.iter().any(|marker| raw.contains(marker)) {
        return strip_social_markers(raw);
    }

    let mut candidates = raw.split_whitespace();
    let first = candidates.next().unwrap_or("");
    let Some(second) = candidates.next() else {
        return raw.to_string();
    };

    if first.trim_end_matches(',') == second.trim_end_matches(',') {
        return first.trim_end_matches(',').to_string();
    }

    let identity = identity_string(&record.name, &record.keyword);
    let first_score = candidate_score(&identity, &normalize_candidate(first));
    let second_score = candidate_score(&identity, &normalize_candidate(second));

    if first_score >= second_score {
        first.to_string()
    } else {
        second.to_string()
    }
}

/// Drops every whitespace- or comma-separated token that carries a social
/// marker; a record that is only markers yields an empty string.
fn strip_social_markers(raw: &str) -> String {
    raw.split([' ', ',', '\t'])
        .filter(|token| {
            !token.is_empty()
                && !SOCIAL_SITE_MARKERS
                    .iter()
                    .any(|marker| token.contains(marker))
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The string both candidates are scored against: the business name
/// squashed to its alphanumeric characters, plus the keyword.
fn identity_string(name: &str, keyword: &str) -> String {
    let squashed: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect();
    format!("{} {}", squashed, keyword.to_lowercase().replace('-', ""))
}

fn normalize_candidate(candidate: &str) -> String {
    let lowered = candidate.to_lowercase().replace('-', "");
    lowered.split('/').next().unwrap_or("").to_string()
}

fn candidate_score(identity: &str, domain: &str) -> usize {
    identity
        .split_whitespace()
        .map(|word| best_alignment(word, domain))
        .sum()
}

/// Slides `word` along `domain` and counts positions where the characters
/// coincide, keeping the best offset. This is a character-coincidence
/// count, not a longest-common-substring search; it is cheap and good
/// enough to tell two candidate domains apart.
fn best_alignment(word: &str, domain: &str) -> usize {
    let domain: Vec<char> = domain.chars().collect();
    let word: Vec<char> = word.chars().collect();

    (0..domain.len())
        .map(|offset| {
            word.iter()
                .enumerate()
                .filter(|&(position, ch)| domain.get(offset + position) == Some(ch))
                .count()
        })
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, keyword: &str, website: &str) -> BusinessRecord {
        BusinessRecord {
            name: name.to_string(),
            keyword: keyword.to_string(),
            website: website.to_string(),
            phone: None,
        }
    }

    #[test]
    fn empty_website_yields_empty_string() {
        assert_eq!(resolve_website(&record("Joe's Pizza", "pizza", "")), "");
        assert_eq!(resolve_website(&record("Joe's Pizza", "pizza", "   ")), "");
    }

    #[test]
    fn single_candidate_is_returned_unchanged() {
        let record = record("Joe's Pizza", "pizza", "joespizza.com");
        assert_eq!(resolve_website(&record), "joespizza.com");
    }

    #[test]
    fn duplicate_candidates_collapse_to_one() {
        let record = record("Joe's Pizza", "pizza", "joespizza.com, joespizza.com");
        assert_eq!(resolve_website(&record), "joespizza.com");
    }

    #[test]
    fn name_match_beats_unrelated_candidate() {
        let record = record(
            "Blue Sky Plumbing",
            "plumber",
            "randomsite.net blueskyplumbing.com",
        );
        assert_eq!(resolve_website(&record), "blueskyplumbing.com");
    }

    #[test]
    fn equally_scored_candidates_fall_back_to_the_first() {
        // Both candidates normalize to the same stem and tie on score.
        let record = record("Joe's Pizza", "pizza", "joespizza.com joes-pizza.net");
        assert_eq!(resolve_website(&record), "joespizza.com");
    }

    #[test]
    fn resolution_is_deterministic() {
        let record = record("Joe's Pizza", "pizza", "joespizza.com joes-pizza.net");
        let first = resolve_website(&record);
        for _ in 0..10 {
            assert_eq!(resolve_website(&record), first);
        }
    }

    #[test]
    fn social_marker_is_stripped_from_mixed_entries() {
        let record = record("Joe's Pizza", "pizza", "joespizza.com facebook.com");
        assert_eq!(resolve_website(&record), "joespizza.com");
    }

    #[test]
    fn marker_only_website_resolves_to_empty() {
        assert_eq!(
            resolve_website(&record("Joe's Pizza", "pizza", "facebook.com")),
            ""
        );
        assert_eq!(
            resolve_website(&record("Joe's Pizza", "pizza", "joes.business.site")),
            ""
        );
    }

    #[test]
    fn candidates_are_scored_without_hyphens_or_paths() {
        // The path segment must not contribute to the score.
        let record = record(
            "Blue Sky Plumbing",
            "plumber",
            "blue-sky-plumbing.com randomsite.net/blueskyplumbing",
        );
        assert_eq!(resolve_website(&record), "blue-sky-plumbing.com");
    }
}
