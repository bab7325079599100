// Normalization helpers shared by the platform sources.
//
// Everything a raw API payload needs before it becomes a `Post`: UTC
// timestamps, hashtag extraction, the platform-side sponsor label, and the
// hashtag form of a free-text topic.

use chrono::{DateTime, Utc};
use tracing::warn;

/// Phrases the platforms use when labelling branded content. Matched as plain
/// case-insensitive substrings.
const SPONSOR_LABELS: &[&str] = &["#ad", "#sponsored", "paid partnership", "스폰서", "광고"];

/// Parse an API timestamp into UTC.
///
/// Accepts RFC 3339 (`2025-01-15T10:00:00Z`, `+09:00`) and the Graph API's
/// colon-less offset (`2025-01-15T10:00:00+0000`). Anything else falls back to
/// `fallback`, which callers set to the fetch time.
pub fn parse_timestamp(raw: Option<&str>, fallback: DateTime<Utc>) -> DateTime<Utc> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return fallback;
    };

    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z"))
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|e| {
            warn!(timestamp = raw, error = %e, "Unparseable timestamp, using fetch time");
            fallback
        })
}

/// Extract hashtags (without the `#`) in order of appearance.
///
/// A tag is a `#` followed by letters, digits or underscores in any script,
/// so Korean tags survive. regex-lite's `\w` is ASCII only, hence the scan.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '#' {
            continue;
        }
        let mut tag = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' {
                tag.push(next);
                chars.next();
            } else {
                break;
            }
        }
        if !tag.is_empty() {
            tags.push(tag);
        }
    }

    tags
}

/// Whether the text carries one of the platform's sponsor labels.
///
/// Runs of any Unicode whitespace (NBSP included) are collapsed to a single
/// space before matching.
pub fn has_sponsor_label(text: &str) -> bool {
    let lower = text
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    SPONSOR_LABELS.iter().any(|label| lower.contains(label))
}

/// Reduce a free-text topic to hashtag form: ASCII letters, digits and
/// Hangul only, lowercased. "AI Trends!" becomes "aitrends".
pub fn topic_to_hashtag(topic: &str) -> String {
    topic
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || ('가'..='힣').contains(c))
        .collect::<String>()
        .to_lowercase()
}
