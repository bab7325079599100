// Promotion detector: organic vs. paid/promoted classification for one post.
//
// Five independent signals, each a yes/no, combined with fixed weights into a
// probability. Disclosure in the text is the strongest evidence, then the
// platform's own sponsor label, then behavioral shape, then account type.
//
// Every signal degrades to "absent" when its inputs are missing, so detection
// never fails.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::models::{Post, PromotionSignal};

/// Sponsor/ad hashtags, English and Korean.
///
/// A hashtag must stand alone (start or whitespace before, whitespace or end
/// after) so "#ad" does not fire inside "#adventure".
const SPONSOR_HASHTAGS: &[&str] = &["#ad", "#sponsored", "#광고", "#스폰서"];

/// Multi-word disclosures. They match anywhere and tolerate any spacing
/// between the words, including none.
const SPONSOR_PHRASES: &[&[&str]] = &[
    &["paid", "partnership"],
    &["sponsored", "post"],
    &["브랜디드", "콘텐츠"],
    &["광고", "포함"],
];

/// Whitespace as captions actually contain it. regex-lite's `\s` is ASCII
/// only, so NBSP (common in Instagram captions), the ideographic space and
/// the other Unicode separators are listed explicitly.
const WHITESPACE: &str =
    r"[\s\x{85}\x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}]";

static SPONSOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let hashtags = SPONSOR_HASHTAGS
        .iter()
        .map(|tag| format!("(?:^|{WHITESPACE}){tag}(?:{WHITESPACE}|$)"));
    let gap = format!("{WHITESPACE}*");
    let phrases = SPONSOR_PHRASES.iter().map(|words| words.join(gap.as_str()));
    let alternation = hashtags.chain(phrases).collect::<Vec<_>>().join("|");
    Regex::new(&format!("(?i)(?:{alternation})")).expect("sponsor patterns are valid regex")
});

/// Signal weights. They sum to exactly 1.0, so the probability never needs
/// clamping.
pub const WEIGHT_KEYWORD: f64 = 0.35;
pub const WEIGHT_PLATFORM_FLAG: f64 = 0.30;
pub const WEIGHT_ENGAGEMENT_ANOMALY: f64 = 0.15;
pub const WEIGHT_BURST: f64 = 0.10;
pub const WEIGHT_BUSINESS: f64 = 0.10;

/// Likes per follower above which engagement looks bought.
pub const ENGAGEMENT_ANOMALY_RATE: f64 = 0.10;

/// Like-to-view ratio below which reach looks paid rather than earned.
pub const BURST_LIKE_VIEW_RATIO: f64 = 0.005;
/// Likes above which zero comments looks like purchased likes.
pub const BURST_MIN_LIKES_WITHOUT_COMMENTS: u64 = 100;

/// Stateless organic/paid classifier.
///
/// Holds no data; a single instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromotionDetector;

impl PromotionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate all five signals for a post.
    pub fn detect(&self, post: &Post) -> PromotionSignal {
        let keyword_detected = has_sponsor_keyword(&post.text);
        let platform_sponsor_flag = post.has_platform_sponsor_flag;
        let engagement_anomaly = is_engagement_anomaly(post.likes, post.follower_count);
        let burst_pattern = is_burst_pattern(post.likes, post.views, post.comments);
        let business_account = post.is_business_account;

        let probability = combine_signals(
            keyword_detected,
            platform_sponsor_flag,
            engagement_anomaly,
            burst_pattern,
            business_account,
        );

        PromotionSignal {
            keyword_detected,
            platform_sponsor_flag,
            engagement_anomaly,
            burst_pattern,
            business_account,
            probability,
        }
    }
}

/// True when the text carries a sponsor/ad disclosure.
pub fn has_sponsor_keyword(text: &str) -> bool {
    SPONSOR_REGEX.is_match(text)
}

/// True when likes exceed 10% of the author's followers.
///
/// Unknown or zero follower counts can't be evaluated and return false.
pub fn is_engagement_anomaly(likes: u64, follower_count: Option<u64>) -> bool {
    match follower_count {
        Some(followers) if followers > 0 => {
            likes as f64 / followers as f64 > ENGAGEMENT_ANOMALY_RATE
        }
        _ => false,
    }
}

/// Single-snapshot proxy for a promotional engagement shape.
///
/// Either condition is enough:
/// - many impressions but almost no likes (paid reach, no interest)
/// - lots of likes with no discussion at all (bought likes)
pub fn is_burst_pattern(likes: u64, views: u64, comments: u64) -> bool {
    let low_like_rate =
        views > 0 && likes > 0 && (likes as f64 / views as f64) < BURST_LIKE_VIEW_RATIO;
    let silent_likes = likes > BURST_MIN_LIKES_WITHOUT_COMMENTS && comments == 0;
    low_like_rate || silent_likes
}

/// Weighted sum of the signals, rounded to 3 decimals.
pub fn combine_signals(
    keyword: bool,
    platform_flag: bool,
    engagement_anomaly: bool,
    burst: bool,
    business: bool,
) -> f64 {
    let indicator = |on: bool| if on { 1.0 } else { 0.0 };
    let sum = indicator(keyword) * WEIGHT_KEYWORD
        + indicator(platform_flag) * WEIGHT_PLATFORM_FLAG
        + indicator(engagement_anomaly) * WEIGHT_ENGAGEMENT_ANOMALY
        + indicator(burst) * WEIGHT_BURST
        + indicator(business) * WEIGHT_BUSINESS;
    (sum * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let sum = WEIGHT_KEYWORD
            + WEIGHT_PLATFORM_FLAG
            + WEIGHT_ENGAGEMENT_ANOMALY
            + WEIGHT_BURST
            + WEIGHT_BUSINESS;
        assert!((sum - 1.0).abs() < 1e-12, "weights sum to {sum}");
    }

    #[test]
    fn weights_are_pinned() {
        assert_eq!(WEIGHT_KEYWORD, 0.35);
        assert_eq!(WEIGHT_PLATFORM_FLAG, 0.30);
        assert_eq!(WEIGHT_ENGAGEMENT_ANOMALY, 0.15);
        assert_eq!(WEIGHT_BURST, 0.10);
        assert_eq!(WEIGHT_BUSINESS, 0.10);
    }

    #[test]
    fn all_signals_round_to_exactly_one() {
        assert_eq!(combine_signals(true, true, true, true, true), 1.0);
    }

    #[test]
    fn no_signals_is_zero() {
        assert_eq!(combine_signals(false, false, false, false, false), 0.0);
    }

    #[test]
    fn hashtag_needs_word_boundary() {
        assert!(has_sponsor_keyword("#ad"));
        assert!(has_sponsor_keyword("#ad at the start"));
        assert!(!has_sponsor_keyword("#adventure time"));
        assert!(!has_sponsor_keyword("mid#ad"));
    }

    #[test]
    fn unicode_spaces_count_as_boundaries() {
        assert!(has_sponsor_keyword("great stuff\u{00A0}#ad"));
        assert!(has_sponsor_keyword("#ad\u{00A0}link in bio"));
        assert!(has_sponsor_keyword("오늘의 추천\u{3000}#광고"));
        assert!(has_sponsor_keyword("광고\u{3000}포함"));
        assert!(has_sponsor_keyword("paid\u{2009}partnership"));
        assert!(!has_sponsor_keyword("\u{00A0}#adventure"));
    }

    #[test]
    fn phrases_match_case_insensitively() {
        assert!(has_sponsor_keyword("PAID PARTNERSHIP with a brand"));
        assert!(has_sponsor_keyword("this is a Sponsored Post"));
        assert!(has_sponsor_keyword("paidpartnership"));
    }
}
