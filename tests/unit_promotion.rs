// Unit tests for the promotion detector.
//
// Each signal in isolation, the probability arithmetic, and the label
// boundaries (0.7 is Paid, 0.3 is Organic).

use chrono::Utc;

use trendwatch::models::{Platform, Post, PromotionLabel};
use trendwatch::scoring::promotion::{
    combine_signals, has_sponsor_keyword, is_burst_pattern, is_engagement_anomaly,
    PromotionDetector,
};

fn post(text: &str) -> Post {
    Post::new("p1", Platform::Threads, text, Utc::now())
}

// ============================================================
// Keyword signal
// ============================================================

#[test]
fn keyword_hashtag_at_end_is_detected() {
    assert!(has_sponsor_keyword("check this out #ad"));
}

#[test]
fn keyword_no_false_positive_inside_word() {
    assert!(!has_sponsor_keyword("I upgraded my ads manager"));
}

#[test]
fn keyword_hashtag_followed_by_letters_is_not_detected() {
    assert!(!has_sponsor_keyword("weekend #adventure with friends"));
    assert!(!has_sponsor_keyword("#sponsoredby nobody"));
}

#[test]
fn keyword_case_insensitive_hashtags() {
    assert!(has_sponsor_keyword("New drop #AD"));
    assert!(has_sponsor_keyword("#Sponsored\nlink in bio"));
}

#[test]
fn keyword_korean_disclosures() {
    assert!(has_sponsor_keyword("오늘의 추천 #광고"));
    assert!(has_sponsor_keyword("#스폰서 제품 리뷰"));
    assert!(has_sponsor_keyword("이 게시물은 브랜디드 콘텐츠 입니다"));
    assert!(has_sponsor_keyword("광고포함 게시물"));
}

#[test]
fn keyword_multi_word_phrases_match_as_substrings() {
    assert!(has_sponsor_keyword("(Paid Partnership) with @brand"));
    assert!(has_sponsor_keyword("a sponsored   post about shoes"));
}

#[test]
fn keyword_unicode_whitespace_boundaries() {
    // NBSP and the ideographic space are common in Instagram captions
    assert!(has_sponsor_keyword("great stuff\u{00A0}#ad"));
    assert!(has_sponsor_keyword("오늘의 추천\u{3000}#광고"));
    assert!(has_sponsor_keyword("광고\u{3000}포함"));
    assert!(has_sponsor_keyword("Paid\u{00A0}partnership with @brand"));
    assert!(!has_sponsor_keyword("weekend\u{00A0}#adventure"));

    let signal = PromotionDetector::new().detect(&post("new drop\u{00A0}#sponsored"));
    assert!(signal.keyword_detected);
    assert_eq!(signal.probability, 0.35);
}

#[test]
fn keyword_plain_text_is_clean() {
    assert!(!has_sponsor_keyword("Just had the best coffee in town"));
    assert!(!has_sponsor_keyword(""));
}

// ============================================================
// Engagement anomaly
// ============================================================

#[test]
fn anomaly_twenty_percent_is_true() {
    assert!(is_engagement_anomaly(200, Some(1000)));
}

#[test]
fn anomaly_one_percent_is_false() {
    assert!(!is_engagement_anomaly(100, Some(10_000)));
}

#[test]
fn anomaly_unknown_followers_is_false() {
    assert!(!is_engagement_anomaly(1_000_000, None));
}

#[test]
fn anomaly_zero_followers_is_false() {
    assert!(!is_engagement_anomaly(50, Some(0)));
}

#[test]
fn anomaly_exactly_ten_percent_is_false() {
    // Strictly greater than 10%
    assert!(!is_engagement_anomaly(100, Some(1000)));
}

// ============================================================
// Burst pattern
// ============================================================

#[test]
fn burst_low_like_to_view_ratio() {
    // 100 / 1_000_000 = 0.0001 < 0.005
    assert!(is_burst_pattern(100, 1_000_000, 10));
}

#[test]
fn burst_likes_without_comments() {
    assert!(is_burst_pattern(500, 0, 0));
}

#[test]
fn burst_normal_engagement_is_false() {
    // 50 / 500 = 0.1, and there are comments
    assert!(!is_burst_pattern(50, 500, 5));
}

#[test]
fn burst_zero_likes_never_trips_ratio() {
    assert!(!is_burst_pattern(0, 1_000_000, 0));
}

#[test]
fn burst_exactly_one_hundred_likes_without_comments_is_false() {
    assert!(!is_burst_pattern(100, 0, 0));
}

// ============================================================
// Probability and label
// ============================================================

#[test]
fn probability_matches_weighted_sum_for_every_combination() {
    let weights = [0.35, 0.30, 0.15, 0.10, 0.10];
    for mask in 0u32..32 {
        let on = |bit: u32| mask & (1 << bit) != 0;
        let p = combine_signals(on(0), on(1), on(2), on(3), on(4));
        let expected: f64 = (0..5).filter(|&b| on(b)).map(|b| weights[b as usize]).sum();
        assert!((0.0..=1.0).contains(&p), "mask {mask}: {p} out of range");
        assert!(
            (p - expected).abs() < 0.0005,
            "mask {mask}: expected {expected}, got {p}"
        );
        // Already rounded to 3 decimals
        assert_eq!(p, (p * 1000.0).round() / 1000.0);
    }
}

#[test]
fn label_boundaries() {
    assert_eq!(PromotionLabel::from_probability(0.7), PromotionLabel::Paid);
    assert_eq!(PromotionLabel::from_probability(0.3), PromotionLabel::Organic);
    assert_eq!(PromotionLabel::from_probability(0.699), PromotionLabel::Uncertain);
    assert_eq!(PromotionLabel::from_probability(0.301), PromotionLabel::Uncertain);
    assert_eq!(PromotionLabel::from_probability(0.0), PromotionLabel::Organic);
    assert_eq!(PromotionLabel::from_probability(1.0), PromotionLabel::Paid);
}

#[test]
fn detect_exactly_point_seven_is_paid() {
    // keyword 0.35 + anomaly 0.15 + burst 0.10 + business 0.10 = 0.70
    let mut p = post("new collab #ad");
    p.likes = 200;
    p.comments = 0;
    p.follower_count = Some(1000);
    p.is_business_account = true;

    let signal = PromotionDetector::new().detect(&p);
    assert!(signal.keyword_detected);
    assert!(signal.engagement_anomaly);
    assert!(signal.burst_pattern);
    assert!(signal.business_account);
    assert!(!signal.platform_sponsor_flag);
    assert_eq!(signal.probability, 0.7);
    assert_eq!(signal.label(), PromotionLabel::Paid);
}

#[test]
fn detect_exactly_point_three_is_organic() {
    let mut p = post("nothing to see here");
    p.has_platform_sponsor_flag = true;

    let signal = PromotionDetector::new().detect(&p);
    assert_eq!(signal.probability, 0.3);
    assert_eq!(signal.label(), PromotionLabel::Organic);
}

#[test]
fn detect_keyword_alone_is_uncertain() {
    let signal = PromotionDetector::new().detect(&post("loving these #sponsored shoes"));
    assert_eq!(signal.probability, 0.35);
    assert_eq!(signal.label(), PromotionLabel::Uncertain);
}

#[test]
fn detect_disclosure_plus_platform_flag_plus_business_is_paid() {
    let mut p = post("Paid partnership with @brand");
    p.has_platform_sponsor_flag = true;
    p.is_business_account = true;

    let signal = PromotionDetector::new().detect(&p);
    assert_eq!(signal.probability, 0.75);
    assert_eq!(signal.label(), PromotionLabel::Paid);
}

#[test]
fn detect_all_signals_is_one() {
    let mut p = post("#ad");
    p.likes = 5000;
    p.comments = 0;
    p.follower_count = Some(100);
    p.has_platform_sponsor_flag = true;
    p.is_business_account = true;

    let signal = PromotionDetector::new().detect(&p);
    assert_eq!(signal.probability, 1.0);
    assert_eq!(signal.label(), PromotionLabel::Paid);
}

#[test]
fn detect_bare_post_is_organic_zero() {
    let signal = PromotionDetector::new().detect(&post(""));
    assert_eq!(signal.probability, 0.0);
    assert_eq!(signal.label(), PromotionLabel::Organic);
}

#[test]
fn detect_is_deterministic() {
    let mut p = post("check this out #ad");
    p.likes = 150;
    p.views = 100_000;
    let detector = PromotionDetector::new();
    assert_eq!(detector.detect(&p), detector.detect(&p));
}
