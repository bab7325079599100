// Composition tests: verifying that the modules chain together correctly.
//
// These tests exercise the data flow end to end:
//   Demo source -> Trend detector (with promotion detector) -> JSON export
// without any network calls. Exports are written under the system temp dir.

use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};

use trendwatch::config::Config;
use trendwatch::models::{Platform, Post, PromotionLabel, TrendResult};
use trendwatch::output::json::{export_at, file_name};
use trendwatch::output::truncate_chars;
use trendwatch::scoring::promotion::PromotionDetector;
use trendwatch::scoring::trend::{TrendDetector, TrendParams};
use trendwatch::sources::demo::DemoSource;

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn demo_posts(topic: &str, seed: u64, per_platform: usize) -> Vec<Post> {
    Platform::ALL
        .iter()
        .flat_map(|&platform| {
            DemoSource::new(platform, Some(seed)).generate(topic, per_platform, fixed_now())
        })
        .collect()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("trendwatch-{name}-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

// ============================================================
// Chain: Demo source -> Trend detector
// ============================================================

#[test]
fn demo_posts_produce_consistent_result() {
    let posts = demo_posts("AI", 42, 30);
    let result = TrendDetector::default().analyze_at("AI", &posts, fixed_now());

    assert_eq!(result.total_posts, 60);
    assert_eq!(result.threads_count, 30);
    assert_eq!(result.instagram_count, 30);
    assert!(result.is_cross_platform);
    assert_eq!(
        result.organic_count + result.paid_count + result.uncertain_count,
        result.total_posts
    );
    for score in [
        result.velocity_score,
        result.volume_score,
        result.amplification_score,
        result.trend_score,
    ] {
        assert!((0.0..=100.0).contains(&score), "score {score} out of range");
    }
    // 60 posts is well past the default threshold of 10
    assert_eq!(result.volume_score, 100.0);
    assert!((0.0..=1.0).contains(&result.organic_ratio));
}

#[test]
fn top_posts_are_capped_and_descending() {
    let posts = demo_posts("fashion", 7, 30);
    let result = TrendDetector::default().analyze_at("fashion", &posts, fixed_now());

    assert_eq!(result.top_posts.len(), 5);
    let totals: Vec<u64> = result.top_posts.iter().map(|p| p.total_engagement()).collect();
    assert!(totals.windows(2).all(|w| w[0] >= w[1]), "not descending: {totals:?}");

    let max = posts.iter().map(|p| p.total_engagement()).max().unwrap();
    assert_eq!(totals[0], max);
}

#[test]
fn same_seed_same_result() {
    let detector = TrendDetector::default();
    let a = detector.analyze_at("rust", &demo_posts("rust", 9, 20), fixed_now());
    let b = detector.analyze_at("rust", &demo_posts("rust", 9, 20), fixed_now());
    assert_eq!(a, b);
}

#[test]
fn tally_agrees_with_per_post_detection() {
    let posts = demo_posts("coffee", 11, 25);
    let result = TrendDetector::default().analyze_at("coffee", &posts, fixed_now());

    let detector = PromotionDetector::new();
    let paid = posts
        .iter()
        .filter(|p| detector.detect(p).label() == PromotionLabel::Paid)
        .count();
    let organic = posts
        .iter()
        .filter(|p| detector.detect(p).label() == PromotionLabel::Organic)
        .count();

    assert_eq!(result.paid_count, paid);
    assert_eq!(result.organic_count, organic);
}

#[test]
fn single_platform_is_not_boosted() {
    let posts = DemoSource::new(Platform::Threads, Some(5)).generate("ai", 20, fixed_now());
    let result = TrendDetector::default().analyze_at("ai", &posts, fixed_now());
    assert!(!result.is_cross_platform);
    assert_eq!(result.instagram_count, 0);
    assert_eq!(result.threads_count, 20);
}

#[test]
fn config_knobs_reach_the_detector() {
    let config = Config::from_lookup(|key| match key {
        "TREND_VOLUME_THRESHOLD" => Some("40".to_string()),
        _ => None,
    })
    .unwrap();
    let detector = TrendDetector::new(TrendParams::from_config(&config));
    assert_eq!(detector.params().volume_threshold, 40);

    let posts = DemoSource::new(Platform::Threads, Some(3)).generate("ai", 20, fixed_now());
    let result = detector.analyze_at("ai", &posts, fixed_now());
    assert_eq!(result.volume_score, 50.0);
}

#[test]
fn unusable_boost_never_reaches_the_detector() {
    let err = Config::from_lookup(|key| match key {
        "CROSS_PLATFORM_BOOST" => Some("NaN".to_string()),
        _ => None,
    })
    .unwrap_err();
    assert!(err.to_string().contains("CROSS_PLATFORM_BOOST"), "got: {err}");
}

// ============================================================
// Chain: Trend detector -> JSON export
// ============================================================

#[test]
fn exported_json_round_trips_result() {
    let posts = demo_posts("AI tools", 42, 15);
    let result = TrendDetector::default().analyze_at("AI tools", &posts, fixed_now());

    let dir = scratch_dir("export");
    let path = export_at(&result, &dir, fixed_now()).unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "trend_AI_tools_20250601_120000.json"
    );
    assert_eq!(path, dir.join(file_name("AI tools", &fixed_now())));

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    for field in [
        "topic",
        "velocity_score",
        "volume_score",
        "amplification_score",
        "trend_score",
        "trend_level",
        "total_posts",
        "threads_count",
        "instagram_count",
        "is_cross_platform",
        "organic_count",
        "paid_count",
        "uncertain_count",
        "dominant_label",
        "organic_ratio",
        "top_posts",
    ] {
        assert!(value.get(field).is_some(), "missing field {field}");
    }
    assert_eq!(value["topic"], "AI tools");
    assert!(value["top_posts"][0]["platform"].is_string());

    let parsed: TrendResult = serde_json::from_str(&raw).unwrap();
    assert_eq!(parsed.total_posts, result.total_posts);
    assert_eq!(parsed.dominant_label, result.dominant_label);
    assert_eq!(parsed.trend_level, result.trend_level);
    let parsed_ids: Vec<&str> = parsed.top_posts.iter().map(|p| p.id.as_str()).collect();
    let ids: Vec<&str> = result.top_posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(parsed_ids, ids);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn export_of_empty_result() {
    let result = TrendDetector::default().analyze_at("nothing", &[], fixed_now());
    let dir = scratch_dir("empty");
    let path = export_at(&result, &dir, fixed_now()).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["total_posts"], 0);
    assert_eq!(value["dominant_label"], "organic");
    assert_eq!(value["trend_level"], "no_trend");
    assert_eq!(value["organic_ratio"], 1.0);

    let _ = std::fs::remove_dir_all(&dir);
}

// ============================================================
// Presentation helpers on real data
// ============================================================

#[test]
fn previews_of_hangul_topics_never_split_chars() {
    let posts = demo_posts("패션 트렌드", 3, 10);
    for post in &posts {
        let preview = truncate_chars(&post.text, 10);
        assert!(preview.chars().count() <= 13);
    }
}
