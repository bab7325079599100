// Trend detector: composite 0-100 trend score for one topic.
//
// Three sub-scores, each 0-100:
//   velocity       (40%) recency-weighted engagement per hour
//   volume         (30%) post count against a minimum threshold
//   amplification  (30%) total engagement, boosted when the topic spans platforms
//
// Alongside the score, every post runs through the promotion detector and the
// labels are tallied into a topic-level organic/paid verdict.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::config::Config;
use crate::models::{Platform, Post, PromotionLabel, TrendLevel, TrendResult};
use crate::scoring::promotion::PromotionDetector;

pub const VELOCITY_WEIGHT: f64 = 0.4;
pub const VOLUME_WEIGHT: f64 = 0.3;
pub const AMPLIFICATION_WEIGHT: f64 = 0.3;

/// Posts younger than this are treated as this old, so engagement per hour
/// can't blow up for brand-new posts.
pub const MIN_AGE_HOURS: f64 = 0.1;
/// Decay rate for posts inside the velocity window: weight = exp(-rate * age).
pub const DECAY_RATE: f64 = 0.3;
/// Weight for posts older than the velocity window.
pub const OUTSIDE_WINDOW_WEIGHT: f64 = 0.1;
/// Weighted engagement per hour that maps to a velocity score of 100.
pub const VELOCITY_REFERENCE: f64 = 1000.0;
/// Total engagement that maps to an amplification base score of 100.
pub const AMPLIFICATION_REFERENCE: f64 = 10_000.0;
/// How many top-engagement posts a result keeps.
pub const TOP_POSTS: usize = 5;

/// Tunable knobs for the trend detector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendParams {
    /// Posts older than this many hours contribute only minimally to velocity
    pub velocity_window_hours: f64,
    /// Post count at which volume reaches 100
    pub volume_threshold: u32,
    /// Amplification multiplier when posts span every platform
    pub cross_platform_boost: f64,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            velocity_window_hours: 6.0,
            volume_threshold: 10,
            cross_platform_boost: 1.5,
        }
    }
}

impl TrendParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            velocity_window_hours: config.velocity_window_hours,
            volume_threshold: config.volume_threshold,
            cross_platform_boost: config.cross_platform_boost,
        }
    }
}

/// Trend scoring engine.
///
/// Read-only after construction; safe to share across threads.
#[derive(Debug, Clone, Default)]
pub struct TrendDetector {
    params: TrendParams,
    promotion: PromotionDetector,
}

impl TrendDetector {
    pub fn new(params: TrendParams) -> Self {
        Self {
            params,
            promotion: PromotionDetector::new(),
        }
    }

    pub fn params(&self) -> &TrendParams {
        &self.params
    }

    /// Analyze a topic's posts against the current wall clock.
    pub fn analyze(&self, topic: &str, posts: &[Post]) -> TrendResult {
        self.analyze_at(topic, posts, Utc::now())
    }

    /// Analyze a topic's posts as of `now`.
    ///
    /// Every post age in one call is measured from the same `now`, so the
    /// output is reproducible given the same inputs.
    pub fn analyze_at(&self, topic: &str, posts: &[Post], now: DateTime<Utc>) -> TrendResult {
        if posts.is_empty() {
            debug!(topic, "No posts to analyze");
            return TrendResult::empty(topic);
        }

        let threads_count = count_platform(posts, Platform::Threads);
        let instagram_count = count_platform(posts, Platform::Instagram);
        let cross_platform = is_cross_platform(posts);

        let velocity = velocity_score(posts, now, self.params.velocity_window_hours);
        let volume = volume_score(posts.len(), self.params.volume_threshold);
        let amplification =
            amplification_score(posts, cross_platform, self.params.cross_platform_boost);
        let trend = composite_score(velocity, volume, amplification);

        let labels: Vec<PromotionLabel> = posts
            .iter()
            .map(|post| self.promotion.detect(post).label())
            .collect();
        let tally = LabelTally::from_labels(&labels);

        let trend_score = round_to(trend, 1);

        info!(
            topic,
            posts = posts.len(),
            velocity = format!("{:.1}", velocity),
            volume = format!("{:.1}", volume),
            amplification = format!("{:.1}", amplification),
            trend = format!("{:.1}", trend),
            cross_platform,
            dominant = tally.dominant().as_str(),
            "Analyzed topic"
        );

        TrendResult {
            topic: topic.to_string(),
            velocity_score: round_to(velocity, 1),
            volume_score: round_to(volume, 1),
            amplification_score: round_to(amplification, 1),
            trend_score,
            trend_level: TrendLevel::from_score(trend_score),
            total_posts: posts.len(),
            threads_count,
            instagram_count,
            is_cross_platform: cross_platform,
            organic_count: tally.organic,
            paid_count: tally.paid,
            uncertain_count: tally.uncertain,
            dominant_label: tally.dominant(),
            organic_ratio: round_to(tally.organic_ratio(), 2),
            top_posts: top_posts(posts, TOP_POSTS),
        }
    }
}

/// Recency-weighted engagement velocity, 0-100.
///
/// Each post contributes engagement per hour times a time weight:
/// `exp(-0.3 * age)` inside the window, a flat 0.1 outside it. The average
/// is log-compressed so 1000 weighted engagements/hour reads as 100.
pub fn velocity_score(posts: &[Post], now: DateTime<Utc>, window_hours: f64) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }

    let total: f64 = posts
        .iter()
        .map(|post| {
            let raw_age = age_hours(post, now);
            let age = raw_age.max(MIN_AGE_HOURS);
            let weight = if raw_age > window_hours {
                OUTSIDE_WINDOW_WEIGHT
            } else {
                (-DECAY_RATE * age).exp()
            };
            post.total_engagement() as f64 / age * weight
        })
        .sum();

    let avg = total / posts.len() as f64;
    log_normalize(avg, VELOCITY_REFERENCE)
}

/// Post count relative to the threshold, 0-100.
///
/// A zero threshold means any post at all counts as full volume.
pub fn volume_score(post_count: usize, threshold: u32) -> f64 {
    if threshold == 0 {
        return if post_count > 0 { 100.0 } else { 0.0 };
    }
    (post_count as f64 / f64::from(threshold) * 100.0).min(100.0)
}

/// Log-normalized total engagement, boosted for cross-platform topics, 0-100.
pub fn amplification_score(posts: &[Post], cross_platform: bool, boost: f64) -> f64 {
    if posts.is_empty() {
        return 0.0;
    }

    let total: f64 = posts.iter().map(|p| p.total_engagement() as f64).sum();
    let base = log_normalize(total, AMPLIFICATION_REFERENCE);

    if cross_platform {
        (base * boost).clamp(0.0, 100.0)
    } else {
        base
    }
}

/// Weighted combination of the three sub-scores, clamped to 0-100.
pub fn composite_score(velocity: f64, volume: f64, amplification: f64) -> f64 {
    (velocity * VELOCITY_WEIGHT + volume * VOLUME_WEIGHT + amplification * AMPLIFICATION_WEIGHT)
        .clamp(0.0, 100.0)
}

/// True when every supported platform has at least one post.
pub fn is_cross_platform(posts: &[Post]) -> bool {
    Platform::ALL
        .iter()
        .all(|platform| posts.iter().any(|p| p.platform == *platform))
}

/// The `n` highest-engagement posts, ties kept in input order.
pub fn top_posts(posts: &[Post], n: usize) -> Vec<Post> {
    let mut sorted: Vec<&Post> = posts.iter().collect();
    // sort_by is stable, so equal engagement keeps input order
    sorted.sort_by(|a, b| b.total_engagement().cmp(&a.total_engagement()));
    sorted.into_iter().take(n).cloned().collect()
}

/// Per-label counts for a batch of posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelTally {
    pub organic: usize,
    pub paid: usize,
    pub uncertain: usize,
}

impl LabelTally {
    pub fn from_labels(labels: &[PromotionLabel]) -> Self {
        let mut tally = Self::default();
        for label in labels {
            match label {
                PromotionLabel::Organic => tally.organic += 1,
                PromotionLabel::Paid => tally.paid += 1,
                PromotionLabel::Uncertain => tally.uncertain += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> usize {
        self.organic + self.paid + self.uncertain
    }

    /// Strict majority rule: a label wins only with more than half the posts.
    /// Ties and pluralities are Uncertain. An empty tally is Organic.
    pub fn dominant(&self) -> PromotionLabel {
        let total = self.total();
        if total == 0 {
            PromotionLabel::Organic
        } else if self.paid * 2 > total {
            PromotionLabel::Paid
        } else if self.organic * 2 > total {
            PromotionLabel::Organic
        } else {
            PromotionLabel::Uncertain
        }
    }

    /// Fraction of posts labelled organic; 1.0 when there are none.
    pub fn organic_ratio(&self) -> f64 {
        match self.total() {
            0 => crate::models::EMPTY_ORGANIC_RATIO,
            total => self.organic as f64 / total as f64,
        }
    }
}

fn count_platform(posts: &[Post], platform: Platform) -> usize {
    posts.iter().filter(|p| p.platform == platform).count()
}

fn age_hours(post: &Post, now: DateTime<Utc>) -> f64 {
    (now - post.created_at).num_milliseconds() as f64 / 3_600_000.0
}

/// `ln(1 + value) / ln(1 + reference) * 100`, capped at 100.
fn log_normalize(value: f64, reference: f64) -> f64 {
    (value.ln_1p() / reference.ln_1p() * 100.0).min(100.0)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
