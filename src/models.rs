// Data models: the post record every source produces, and the result types
// the scoring engine hands back.
//
// Timestamps are UTC from the moment a post is constructed; sources convert
// at ingestion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A supported social platform.
///
/// Adding a platform means adding it to `ALL`, which cross-platform
/// detection iterates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Threads,
    Instagram,
}

impl Platform {
    /// Every supported platform, in display order.
    pub const ALL: [Platform; 2] = [Platform::Threads, Platform::Instagram];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Threads => "threads",
            Platform::Instagram => "instagram",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What kind of media a post carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Text,
    Image,
    Video,
    /// Instagram multi-image album
    Carousel,
}

/// A single post, normalized into the shape the scorers expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub platform: Platform,
    pub author: String,
    pub text: String,
    #[serde(default)]
    pub content_type: ContentType,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub shares: u64,
    #[serde(default)]
    pub views: u64,
    /// Platform-specific repost count (Threads only today)
    #[serde(default)]
    pub reposts: u64,
    #[serde(default)]
    pub hashtags: Vec<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub is_business_account: bool,
    /// The platform itself marked this post as sponsored
    #[serde(default)]
    pub has_platform_sponsor_flag: bool,
    /// Author's follower count. `None` means unknown, never zero.
    #[serde(default)]
    pub follower_count: Option<u64>,
}

impl Post {
    /// A post with every counter and hint at its default.
    pub fn new(
        id: impl Into<String>,
        platform: Platform,
        text: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            platform,
            author: "unknown".to_string(),
            text: text.into(),
            content_type: ContentType::default(),
            created_at,
            likes: 0,
            comments: 0,
            shares: 0,
            views: 0,
            reposts: 0,
            hashtags: Vec::new(),
            url: String::new(),
            is_business_account: false,
            has_platform_sponsor_flag: false,
            follower_count: None,
        }
    }

    /// Sum of every engagement counter.
    ///
    /// Overlapping metrics (a viewer who also liked) are counted twice; the
    /// scorers only need a monotonic measure of attention.
    pub fn total_engagement(&self) -> u64 {
        self.likes
            .saturating_add(self.comments)
            .saturating_add(self.shares)
            .saturating_add(self.views)
            .saturating_add(self.reposts)
    }
}

/// Organic vs. paid verdict for a post or a whole topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromotionLabel {
    Organic,
    Paid,
    Uncertain,
}

impl PromotionLabel {
    /// Classify a promotion probability.
    ///
    /// Both boundaries are inclusive on the outer side: 0.7 is Paid and 0.3
    /// is Organic, leaving the open interval between them Uncertain.
    pub fn from_probability(probability: f64) -> Self {
        match probability {
            p if p >= PAID_THRESHOLD => PromotionLabel::Paid,
            p if p <= ORGANIC_THRESHOLD => PromotionLabel::Organic,
            _ => PromotionLabel::Uncertain,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PromotionLabel::Organic => "organic",
            PromotionLabel::Paid => "paid",
            PromotionLabel::Uncertain => "uncertain",
        }
    }
}

impl std::fmt::Display for PromotionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Probability at or above which a post is labelled Paid.
pub const PAID_THRESHOLD: f64 = 0.7;
/// Probability at or below which a post is labelled Organic.
pub const ORGANIC_THRESHOLD: f64 = 0.3;

/// The individual signals behind one post's promotion verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PromotionSignal {
    pub keyword_detected: bool,
    pub platform_sponsor_flag: bool,
    pub engagement_anomaly: bool,
    pub burst_pattern: bool,
    pub business_account: bool,
    /// Weighted sum of the signals, rounded to 3 decimals (0.0-1.0)
    pub probability: f64,
}

impl PromotionSignal {
    pub fn label(&self) -> PromotionLabel {
        PromotionLabel::from_probability(self.probability)
    }
}

/// Trend tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLevel {
    NoTrend,
    LowActivity,
    Rising,
    Trending,
    Hot,
}

impl TrendLevel {
    /// Determine the tier from a trend score (0-100).
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => TrendLevel::Hot,
            s if s >= 60.0 => TrendLevel::Trending,
            s if s >= 40.0 => TrendLevel::Rising,
            s if s >= 20.0 => TrendLevel::LowActivity,
            _ => TrendLevel::NoTrend,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLevel::NoTrend => "No Trend",
            TrendLevel::LowActivity => "Low Activity",
            TrendLevel::Rising => "Rising",
            TrendLevel::Trending => "Trending",
            TrendLevel::Hot => "Hot Trend",
        }
    }
}

impl std::fmt::Display for TrendLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything one `analyze` call learned about a topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    pub topic: String,

    pub velocity_score: f64,
    pub volume_score: f64,
    pub amplification_score: f64,
    pub trend_score: f64,
    /// Export snapshot of `TrendLevel::from_score(trend_score)`, written by
    /// the detector so JSON reports are self-describing. Code reading a
    /// result should call `trend_level()`, which always derives from the
    /// score, including for deserialized or hand-built results.
    pub trend_level: TrendLevel,

    pub total_posts: usize,
    pub threads_count: usize,
    pub instagram_count: usize,
    pub is_cross_platform: bool,

    pub organic_count: usize,
    pub paid_count: usize,
    pub uncertain_count: usize,
    pub dominant_label: PromotionLabel,
    pub organic_ratio: f64,

    /// Highest-engagement posts, at most five
    pub top_posts: Vec<Post>,
}

/// Organic ratio reported when there are no posts to classify.
pub const EMPTY_ORGANIC_RATIO: f64 = 1.0;

impl TrendResult {
    /// The zero result for a topic with no posts.
    ///
    /// With nothing to classify the verdict defaults to organic.
    pub fn empty(topic: &str) -> Self {
        Self {
            topic: topic.to_string(),
            velocity_score: 0.0,
            volume_score: 0.0,
            amplification_score: 0.0,
            trend_score: 0.0,
            trend_level: TrendLevel::NoTrend,
            total_posts: 0,
            threads_count: 0,
            instagram_count: 0,
            is_cross_platform: false,
            organic_count: 0,
            paid_count: 0,
            uncertain_count: 0,
            dominant_label: PromotionLabel::Organic,
            organic_ratio: EMPTY_ORGANIC_RATIO,
            top_posts: Vec::new(),
        }
    }

    /// The tier for `trend_score`, derived fresh on every call.
    pub fn trend_level(&self) -> TrendLevel {
        TrendLevel::from_score(self.trend_score)
    }

    /// Post count for one platform.
    pub fn platform_count(&self, platform: Platform) -> usize {
        match platform {
            Platform::Threads => self.threads_count,
            Platform::Instagram => self.instagram_count,
        }
    }
}
