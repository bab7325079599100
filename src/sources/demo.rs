// Demo source: realistic synthetic posts for running without API access.
//
// Meta's keyword and hashtag search permissions need app review, so the
// pipeline has to be usable before that. The generator mixes ordinary posts
// with high-engagement "trending" posts and sponsor-tagged promoted posts.
// With a seed, output is reproducible.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use super::traits::PostSource;
use crate::models::{ContentType, Platform, Post};

/// Upper bound on posts per search, whatever `limit` asks for.
pub const MAX_DEMO_POSTS: usize = 50;

const TRENDING_RATE: f64 = 0.3;
const PROMOTED_RATE: f64 = 0.2;

const AUTHORS: &[&str] = &[
    "tech_insider",
    "daily_digest",
    "trend_watcher",
    "creator_studio",
    "brand_official",
    "news_hub",
    "lifestyle_mag",
    "data_nerd",
    "social_buzz",
    "casual_user",
];

const SPONSOR_TAGS: &[&str] = &["#ad", "#sponsored", "Paid partnership"];

const CONTENT_TYPES: &[ContentType] = &[
    ContentType::Text,
    ContentType::Image,
    ContentType::Video,
    ContentType::Carousel,
];

/// Synthetic post generator for one platform.
#[derive(Debug, Clone)]
pub struct DemoSource {
    platform: Platform,
    seed: Option<u64>,
}

impl DemoSource {
    /// `seed: None` draws from OS entropy on every search.
    pub fn new(platform: Platform, seed: Option<u64>) -> Self {
        Self { platform, seed }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            // Offset per platform so both platforms don't produce mirrored data
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.platform as u64)),
            None => StdRng::from_os_rng(),
        }
    }

    /// Generate up to `limit` posts created within 24 hours before `now`.
    pub fn generate(&self, topic: &str, limit: usize, now: DateTime<Utc>) -> Vec<Post> {
        let mut rng = self.rng();
        let tag: String = topic.chars().filter(|c| !c.is_whitespace()).collect();

        (0..limit.min(MAX_DEMO_POSTS))
            .map(|i| self.generate_one(&mut rng, i, topic, &tag, now))
            .collect()
    }

    fn generate_one(
        &self,
        rng: &mut StdRng,
        index: usize,
        topic: &str,
        tag: &str,
        now: DateTime<Utc>,
    ) -> Post {
        let trending = rng.random_bool(TRENDING_RATE);
        let promoted = rng.random_bool(PROMOTED_RATE);

        let likes: u64 = if trending {
            rng.random_range(500..=10_000)
        } else {
            rng.random_range(5..=200)
        };
        let comments = (likes as f64 * rng.random_range(0.02..0.15)) as u64;
        let views = likes * rng.random_range(5..=20);

        let mut text = format!("Sharing my thoughts on {topic} #{tag}");
        if promoted {
            let sponsor = SPONSOR_TAGS.choose(rng).copied().unwrap_or("#ad");
            text.push(' ');
            text.push_str(sponsor);
        }

        let age = Duration::milliseconds((rng.random_range(0.0..24.0) * 3_600_000.0) as i64)
            + Duration::minutes(rng.random_range(0..60));

        let mut post = Post::new(
            format!("demo_{}_{index:04}", self.platform),
            self.platform,
            text,
            now - age,
        );
        post.author = AUTHORS.choose(rng).copied().unwrap_or("casual_user").to_string();
        post.content_type = CONTENT_TYPES.choose(rng).copied().unwrap_or_default();
        post.likes = likes;
        post.comments = comments;
        post.shares = rng.random_range(0..=likes / 5);
        post.views = views;
        post.reposts = match self.platform {
            Platform::Threads => rng.random_range(0..=likes / 10),
            Platform::Instagram => 0,
        };
        post.hashtags = vec![tag.to_string(), "trending".to_string()];
        post.is_business_account = promoted && rng.random_bool(0.7);
        post.has_platform_sponsor_flag = promoted && rng.random_bool(0.5);
        post.follower_count = Some(if promoted {
            rng.random_range(1_000..=500_000)
        } else {
            rng.random_range(100..=50_000)
        });
        post
    }
}

#[async_trait]
impl PostSource for DemoSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    fn name(&self) -> String {
        format!("Demo ({})", self.platform)
    }

    async fn search(&self, topic: &str, limit: usize) -> Vec<Post> {
        self.generate(topic, limit, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn same_seed_same_posts() {
        let source = DemoSource::new(Platform::Threads, Some(42));
        let a = source.generate("rust", 20, fixed_now());
        let b = source.generate("rust", 20, fixed_now());
        assert_eq!(a, b);
    }

    #[test]
    fn platforms_differ_under_one_seed() {
        let threads = DemoSource::new(Platform::Threads, Some(7)).generate("ai", 10, fixed_now());
        let insta = DemoSource::new(Platform::Instagram, Some(7)).generate("ai", 10, fixed_now());
        let threads_likes: Vec<u64> = threads.iter().map(|p| p.likes).collect();
        let insta_likes: Vec<u64> = insta.iter().map(|p| p.likes).collect();
        assert_ne!(threads_likes, insta_likes);
    }

    #[test]
    fn limit_is_capped() {
        let posts = DemoSource::new(Platform::Instagram, Some(1)).generate("ai", 500, fixed_now());
        assert_eq!(posts.len(), MAX_DEMO_POSTS);
    }

    #[test]
    fn posts_are_well_formed() {
        let now = fixed_now();
        let posts = DemoSource::new(Platform::Instagram, Some(3)).generate("AI tools", 50, now);
        for post in &posts {
            assert_eq!(post.platform, Platform::Instagram);
            assert_eq!(post.reposts, 0, "Instagram has no reposts");
            assert!(post.created_at <= now);
            assert!(post.created_at > now - Duration::hours(25));
            assert!(post.text.contains("#AItools"));
            assert!(post.follower_count.is_some());
        }
    }
}
