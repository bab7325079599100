// Threads keyword search via the official Threads API.
//
// GET {base}/search?q=<topic>&search_type=RECENT&fields=...&limit=<n>
//
// Requires the threads_keyword_search permission. The API caps a page at 100
// results and rate limits to 500 queries per 7 days.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use super::client::GraphClient;
use super::normalize;
use super::traits::PostSource;
use crate::models::{ContentType, Platform, Post};

/// Fields requested for each search result.
pub const THREADS_FIELDS: &str =
    "id,text,timestamp,like_count,reply_count,repost_count,views,username,media_type";

/// Largest page the search endpoint returns.
pub const MAX_PAGE_SIZE: usize = 100;

/// Search response envelope.
#[derive(Debug, Deserialize)]
pub struct ThreadsSearchResponse {
    #[serde(default)]
    pub data: Vec<ThreadsPost>,
}

/// One post as the Threads API returns it. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadsPost {
    #[serde(default)]
    pub id: String,
    pub text: Option<String>,
    pub timestamp: Option<String>,
    pub like_count: Option<u64>,
    pub reply_count: Option<u64>,
    pub repost_count: Option<u64>,
    pub views: Option<u64>,
    pub username: Option<String>,
    pub media_type: Option<String>,
}

impl ThreadsPost {
    /// Convert into a normalized post. Missing timestamps use `fetched_at`.
    pub fn into_post(self, fetched_at: chrono::DateTime<Utc>) -> Post {
        let text = self.text.unwrap_or_default();
        let content_type = match self.media_type.as_deref() {
            Some("IMAGE") => ContentType::Image,
            Some("VIDEO") => ContentType::Video,
            Some("CAROUSEL_ALBUM") => ContentType::Carousel,
            _ => ContentType::Text,
        };

        let mut post = Post::new(
            self.id,
            Platform::Threads,
            text,
            normalize::parse_timestamp(self.timestamp.as_deref(), fetched_at),
        );
        post.author = self.username.unwrap_or_else(|| "unknown".to_string());
        post.content_type = content_type;
        post.likes = self.like_count.unwrap_or(0);
        post.comments = self.reply_count.unwrap_or(0);
        post.reposts = self.repost_count.unwrap_or(0);
        post.views = self.views.unwrap_or(0);
        post.hashtags = normalize::extract_hashtags(&post.text);
        post.has_platform_sponsor_flag = normalize::has_sponsor_label(&post.text);
        post
    }
}

/// Keyword search against the Threads API.
pub struct ThreadsSource {
    client: GraphClient,
}

impl ThreadsSource {
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        Ok(Self {
            client: GraphClient::new(base_url, access_token)?,
        })
    }

    /// Run the search, propagating HTTP and decode errors.
    pub async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<Post>> {
        let page_size = limit.min(MAX_PAGE_SIZE).to_string();
        let params = [
            ("q", topic),
            ("search_type", "RECENT"),
            ("fields", THREADS_FIELDS),
            ("limit", page_size.as_str()),
        ];

        let response: ThreadsSearchResponse = self.client.get("search", &params).await?;
        let fetched_at = Utc::now();

        Ok(response
            .data
            .into_iter()
            .take(limit)
            .map(|raw| raw.into_post(fetched_at))
            .collect())
    }
}

#[async_trait]
impl PostSource for ThreadsSource {
    fn platform(&self) -> Platform {
        Platform::Threads
    }

    fn name(&self) -> String {
        "Threads".to_string()
    }

    async fn search(&self, topic: &str, limit: usize) -> Vec<Post> {
        match self.fetch(topic, limit).await {
            Ok(posts) => {
                info!(count = posts.len(), topic, "Collected Threads posts");
                posts
            }
            Err(e) => {
                warn!(error = %e, topic, "Threads search failed, continuing without Threads posts");
                Vec::new()
            }
        }
    }
}
