// Instagram hashtag search via the Instagram Graph API.
//
// Two steps, because the API only understands hashtag IDs:
// 1. GET /ig_hashtag_search?q=<tag>&user_id=<account> -> hashtag id
// 2. GET /<hashtag id>/recent_media?user_id=...&fields=... -> paginated media
//
// Only media from the last 24 hours is returned, 50 per page, and promoted
// media is excluded by the API. An account may search 30 unique hashtags per
// 7 days.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::client::GraphClient;
use super::normalize;
use super::traits::PostSource;
use crate::models::{ContentType, Platform, Post};

/// Fields requested for each media item.
pub const INSTAGRAM_FIELDS: &str =
    "id,caption,timestamp,like_count,comments_count,media_type,permalink";

/// Largest page `recent_media` returns.
pub const MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, Deserialize)]
pub struct HashtagSearchResponse {
    #[serde(default)]
    pub data: Vec<HashtagId>,
}

#[derive(Debug, Deserialize)]
pub struct HashtagId {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct RecentMediaResponse {
    #[serde(default)]
    pub data: Vec<InstagramMedia>,
    pub paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
pub struct Paging {
    pub next: Option<String>,
}

/// One media item as the Graph API returns it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InstagramMedia {
    #[serde(default)]
    pub id: String,
    pub caption: Option<String>,
    pub timestamp: Option<String>,
    pub like_count: Option<u64>,
    pub comments_count: Option<u64>,
    pub media_type: Option<String>,
    pub permalink: Option<String>,
}

impl InstagramMedia {
    /// Convert into a normalized post. Hashtag search doesn't expose the
    /// author, so it stays "unknown".
    pub fn into_post(self, fetched_at: DateTime<Utc>) -> Post {
        let caption = self.caption.unwrap_or_default();
        let content_type = match self.media_type.as_deref() {
            Some("VIDEO") => ContentType::Video,
            Some("CAROUSEL_ALBUM") => ContentType::Carousel,
            _ => ContentType::Image,
        };

        let mut post = Post::new(
            self.id,
            Platform::Instagram,
            caption,
            normalize::parse_timestamp(self.timestamp.as_deref(), fetched_at),
        );
        post.content_type = content_type;
        post.likes = self.like_count.unwrap_or(0);
        post.comments = self.comments_count.unwrap_or(0);
        post.url = self.permalink.unwrap_or_default();
        post.hashtags = normalize::extract_hashtags(&post.text);
        post.has_platform_sponsor_flag = normalize::has_sponsor_label(&post.text);
        post
    }
}

/// Hashtag search against the Instagram Graph API.
pub struct InstagramSource {
    client: GraphClient,
    business_account_id: String,
}

impl InstagramSource {
    pub fn new(base_url: &str, access_token: &str, business_account_id: &str) -> Result<Self> {
        Ok(Self {
            client: GraphClient::new(base_url, access_token)?,
            business_account_id: business_account_id.to_string(),
        })
    }

    /// Resolve a topic to its hashtag ID. `None` when Instagram has no such tag.
    pub async fn hashtag_id(&self, topic: &str) -> Result<Option<String>> {
        let tag = normalize::topic_to_hashtag(topic);
        if tag.is_empty() {
            return Ok(None);
        }

        let response: HashtagSearchResponse = self
            .client
            .get(
                "ig_hashtag_search",
                &[("q", tag.as_str()), ("user_id", self.business_account_id.as_str())],
            )
            .await?;

        Ok(response.data.into_iter().next().map(|h| h.id))
    }

    /// Collect up to `limit` recent media items for a hashtag ID, following
    /// pagination links.
    pub async fn recent_media(&self, hashtag_id: &str, limit: usize) -> Result<Vec<Post>> {
        let mut posts = Vec::new();
        let page_size = limit.min(MAX_PAGE_SIZE).to_string();
        let path = format!("{hashtag_id}/recent_media");

        let mut page: RecentMediaResponse = self
            .client
            .get(
                &path,
                &[
                    ("user_id", self.business_account_id.as_str()),
                    ("fields", INSTAGRAM_FIELDS),
                    ("limit", page_size.as_str()),
                ],
            )
            .await?;

        loop {
            let fetched_at = Utc::now();
            let page_len = page.data.len();
            for media in page.data {
                if posts.len() >= limit {
                    break;
                }
                posts.push(media.into_post(fetched_at));
            }

            debug!(
                page_posts = page_len,
                total_collected = posts.len(),
                "Fetched page of Instagram media"
            );

            let next = page.paging.and_then(|p| p.next);
            match next {
                Some(url) if posts.len() < limit && page_len > 0 => {
                    page = self.client.get_url(&url).await?;
                }
                _ => break,
            }
        }

        Ok(posts)
    }

    /// Full two-step search, propagating errors.
    pub async fn fetch(&self, topic: &str, limit: usize) -> Result<Vec<Post>> {
        match self.hashtag_id(topic).await? {
            Some(id) => self.recent_media(&id, limit).await,
            None => {
                warn!(topic, "No Instagram hashtag found for topic");
                Ok(Vec::new())
            }
        }
    }
}

#[async_trait]
impl PostSource for InstagramSource {
    fn platform(&self) -> Platform {
        Platform::Instagram
    }

    fn name(&self) -> String {
        "Instagram".to_string()
    }

    async fn search(&self, topic: &str, limit: usize) -> Vec<Post> {
        match self.fetch(topic, limit).await {
            Ok(posts) => {
                info!(count = posts.len(), topic, "Collected Instagram posts");
                posts
            }
            Err(e) => {
                warn!(error = %e, topic, "Instagram search failed, continuing without Instagram posts");
                Vec::new()
            }
        }
    }
}
