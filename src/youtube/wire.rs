//! Wire types for YouTube Data API v3 responses.
//!
//! Every response body may carry an `error` envelope instead of `items`; the
//! client checks that envelope before touching any success-path field. Counts
//! in statistics payloads arrive as JSON strings and normalize to zero when
//! missing or unparsable.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Provider-reported error payload
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub error: Option<ApiError>,
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchItem {
    pub id: SearchItemId,
    pub snippet: SearchSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchItemId {
    pub video_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchSnippet {
    pub title: String,
    pub channel_id: String,
    pub channel_title: String,
    pub published_at: DateTime<Utc>,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Thumbnails {
    pub high: Option<Thumbnail>,
    pub medium: Option<Thumbnail>,
    #[serde(rename = "default")]
    pub fallback: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: String,
}

impl Thumbnails {
    /// Largest available variant; search results normally carry all three.
    pub fn best_url(&self) -> String {
        self.high
            .as_ref()
            .or(self.medium.as_ref())
            .or(self.fallback.as_ref())
            .map(|thumb| thumb.url.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    pub error: Option<ApiError>,
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideoItem {
    pub id: String,
    pub statistics: Option<VideoStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub comment_count: Option<String>,
}

impl VideoStatistics {
    pub fn views(&self) -> u64 {
        parse_count(self.view_count.as_deref())
    }

    pub fn likes(&self) -> u64 {
        parse_count(self.like_count.as_deref())
    }

    pub fn comments(&self) -> u64 {
        parse_count(self.comment_count.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelListResponse {
    pub error: Option<ApiError>,
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChannelItem {
    pub id: String,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChannelStatistics {
    /// Absent when the channel hides its subscriber count
    pub subscriber_count: Option<String>,
}

impl ChannelStatistics {
    pub fn subscribers(&self) -> u64 {
        parse_count(self.subscriber_count.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThreadsResponse {
    pub error: Option<ApiError>,
    #[serde(default)]
    pub items: Vec<CommentThread>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommentThread {
    pub snippet: CommentThreadSnippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentThreadSnippet {
    pub top_level_comment: TopLevelComment,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TopLevelComment {
    pub snippet: CommentSnippet,
}

/// Unlike video statistics, comment like counts arrive as JSON numbers.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommentSnippet {
    pub author_display_name: String,
    pub text_display: String,
    #[serde(default)]
    pub like_count: u64,
}

fn parse_count(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.parse().ok()).unwrap_or(0)
}
