//! Multi-source aggregation client for the YouTube Data API v3.
//!
//! A search runs as three fetch stages: keyword search, batch video
//! statistics, batch channel statistics. The statistics and channel lookups
//! both depend only on the search output and are issued concurrently; the
//! join waits for both before emitting any record. A provider-reported error
//! at any stage fails the whole aggregation with no partial results.

mod wire;

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use tracing::debug;

use crate::records::{CommentRecord, VideoRecord};
use crate::score::compute_viral_score;
use crate::{Error, Result, Stage};

const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
const SEARCH_PAGE_SIZE: u32 = 20;
const COMMENT_PAGE_SIZE: u32 = 50;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Duration buckets offered by the search surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DurationFilter {
    #[default]
    Any,
    Short,
    Long,
}

impl DurationFilter {
    /// Upstream `videoDuration` parameter value.
    ///
    /// The provider buckets are short (<4 min), medium (4-20 min) and long
    /// (>20 min). The dashboard's "long" option deliberately maps to the
    /// provider's *medium* bucket; the mapping comes from the product's own
    /// duration taxonomy, not from the provider's bucket of the same name.
    fn bucket(self) -> Option<&'static str> {
        match self {
            DurationFilter::Any => None,
            DurationFilter::Short => Some("short"),
            DurationFilter::Long => Some("medium"),
        }
    }
}

/// Client for the upstream video-data provider.
///
/// Holds only the HTTP connection pool. The API credential is supplied per
/// call, so a changed credential takes effect on the next request without
/// rebuilding the client.
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
}

impl YouTubeClient {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Search videos by keyword and aggregate statistics into scored records.
    ///
    /// Returns one record per search result, in the provider's relevance
    /// order, with every count normalized to a non-negative integer and the
    /// viral score computed from the joined data. Zero search results yield
    /// an empty list without issuing the statistics or channel requests.
    pub async fn search(
        &self,
        keyword: &str,
        api_key: &str,
        duration: DurationFilter,
    ) -> Result<Vec<VideoRecord>> {
        if api_key.is_empty() {
            return Err(Error::MissingCredential);
        }

        let items = self.search_stage(keyword, api_key, duration).await?;
        if items.is_empty() {
            debug!("No search results for keyword '{}'", keyword);
            return Ok(Vec::new());
        }

        let video_ids: Vec<&str> = items.iter().map(|item| item.id.video_id.as_str()).collect();
        let channel_ids = dedup_preserving_order(
            items.iter().map(|item| item.snippet.channel_id.as_str()),
        );

        // Both lookups depend only on the search output, so issue them
        // concurrently and join once both complete.
        let (statistics, subscribers) = tokio::try_join!(
            self.video_statistics(&video_ids, api_key),
            self.channel_subscribers(&channel_ids, api_key),
        )?;

        Ok(join_records(items, &statistics, &subscribers))
    }

    /// Fetch up to 50 top-level comment threads in relevance order.
    ///
    /// Each thread contributes exactly its top-level comment; replies are
    /// not flattened in. A video with no visible comments yields an empty
    /// list rather than an error.
    pub async fn fetch_comments(
        &self,
        video_id: &str,
        api_key: &str,
    ) -> Result<Vec<CommentRecord>> {
        if api_key.is_empty() {
            return Err(Error::MissingCredential);
        }

        debug!("Fetching comment threads for video {}", video_id);

        let url = format!("{}/commentThreads", self.base_url);
        let response: wire::CommentThreadsResponse = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet".to_string()),
                ("videoId", video_id.to_string()),
                ("maxResults", COMMENT_PAGE_SIZE.to_string()),
                ("order", "relevance".to_string()),
                ("key", api_key.to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(upstream(Stage::Comments, error));
        }

        Ok(response
            .items
            .into_iter()
            .map(|thread| {
                let comment = thread.snippet.top_level_comment.snippet;
                CommentRecord {
                    author: comment.author_display_name,
                    text: comment.text_display,
                    like_count: comment.like_count,
                }
            })
            .collect())
    }

    async fn search_stage(
        &self,
        keyword: &str,
        api_key: &str,
        duration: DurationFilter,
    ) -> Result<Vec<wire::SearchItem>> {
        debug!("Searching videos for keyword '{}'", keyword);

        let url = format!("{}/search", self.base_url);
        let mut query = vec![
            ("part", "snippet".to_string()),
            ("maxResults", SEARCH_PAGE_SIZE.to_string()),
            ("q", keyword.to_string()),
            ("type", "video".to_string()),
            ("key", api_key.to_string()),
        ];
        if let Some(bucket) = duration.bucket() {
            query.push(("videoDuration", bucket.to_string()));
        }

        let response: wire::SearchResponse = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(upstream(Stage::Search, error));
        }

        Ok(response.items)
    }

    async fn video_statistics(
        &self,
        video_ids: &[&str],
        api_key: &str,
    ) -> Result<HashMap<String, wire::VideoStatistics>> {
        debug!("Fetching statistics for {} videos", video_ids.len());

        let url = format!("{}/videos", self.base_url);
        let response: wire::VideoListResponse = self
            .client
            .get(&url)
            .query(&[
                ("part", "statistics".to_string()),
                ("id", video_ids.join(",")),
                ("key", api_key.to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(upstream(Stage::Statistics, error));
        }

        Ok(response
            .items
            .into_iter()
            .map(|item| (item.id, item.statistics.unwrap_or_default()))
            .collect())
    }

    async fn channel_subscribers(
        &self,
        channel_ids: &[String],
        api_key: &str,
    ) -> Result<HashMap<String, u64>> {
        debug!("Fetching subscriber counts for {} channels", channel_ids.len());

        let url = format!("{}/channels", self.base_url);
        let response: wire::ChannelListResponse = self
            .client
            .get(&url)
            .query(&[
                ("part", "statistics".to_string()),
                ("id", channel_ids.join(",")),
                ("key", api_key.to_string()),
            ])
            .send()
            .await?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(upstream(Stage::Channel, error));
        }

        Ok(response
            .items
            .into_iter()
            .map(|item| {
                let subscribers = item
                    .statistics
                    .map(|stats| stats.subscribers())
                    .unwrap_or(0);
                (item.id, subscribers)
            })
            .collect())
    }
}

impl Default for YouTubeClient {
    fn default() -> Self {
        Self::new()
    }
}

fn upstream(stage: Stage, error: wire::ApiError) -> Error {
    Error::UpstreamApi {
        stage,
        message: error
            .message
            .unwrap_or_else(|| "upstream error with no message".to_string()),
    }
}

/// Channels can own several returned videos; the batch lookup wants each id
/// once, in first-seen order.
fn dedup_preserving_order<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Join the three fetch stages into one denormalized record per search item.
///
/// Every search item yields exactly one record; statistics or subscriber
/// data missing for an id normalizes to zero instead of dropping the row.
fn join_records(
    items: Vec<wire::SearchItem>,
    statistics: &HashMap<String, wire::VideoStatistics>,
    subscribers: &HashMap<String, u64>,
) -> Vec<VideoRecord> {
    items
        .into_iter()
        .map(|item| {
            let video_id = item.id.video_id;
            let snippet = item.snippet;

            let (views, likes, comments) = statistics
                .get(&video_id)
                .map(|stats| (stats.views(), stats.likes(), stats.comments()))
                .unwrap_or((0, 0, 0));
            let subscriber_count = subscribers
                .get(&snippet.channel_id)
                .copied()
                .unwrap_or(0);

            VideoRecord {
                id: video_id,
                title: snippet.title,
                thumbnail_url: snippet.thumbnails.best_url(),
                channel_title: snippet.channel_title,
                channel_id: snippet.channel_id,
                published_at: snippet.published_at,
                view_count: views,
                like_count: likes,
                comment_count: comments,
                subscriber_count,
                viral_score: compute_viral_score(views, subscriber_count),
            }
        })
        .collect()
}
