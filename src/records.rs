//! Aggregated records produced by the discovery pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One denormalized video row built by the aggregation join.
///
/// All counts are always present: anything the statistics or channel stage
/// omitted for this video is normalized to zero before the record is built,
/// so consumers never see a missing numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub thumbnail_url: String,
    pub channel_title: String,
    pub channel_id: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    /// Zero when the channel hides its subscriber count
    pub subscriber_count: u64,
    /// Derived from `view_count` and `subscriber_count`, never cached stale
    pub viral_score: f64,
}

/// A single top-level viewer comment.
///
/// `text` is provider markup and untrusted; consumers must display-escape it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub author: String,
    pub text: String,
    pub like_count: u64,
}
