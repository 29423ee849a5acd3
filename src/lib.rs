/// Viral Scout - content-research core
///
/// Library backing a content-research dashboard: keyword video search ranked
/// by a virality heuristic (views relative to channel subscribers), local
/// threshold filtering over the ranked list, comment retrieval, and an AI
/// comment-analysis collaborator for qualitative insights.

pub mod analysis;
pub mod config;
pub mod ranking;
pub mod records;
pub mod score;
pub mod youtube;

// Re-export main types for easy access
pub use crate::analysis::{AnalysisReport, ContentAnalyzer, GeminiAnalyzer};
pub use crate::config::Config;
pub use crate::ranking::{filter_by_min_score, rank};
pub use crate::records::{CommentRecord, VideoRecord};
pub use crate::score::compute_viral_score;
pub use crate::youtube::{DurationFilter, YouTubeClient};

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline stage a provider-reported failure originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Search,
    Statistics,
    Channel,
    Comments,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Search => "search",
            Stage::Statistics => "statistics",
            Stage::Channel => "channel",
            Stage::Comments => "comments",
        };
        f.write_str(name)
    }
}

/// Error types for core operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("API credential is missing")]
    MissingCredential,

    #[error("upstream API error in {stage} stage: {message}")]
    UpstreamApi { stage: Stage, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("analysis provider error: {0}")]
    Analysis(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
