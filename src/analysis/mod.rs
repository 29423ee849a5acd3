//! AI collaborator for qualitative comment analysis and outline generation.

pub mod gemini;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::records::CommentRecord;
use crate::Result;

pub use gemini::GeminiAnalyzer;

/// Qualitative analysis of a video's comment section.
///
/// Deserialized from the collaborator's JSON output and passed through as
/// returned; the core does not validate or reshape it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub sentiment: String,
    pub positive_points: Vec<String>,
    pub negative_points: Vec<String>,
    pub user_needs: Vec<String>,
    pub content_ideas: Vec<String>,
    /// The provider is prompted for exactly five follow-up keywords
    pub recommended_keywords: Vec<String>,
}

/// Trait for AI analysis providers
#[async_trait]
pub trait ContentAnalyzer: Send + Sync {
    /// Analyze viewer comments for the video titled `title`.
    async fn analyze(
        &self,
        title: &str,
        comments: &[CommentRecord],
        api_key: &str,
    ) -> Result<AnalysisReport>;

    /// Generate a markdown script outline for a follow-up video on `keyword`.
    async fn script_outline(
        &self,
        keyword: &str,
        original_title: &str,
        api_key: &str,
    ) -> Result<String>;
}
