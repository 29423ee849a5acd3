//! Gemini-backed implementation of the analysis collaborator.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{AnalysisReport, ContentAnalyzer};
use crate::records::CommentRecord;
use crate::{Error, Result};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub(crate) const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Gemini provider for comment analysis and script outlines.
///
/// Like the video-data client, the API credential is supplied per call
/// rather than stored, so credential changes apply immediately.
pub struct GeminiAnalyzer {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GeminiGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

impl GeminiAnalyzer {
    pub fn new() -> Self {
        Self::with_model(DEFAULT_MODEL)
    }

    pub fn with_model(model: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            model: model.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        }
    }

    async fn generate(&self, request: GeminiRequest, api_key: &str) -> Result<String> {
        if api_key.is_empty() {
            return Err(Error::MissingCredential);
        }

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );

        debug!("Sending request to Gemini model {}", self.model);

        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Analysis(format!("Gemini API error {}: {}", status, text)));
        }

        let gemini_response: GeminiResponse = response.json().await?;

        gemini_response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| Error::Analysis("empty response from Gemini".to_string()))
    }
}

impl Default for GeminiAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentAnalyzer for GeminiAnalyzer {
    async fn analyze(
        &self,
        title: &str,
        comments: &[CommentRecord],
        api_key: &str,
    ) -> Result<AnalysisReport> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: analysis_prompt(title, comments),
                }],
            }],
            generation_config: Some(GeminiGenerationConfig {
                response_mime_type: "application/json".to_string(),
            }),
        };

        let text = self.generate(request, api_key).await?;
        let report = serde_json::from_str(text.trim())?;
        Ok(report)
    }

    async fn script_outline(
        &self,
        keyword: &str,
        original_title: &str,
        api_key: &str,
    ) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: outline_prompt(keyword, original_title),
                }],
            }],
            generation_config: None,
        };

        self.generate(request, api_key).await
    }
}

fn analysis_prompt(title: &str, comments: &[CommentRecord]) -> String {
    let comment_lines = comments
        .iter()
        .map(|comment| format!("- {}", comment.text))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Video title: \"{}\"\n\
        Viewer comments:\n{}\n\n\
        Analyze these comments and extract:\n\
        1. The overall viewer sentiment (positive/negative/neutral)\n\
        2. What viewers praised\n\
        3. What viewers found lacking\n\
        4. Latent needs viewers are curious about\n\
        5. At least three concrete follow-up video ideas based on this analysis\n\
        6. Exactly five core keywords connecting the video's topic and viewer interest\n\n\
        Respond only with a JSON object using the keys sentiment (string), \
        positivePoints, negativePoints, userNeeds, contentIdeas and \
        recommendedKeywords (arrays of strings).",
        title, comment_lines
    )
}

fn outline_prompt(keyword: &str, original_title: &str) -> String {
    format!(
        "Original video title: \"{}\"\n\
        Selected follow-up keyword: \"{}\"\n\n\
        Write a concrete, well-structured script outline for a new video on \
        this keyword, designed to hold viewer attention:\n\
        1. Hook intro (0-30 seconds)\n\
        2. Problem statement and relatability\n\
        3. Core information or solution, step by step\n\
        4. A twist or bonus tip\n\
        5. Outro with a subscribe prompt\n\n\
        Format the outline as readable markdown.",
        original_title, keyword
    )
}
