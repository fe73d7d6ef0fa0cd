//! # Image Analysis Module
//!
//! Asks a hosted Gemini model for the palette, aesthetic keywords and mood
//! of an image. One blocking request per analysis: no streaming, batching
//! or retry.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::Config,
    types::{AnalysisResult, ProxiedImage},
};

pub const ANALYSIS_PROMPT: &str = "Analyze this image aesthetically. Provide:
1. A creative color palette of 5 hex codes that represent the mood.
2. 5 aesthetic keywords or tags.
3. A short, poetic description of the vibe or mood (max 2 sentences).
Return ONLY a JSON object with keys: \"palette\" (array of strings), \"keywords\" (array of strings), \"description\" (string).";

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("GEMINI_API_KEY is not configured")]
    NotConfigured,

    #[error("model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model returned {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("model response has no text candidate")]
    Empty,

    #[error("model output is not an analysis: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Part {
    text: Option<String>,
}

/// Sends the image inline with [`ANALYSIS_PROMPT`] and parses the model's
/// JSON answer.
pub async fn analyze_image(
    client: &Client,
    config: &Config,
    image: &ProxiedImage,
) -> Result<AnalysisResult, AnalysisError> {
    let api_key = config
        .gemini_api_key
        .as_deref()
        .ok_or(AnalysisError::NotConfigured)?;

    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        config.gemini_api_url, config.gemini_model
    );

    let body = json!({
        "contents": [{
            "parts": [
                { "inline_data": { "mime_type": image.mime_type, "data": image.base64 } },
                { "text": ANALYSIS_PROMPT }
            ]
        }],
        "generationConfig": { "responseMimeType": "application/json" }
    });

    let res = client
        .post(&url)
        .header("x-goog-api-key", api_key)
        .json(&body)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let body = res.text().await.unwrap_or_default();
        return Err(AnalysisError::Rejected { status, body });
    }

    let response: GenerateContentResponse = res.json().await?;
    let text = first_text(&response).ok_or(AnalysisError::Empty)?;

    parse_analysis(text)
}

fn first_text(response: &GenerateContentResponse) -> Option<&str> {
    response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter())
        .find_map(|p| p.text.as_deref())
}

/// Parses model output into an [`AnalysisResult`], tolerating a Markdown
/// code fence around the JSON.
pub fn parse_analysis(text: &str) -> Result<AnalysisResult, AnalysisError> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    Ok(serde_json::from_str(unfenced.trim())?)
}
