//! Injected capability for the generative-content service. The app only
//! ever sees the `Assistant` trait; the Gemini-backed client lives behind
//! it so tests can substitute a fake. Failures never cross this boundary
//! raw — call sites fall back to the apology strings below.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::ContentRecord;
use crate::errors::AssistantError;

/// Shown in place of a summary when the service fails.
pub const SUMMARY_FALLBACK: &str = "Sorry, I couldn't generate a summary at this time.";

/// Shown in chat when a recommendation request fails.
pub const RECOMMEND_FALLBACK: &str =
    "Sorry, I'm having trouble finding a recommendation right now. Please try again.";

/// Service answer to a recommendation request. `recommended_content_id`
/// references an id from the submitted list, or is None when nothing fits.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub recommended_content_id: Option<u32>,
    pub explanation: String,
}

impl Recommendation {
    /// A null recommendation carrying a friendly message. Used both by the
    /// service ("nothing fits") and by call sites converting failures.
    pub fn none(explanation: impl Into<String>) -> Self {
        Self {
            recommended_content_id: None,
            explanation: explanation.into(),
        }
    }
}

#[async_trait]
pub trait Assistant: Send + Sync {
    /// Free-text trailer-style summary for one item.
    async fn summarize(
        &self,
        title: &str,
        description: &str,
        kind: &str,
    ) -> Result<String, AssistantError>;

    /// Recommend one item from `content` for the user's request.
    async fn recommend(
        &self,
        content: &[ContentRecord],
        user_input: &str,
    ) -> Result<Recommendation, AssistantError>;
}

/// Gemini-backed implementation.
pub struct GeminiAssistant {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<serde_json::Value>,
}

#[derive(Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiAssistant {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: "gemini-2.5-flash".to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Reads the key from `GEMINI_API_KEY`. None disables the assistant.
    pub fn from_env() -> Option<Self> {
        std::env::var("GEMINI_API_KEY").ok().map(Self::new)
    }

    async fn generate(
        &self,
        prompt: String,
        generation_config: Option<serde_json::Value>,
    ) -> Result<String, AssistantError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config,
        };
        let resp: GenerateResponse = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resp.candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text)
            .ok_or_else(|| AssistantError::BadResponse("no candidate text".to_string()))
    }
}

#[async_trait]
impl Assistant for GeminiAssistant {
    async fn summarize(
        &self,
        title: &str,
        description: &str,
        kind: &str,
    ) -> Result<String, AssistantError> {
        let prompt = format!(
            "Write a short, exciting and cinematic summary for the {} '{}'. \
             The official description is: '{}'. Make it sound like a movie \
             trailer voice-over. Do not start with \"Here is a summary\".",
            kind.to_lowercase(),
            title,
            description
        );
        self.generate(prompt, None).await
    }

    async fn recommend(
        &self,
        content: &[ContentRecord],
        user_input: &str,
    ) -> Result<Recommendation, AssistantError> {
        // Reduce records to the fields the model needs.
        let content_list: Vec<serde_json::Value> = content
            .iter()
            .map(|c| {
                serde_json::json!({
                    "id": c.id,
                    "title": c.title,
                    "genre": c.genre,
                    "year": c.year,
                    "type": c.kind.display_name(),
                    "description": c.description,
                })
            })
            .collect();

        let prompt = format!(
            "You are an expert content recommender for a streaming service.\n\
             Based on the user's request, you must recommend ONE item from the \
             provided JSON list of available content (which includes movies, \
             TV series, and TV programs). If no content is a good fit, you \
             must not recommend one.\n\n\
             Your response MUST be a valid JSON object with the following \
             structure: {{ \"recommendedContentId\": number | null, \
             \"explanation\": \"string\" }}.\n\n\
             Content List:\n{}\n\nUser Request: \"{}\"",
            serde_json::to_string(&content_list).unwrap_or_default(),
            user_input
        );

        let generation_config = serde_json::json!({
            "responseMimeType": "application/json",
            "responseSchema": {
                "type": "OBJECT",
                "properties": {
                    "recommendedContentId": { "type": "INTEGER", "nullable": true },
                    "explanation": { "type": "STRING" }
                },
                "required": ["recommendedContentId", "explanation"]
            }
        });

        let text = self.generate(prompt, Some(generation_config)).await?;
        let mut rec: Recommendation = serde_json::from_str(&text)
            .map_err(|e| AssistantError::BadResponse(e.to_string()))?;

        // The contract requires the id to come from the submitted list.
        if let Some(id) = rec.recommended_content_id {
            if !content.iter().any(|c| c.id == id) {
                warn!(id, "model recommended an unknown id, dropping it");
                rec.recommended_content_id = None;
            }
        }
        Ok(rec)
    }
}
