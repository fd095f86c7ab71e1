// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini `generateContent` client.
//!
//! Backs both AI surfaces:
//! - Coaching advice (free text, with a coach system instruction)
//! - Meal plans (JSON output constrained by a response schema)
//!
//! Without an API key every call fails with `AppError::NotConfigured`,
//! which the callers turn into their documented fallbacks.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::Profile;
use crate::services::advice::AdviceService;
use crate::services::meal_plan::MealPlanService;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

/// System instruction for the coach persona.
const COACH_INSTRUCTION: &str = "You are an expert fitness coach and nutritionist at Vertex Development. \
Provide concise, science-backed advice. If asked for plans, use structured formatting.";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

// ─── Wire types ──────────────────────────────────────────────────────────────

/// `generateContent` request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn text(role: Option<&str>, text: String) -> Self {
        Self {
            role: role.map(str::to_string),
            parts: vec![Part { text: Some(text) }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

/// `generateContent` response body (only the fields we read).
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, empty if there is none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(base_url: String, model: String, api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            model,
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
        )
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one `generateContent` call and return the reply text.
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or(AppError::NotConfigured)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::AiService(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::AiService(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(map_api_error(status.as_u16(), &body));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|e| AppError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        let text = parsed.text();
        tracing::debug!(chars = text.len(), "Gemini reply received");
        Ok(text)
    }
}

#[async_trait]
impl AdviceService for GeminiClient {
    async fn advise(&self, question: &str, profile: &Profile) -> Result<String> {
        let request = advice_request(question, profile)?;
        self.generate(&request).await
    }
}

#[async_trait]
impl MealPlanService for GeminiClient {
    async fn plan_day(&self, profile: &Profile) -> Result<String> {
        let request = meal_plan_request(profile)?;
        self.generate(&request).await
    }
}

/// Translate a non-2xx reply into an error.
fn map_api_error(status: u16, body: &str) -> AppError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());

    if status == 429 {
        tracing::warn!("Gemini rate limit hit (429)");
        return AppError::AiService(format!("{}: {}", AppError::AI_RATE_LIMIT, message));
    }

    AppError::AiService(format!("HTTP {}: {}", status, message))
}

/// Request asking the coach `question` with the profile as context.
fn advice_request(question: &str, profile: &Profile) -> Result<GenerateRequest> {
    let prompt = format!(
        "User Profile: {}. User Question: {}",
        serde_json::to_string(profile)?,
        question
    );

    Ok(GenerateRequest {
        contents: vec![Content::text(Some("user"), prompt)],
        system_instruction: Some(Content::text(None, COACH_INSTRUCTION.to_string())),
        generation_config: None,
    })
}

/// Request for a one-day plan constrained to the meal schema.
fn meal_plan_request(profile: &Profile) -> Result<GenerateRequest> {
    let prompt = format!(
        "Generate a one-day healthy meal plan for someone with these stats: {}. Output strictly valid JSON.",
        serde_json::to_string(profile)?
    );

    Ok(GenerateRequest {
        contents: vec![Content::text(Some("user"), prompt)],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: meal_plan_schema(),
        }),
    })
}

/// Response schema: `{ meals: [{ name, calories, protein, carbs?, fats?, description? }] }`.
fn meal_plan_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "meals": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "calories": { "type": "NUMBER" },
                        "protein": { "type": "NUMBER" },
                        "carbs": { "type": "NUMBER" },
                        "fats": { "type": "NUMBER" },
                        "description": { "type": "STRING" }
                    },
                    "required": ["name", "calories", "protein"]
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Goal;

    fn sample_profile() -> Profile {
        Profile {
            name: "Ada".to_string(),
            age: 31,
            weight: 62.5,
            height: 168.0,
            goal: Goal::WeightLoss,
        }
    }

    #[test]
    fn test_advice_request_carries_profile_and_question() {
        let request = advice_request("Should I run fasted?", &sample_profile()).unwrap();
        let body = serde_json::to_value(&request).unwrap();

        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.starts_with("User Profile: {"));
        assert!(prompt.contains(r#""goal":"weight_loss""#));
        assert!(prompt.ends_with("User Question: Should I run fasted?"));
        assert!(body["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("fitness coach"));
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_meal_plan_request_sets_json_schema() {
        let request = meal_plan_request(&sample_profile()).unwrap();
        let body = serde_json::to_value(&request).unwrap();

        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(
            config["responseSchema"]["properties"]["meals"]["items"]["required"],
            json!(["name", "calories", "protein"])
        );
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let raw = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Hello "},{"text":"there"}]}}]}"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), "Hello there");
    }

    #[test]
    fn test_response_without_candidates_is_empty() {
        let raw = r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#;
        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text(), "");
    }

    #[test]
    fn test_map_api_error_rate_limit() {
        let err = map_api_error(429, r#"{"error":{"code":429,"message":"Quota exhausted"}}"#);
        assert!(err.is_rate_limited());
        assert!(err.to_string().contains("Quota exhausted"));

        let err = map_api_error(500, "upstream crashed");
        assert!(!err.is_rate_limited());
        assert!(err.to_string().contains("HTTP 500: upstream crashed"));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_not_configured() {
        let client = GeminiClient::new(
            "http://127.0.0.1:9".to_string(),
            "test-model".to_string(),
            None,
        );

        let err = client.advise("Hi", &sample_profile()).await.unwrap_err();
        assert!(matches!(err, AppError::NotConfigured));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_ai_failure() {
        let client = GeminiClient::new(
            "http://127.0.0.1:9".to_string(),
            "test-model".to_string(),
            Some("key".to_string()),
        );

        let err = client.plan_day(&sample_profile()).await.unwrap_err();
        assert!(err.is_ai_failure());
    }
}
