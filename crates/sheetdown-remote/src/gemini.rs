//! Gemini `generateContent` client

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::error::{RemoteError, Result};
use crate::TextGenerator;

/// Connection settings for the Gemini API
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// API root, ending in `/`
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            model: "gemini-1.5-pro".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Sampling parameters for one request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProfile {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: Option<u32>,
    pub max_output_tokens: u32,
}

impl GenerationProfile {
    /// Low-temperature, long-output profile for table formatting
    pub const FORMATTING: Self = Self {
        temperature: 0.3,
        top_p: 0.9,
        top_k: Some(40),
        max_output_tokens: 8192,
    };

    /// Short-output profile for file naming
    pub const NAMING: Self = Self {
        temperature: 0.5,
        top_p: 0.95,
        top_k: None,
        max_output_tokens: 100,
    };
}

/// A single-turn generation request
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system_instruction: Option<String>,
    pub prompt: String,
    pub profile: GenerationProfile,
}

impl GenerationRequest {
    pub fn new<S: Into<String>>(prompt: S, profile: GenerationProfile) -> Self {
        Self {
            system_instruction: None,
            prompt: prompt.into(),
            profile,
        }
    }

    pub fn with_system_instruction<S: Into<String>>(mut self, instruction: S) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// Blocking Gemini client
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(RemoteError::MissingCredentials(
                "Gemini API key is empty".to_string(),
            ));
        }
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String> {
        let url = format!(
            "{}models/{}:generateContent",
            self.config.base_url, self.config.model
        );
        tracing::debug!("POST {url} ({} prompt bytes)", request.prompt.len());

        let response = self
            .http
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GenerateContentRequest::from(request))
            .send()?;
        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(RemoteError::Status {
                service: "Gemini",
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        parsed.text().ok_or(RemoteError::EmptyResponse)
    }
}

// -- Wire format --

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    max_output_tokens: u32,
}

impl<'a> From<&'a GenerationRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        let profile = request.profile;
        Self {
            system_instruction: request.system_instruction.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: profile.temperature,
                top_p: profile.top_p,
                top_k: profile.top_k,
                max_output_tokens: profile.max_output_tokens,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, if any
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_payload() {
        let request = GenerationRequest::new("hello", GenerationProfile::FORMATTING)
            .with_system_instruction("be terse");
        let payload = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();
        assert_eq!(
            payload,
            json!({
                "systemInstruction": {"parts": [{"text": "be terse"}]},
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "generationConfig": {
                    "temperature": 0.3f32,
                    "topP": 0.9f32,
                    "topK": 40,
                    "maxOutputTokens": 8192
                }
            })
        );
    }

    #[test]
    fn test_request_payload_without_system_instruction() {
        let request = GenerationRequest::new("name it", GenerationProfile::NAMING);
        let payload = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();
        assert!(payload.get("systemInstruction").is_none());
        assert!(payload["generationConfig"].get("topK").is_none());
    }

    #[test]
    fn test_response_text() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "| a "}, {"text": "|"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("| a |"));
    }

    #[test]
    fn test_empty_response() {
        let none: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(none.text(), None);
        let blocked: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(blocked.text(), None);
    }

    #[test]
    fn test_empty_api_key_rejected() {
        assert!(matches!(
            GeminiClient::new(GeminiConfig::new(" ")),
            Err(RemoteError::MissingCredentials(_))
        ));
    }
}
