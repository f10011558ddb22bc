//! Advice generator client
//!
//! Sends a prompt to a Gemini-style `generateContent` endpoint and turns
//! every outcome into displayable text. One blocking request per call, with
//! a timeout and no retry.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AdviceSettings;
use crate::error::{TrackerError, TrackerResult};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Request header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Shown when the generator answers with no text
pub const NO_ADVICE: &str = "No advice returned";

/// Anything that can turn a prompt into advice text
pub trait AdviceGenerator {
    fn generate(&self, prompt: &str) -> TrackerResult<String>;
}

/// Everything needed to reach the advice generator
#[derive(Clone)]
pub struct AdviceConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub months_window: u32,
    pub timeout: Duration,
}

impl AdviceConfig {
    /// Combine stored settings with a key from the environment or a flag
    pub fn from_settings(settings: &AdviceSettings, api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: settings.model.clone(),
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            months_window: settings.months_window,
            timeout: Duration::from_secs(settings.timeout_secs),
        }
    }

    /// Override the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the history window
    pub fn with_months_window(mut self, months: u32) -> Self {
        self.months_window = months;
        self
    }
}

impl std::fmt::Debug for AdviceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdviceConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("months_window", &self.months_window)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Client for the Gemini `generateContent` API
pub struct GeminiClient {
    http_client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client; fails without an API key
    pub fn new(config: &AdviceConfig) -> TrackerResult<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| TrackerError::Config(format!("{} not set.", API_KEY_ENV)))?;

        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// URL of the generate call, without the key
    pub fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl AdviceGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> TrackerResult<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "requesting advice");

        let response = self
            .http_client
            .post(self.generate_url())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!(%status, "advice request failed");
            return Err(TrackerError::Advice(format!("API error {}: {}", status, message)));
        }

        let reply: GenerateResponse = response.json()?;
        Ok(reply.text())
    }
}

/// generateContent request body
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// generateContent response body
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
    /// Text parts of the first candidate, concatenated
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Ask `generator` for advice, rendering any failure as text
pub fn advice_or_message<G: AdviceGenerator + ?Sized>(generator: &G, prompt: &str) -> String {
    describe(generator.generate(prompt))
}

/// Ask the configured Gemini endpoint for advice, rendering any failure as text
pub fn request_advice(config: &AdviceConfig, prompt: &str) -> String {
    describe(GeminiClient::new(config).and_then(|client| client.generate(prompt)))
}

fn describe(result: TrackerResult<String>) -> String {
    match result {
        Ok(text) => {
            let text = text.trim();
            if text.is_empty() {
                NO_ADVICE.to_string()
            } else {
                text.to_string()
            }
        }
        Err(TrackerError::Config(msg)) => format!("AI advice unavailable: {}", msg),
        Err(e) => format!("AI advice error: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubGenerator(TrackerResult<String>);

    impl AdviceGenerator for StubGenerator {
        fn generate(&self, _prompt: &str) -> TrackerResult<String> {
            match &self.0 {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(TrackerError::Advice(e.to_string())),
            }
        }
    }

    fn config(api_key: Option<&str>) -> AdviceConfig {
        AdviceConfig::from_settings(&AdviceSettings::default(), api_key.map(String::from))
    }

    #[test]
    fn test_successful_text_is_trimmed() {
        let stub = StubGenerator(Ok("\n- Trim dining by 15%\n".into()));
        assert_eq!(advice_or_message(&stub, "prompt"), "- Trim dining by 15%");
    }

    #[test]
    fn test_empty_reply() {
        let stub = StubGenerator(Ok("   ".into()));
        assert_eq!(advice_or_message(&stub, "prompt"), "No advice returned");
    }

    #[test]
    fn test_generator_error() {
        let stub = StubGenerator(Err(TrackerError::Advice("quota exceeded".into())));
        assert_eq!(advice_or_message(&stub, "prompt"), "AI advice error: quota exceeded");
    }

    #[test]
    fn test_missing_key_is_unavailable() {
        assert_eq!(
            request_advice(&config(None), "prompt"),
            "AI advice unavailable: GEMINI_API_KEY not set."
        );
        assert_eq!(
            request_advice(&config(Some("  ")), "prompt"),
            "AI advice unavailable: GEMINI_API_KEY not set."
        );
    }

    #[test]
    fn test_generate_url() {
        let client = GeminiClient::new(&config(Some("secret")).with_model("gemini-test")).unwrap();
        assert_eq!(
            client.generate_url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_transport_error_hides_key() {
        let mut config = config(Some("SUPERSECRETKEY"));
        config.endpoint = "http://127.0.0.1:9".to_string();
        config.timeout = Duration::from_secs(2);

        let message = request_advice(&config, "prompt");
        assert!(message.starts_with("AI advice error: "), "{}", message);
        assert!(!message.contains("SUPERSECRETKEY"), "{}", message);
        assert!(!message.contains("127.0.0.1"), "{}", message);
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", config(Some("secret")));
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"- Cook "},{"text":"at home"}],"role":"model"}}]}"#;
        let reply: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(reply.text(), "- Cook at home");

        let reply: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.text(), "");
    }
}
