//! Generative-AI analysis client (Gemini `generateContent`).
//!
//! A request carries a single text part:
//!
//! ```json
//! { "contents": [ { "parts": [ { "text": "<prompt>" } ] } ] }
//! ```
//!
//! and the answer is read from `candidates[0].content.parts[0].text`. The
//! response schema is fully optional: a body that is valid JSON but has a
//! different shape yields [`Analysis::Unavailable`] rather than an error.
//! Only a non-JSON body counts as a parse failure.
//!
//! ## Example
//!
//! ```rust,no_run
//! use vitalwatch_adapters::gemini::GeminiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::builder()
//!         .api_key("my-key")
//!         .build()?;
//!
//!     let analysis = client.generate("Summarise: heart rate 70 bpm").await?;
//!     println!("{}", analysis.text_or("No prediction available."));
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::AdapterError;

/// Default `generateContent` endpoint.
pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash:generateContent";

/// Client for the analysis endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GeminiClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> GeminiClientBuilder {
        GeminiClientBuilder::default()
    }

    /// The configured endpoint URL (without the API key).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether an API key will be sent with requests.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send `prompt` and extract the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<Analysis, AdapterError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest::from_prompt(prompt));

        if let Some(ref key) = self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(AdapterError::Status(response.status().as_u16()));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        Ok(Analysis::from_value(body))
    }
}

/// Builder for GeminiClient.
#[derive(Debug, Default)]
pub struct GeminiClientBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl GeminiClientBuilder {
    /// Set the `generateContent` URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the API key, sent as the `key` query parameter.
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout (default: 60 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<GeminiClient, AdapterError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(60));

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdapterError::Client(e.to_string()))?;

        Ok(GeminiClient {
            client,
            endpoint: self
                .endpoint
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            api_key: self.api_key.filter(|k| !k.is_empty()),
        })
    }
}

/// Request body for `generateContent`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    /// A request holding a single text part.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Part {
    pub text: String,
}

/// Response body of `generateContent`, every level optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate, if present.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_ref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_ref()?
            .first()?
            .text
            .as_deref()
    }
}

/// Outcome of a successful analysis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Analysis {
    /// The service returned non-empty text.
    Text(String),
    /// The response carried no usable text.
    Unavailable,
}

impl Analysis {
    /// Interpret an arbitrary JSON response body.
    pub fn from_value(value: serde_json::Value) -> Self {
        match serde_json::from_value::<GenerateResponse>(value) {
            Ok(response) => Self::from_response(&response),
            Err(_) => Analysis::Unavailable,
        }
    }

    /// Extract the analysis from a decoded response.
    pub fn from_response(response: &GenerateResponse) -> Self {
        match response.first_text() {
            Some(text) if !text.is_empty() => Analysis::Text(text.to_string()),
            _ => Analysis::Unavailable,
        }
    }

    /// The text, or `fallback` when unavailable.
    pub fn text_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Analysis::Text(text) => text,
            Analysis::Unavailable => fallback,
        }
    }
}
