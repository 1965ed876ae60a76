//! HTTP client for an Ollama-compatible `/api/generate` endpoint.

use super::{build_prompt, parse_comparison, ComparePlayersInput, ComparePlayersOutput, ComparisonError};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Sends comparison prompts to the configured model.
#[derive(Clone, Debug)]
pub struct ComparisonClient {
    http: Client,
    host: String,
    model: String,
}

impl ComparisonClient {
    pub fn new(host: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self, ComparisonError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            host: host.into(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// `host` with a scheme and without a trailing slash, plus the generate path.
    fn endpoint(&self) -> String {
        let host = self.host.trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            format!("{}/api/generate", host)
        } else {
            format!("http://{}/api/generate", host)
        }
    }

    /// Validate, prompt the model once, and parse its answer.
    pub async fn compare(&self, input: &ComparePlayersInput) -> Result<ComparePlayersOutput, ComparisonError> {
        input.validate()?;
        let body = serde_json::json!({
            "model": self.model,
            "prompt": build_prompt(input),
            "stream": false,
            "format": "json",
        });
        let resp = self.http.post(self.endpoint()).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ComparisonError::Status(status.as_u16()));
        }
        let generated: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| ComparisonError::MalformedResponse(e.to_string()))?;
        parse_comparison(&generated.response)
    }
}
