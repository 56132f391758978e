use std::env;

use eyre::{Result, eyre};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{error, debug};
use url::Url;

/// Instruction suffix appended to every prompt to steer response style.
pub const PROMPT_SUFFIX: &str = ",Answer as a neanderthal";

const ENDPOINT_ENV_VAR: &str = "BINGBONG_API_URL";
const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/generate";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("request to completion endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("completion endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("completion response had no usable text field")]
    MalformedResponse,
}

#[derive(Serialize)]
struct GenerateRequest {
    prompt: String,
}

pub struct GenerateClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl GenerateClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            client: reqwest::Client::new(),
        }
    }

    /// Resolves the endpoint from the `--endpoint` flag, then the
    /// `BINGBONG_API_URL` environment variable, then the local default.
    pub fn from_env(flag: Option<&str>) -> Result<Self> {
        let raw = match flag {
            Some(url) => url.to_string(),
            None => env::var(ENDPOINT_ENV_VAR)
                .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string()),
        };

        let endpoint = Url::parse(&raw)
            .map_err(|e| eyre!("invalid completion endpoint {raw:?}: {e}"))?;

        Ok(Self::new(endpoint))
    }

    /// Sends one prompt and returns the generated text.
    ///
    /// The response body is untyped JSON and is never assumed well-formed: a
    /// body without a string `text` field is `MalformedResponse`, a network
    /// failure or non-2xx status is `Transport`/`Status`. The caller decides
    /// what to show for each.
    pub async fn generate(&self, input: &str) -> Result<String, GenerateError> {
        let request = GenerateRequest {
            prompt: format!("{input}{PROMPT_SUFFIX}"),
        };

        debug!("Sending prompt to {}", self.endpoint);

        let response = self.client.post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("Completion request failed with {}: {}", status, error_text);
            return Err(GenerateError::Status(status));
        }

        let response_json: Value = match response.json().await {
            Ok(json) => json,
            Err(e) => {
                error!("Completion response was not JSON: {}", e);
                return Err(GenerateError::MalformedResponse);
            }
        };

        debug!("Received completion response: {}", response_json);

        match response_json.get("text").and_then(Value::as_str) {
            Some(text) => Ok(text.to_string()),
            None => Err(GenerateError::MalformedResponse),
        }
    }
}
