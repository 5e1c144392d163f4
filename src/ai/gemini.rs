use base64::Engine as _;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, instrument, trace, warn};

use crate::ai::composer::StoryboardRequest;
use crate::ai::config::AiConfig;
use crate::error::StoryboardError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Client for the Gemini `generateContent` endpoint.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    timeout_secs: u64,
}

impl GeminiClient {
    pub fn new(config: &AiConfig) -> Result<Self, StoryboardError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| StoryboardError::Service(err.to_string()))?;
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            config.api_url.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            http,
            endpoint,
            timeout_secs: config.timeout.as_secs(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send the request once and return the model's raw text.
    ///
    /// The service is asked for JSON-only output; the text is handed back
    /// untouched so that validation sees exactly what the model produced.
    #[instrument(level = "trace", skip(self, api_key, request), fields(endpoint = %self.endpoint))]
    pub async fn generate(
        &self,
        api_key: &str,
        request: &StoryboardRequest,
    ) -> Result<String, StoryboardError> {
        let body = build_generate_body(request);

        debug!(
            mime_type = request.image().mime_type(),
            image_size = request.image().bytes().len(),
            "sending generateContent request"
        );

        let resp = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let err_text = resp.text().await.unwrap_or_default();
            warn!(%status, "Gemini API error");
            return Err(StoryboardError::Service(format!(
                "Gemini API error {status}: {err_text}"
            )));
        }

        let raw = resp.text().await.map_err(|err| self.transport_error(err))?;
        let snippet: String = raw.chars().take(200).collect();
        debug!(snippet = %snippet, "generateContent response body");
        trace!(raw = %raw, "generateContent response");

        parse_generated_text(&raw)
    }

    fn transport_error(&self, err: reqwest::Error) -> StoryboardError {
        if err.is_timeout() {
            warn!(timeout_secs = self.timeout_secs, "Gemini request timed out");
            StoryboardError::Service(format!(
                "request timed out after {}s",
                self.timeout_secs
            ))
        } else {
            warn!(error = %err, "Gemini request failed");
            StoryboardError::Service(err.to_string())
        }
    }
}

/// Request body asking for structured-only output.
pub fn build_generate_body(request: &StoryboardRequest) -> Value {
    let image = request.image();
    let data = base64::engine::general_purpose::STANDARD.encode(image.bytes());
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [
                    { "text": request.instruction() },
                    { "inlineData": { "mimeType": image.mime_type(), "data": data } }
                ]
            }
        ],
        "generationConfig": { "responseMimeType": "application/json" }
    })
}

/// Pull the text of the first candidate out of a `generateContent` reply.
fn parse_generated_text(raw: &str) -> Result<String, StoryboardError> {
    let response: GenerateResponse = serde_json::from_str(raw).map_err(|err| {
        StoryboardError::Service(format!("unexpected generateContent reply: {err}"))
    })?;

    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        warn!(%reason, "Gemini returned no candidates");
        return Err(StoryboardError::Service(format!(
            "model returned no result: {reason}"
        )));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.is_empty() {
        let reason = candidate
            .finish_reason
            .unwrap_or_else(|| "empty response".to_string());
        warn!(%reason, "Gemini candidate had no text");
        return Err(StoryboardError::Service(format!(
            "model returned no text: {reason}"
        )));
    }

    Ok(text)
}
