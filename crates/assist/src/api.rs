//! HTTP client for the hosted prompt flows.
//!
//! Each flow is invoked with `POST {base_url}/{flow_name}` and a body of
//! `{"data": <input>}`; the service answers `{"result": <output>}`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Flow that condenses a long email into its key points.
pub const SUMMARIZE_FLOW: &str = "summarizeLongEmailFlow";

/// Flow that rewrites a draft in a requested tone.
pub const REFINE_TONE_FLOW: &str = "refineEmailToneFlow";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the prompt-flow client.
#[derive(Debug, thiserror::Error)]
pub enum PromptFlowError {
    /// `AI_FLOW_URL` is not set.
    #[error("AI_FLOW_URL is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The flow service returned a non-2xx status code.
    #[error("Prompt flow error ({status}): {body}")]
    ApiError { status: u16, body: String },
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct PromptFlowConfig {
    /// Base URL of the flow service, e.g. `http://localhost:3400`.
    pub base_url: Option<String>,
}

impl PromptFlowConfig {
    /// Load configuration from `AI_FLOW_URL`. Unset or blank leaves the
    /// AI helpers disabled.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("AI_FLOW_URL")
                .ok()
                .map(|u| u.trim().trim_end_matches('/').to_string())
                .filter(|u| !u.is_empty()),
        }
    }
}

// ---------------------------------------------------------------------------
// PromptFlow
// ---------------------------------------------------------------------------

/// AI drafting operations offered to the inbox.
#[async_trait]
pub trait PromptFlow: Send + Sync {
    /// Summarize an email body.
    async fn summarize(&self, email_content: &str) -> Result<String, PromptFlowError>;

    /// Rewrite `email_content` in `desired_tone`.
    async fn refine_tone(
        &self,
        email_content: &str,
        desired_tone: &str,
    ) -> Result<String, PromptFlowError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummarizeInput<'a> {
    email_content: &'a str,
}

#[derive(Deserialize)]
struct SummarizeOutput {
    summary: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefineToneInput<'a> {
    email_content: &'a str,
    desired_tone: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefineToneOutput {
    refined_content: String,
}

#[derive(Serialize)]
struct FlowRequest<T> {
    data: T,
}

#[derive(Deserialize)]
struct FlowResponse<T> {
    result: T,
}

/// HTTP client for the prompt-flow service.
pub struct PromptFlowApi {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl PromptFlowApi {
    pub fn new(config: PromptFlowConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url,
        }
    }

    /// Whether a flow service is configured.
    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Invoke a flow and unwrap its `result`.
    async fn run_flow<I: Serialize + Send, O: DeserializeOwned>(
        &self,
        flow: &str,
        input: I,
    ) -> Result<O, PromptFlowError> {
        let base_url = self
            .base_url
            .as_deref()
            .ok_or(PromptFlowError::NotConfigured)?;

        let response = self
            .client
            .post(format!("{base_url}/{flow}"))
            .json(&FlowRequest { data: input })
            .send()
            .await?;

        let parsed: FlowResponse<O> = Self::parse_response(response).await?;
        tracing::debug!(flow, "Prompt flow completed");
        Ok(parsed.result)
    }

    // ---- private helpers ----

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, PromptFlowError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(PromptFlowError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, PromptFlowError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PromptFlow for PromptFlowApi {
    async fn summarize(&self, email_content: &str) -> Result<String, PromptFlowError> {
        let output: SummarizeOutput = self
            .run_flow(SUMMARIZE_FLOW, SummarizeInput { email_content })
            .await?;
        Ok(output.summary)
    }

    async fn refine_tone(
        &self,
        email_content: &str,
        desired_tone: &str,
    ) -> Result<String, PromptFlowError> {
        let output: RefineToneOutput = self
            .run_flow(
                REFINE_TONE_FLOW,
                RefineToneInput {
                    email_content,
                    desired_tone,
                },
            )
            .await?;
        Ok(output.refined_content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unconfigured_client_refuses_without_a_request() {
        let api = PromptFlowApi::new(PromptFlowConfig::default());
        assert!(!api.is_configured());
        let err = api.summarize("Hello").await.unwrap_err();
        assert!(matches!(err, PromptFlowError::NotConfigured));
    }

    #[test]
    fn request_bodies_use_flow_field_names() {
        let body = serde_json::to_value(FlowRequest {
            data: RefineToneInput {
                email_content: "hi",
                desired_tone: "professional, empathetic and clear",
            },
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "data": {
                    "emailContent": "hi",
                    "desiredTone": "professional, empathetic and clear"
                }
            })
        );
    }

    #[test]
    fn responses_unwrap_result() {
        let parsed: FlowResponse<RefineToneOutput> =
            serde_json::from_value(json!({ "result": { "refinedContent": "Dear customer" } }))
                .unwrap();
        assert_eq!(parsed.result.refined_content, "Dear customer");
    }
}
