//! One-shot requests to the local inference server.
//!
//! Every failure is classified into an [`InferenceError`] whose `Display`
//! output is the text shown to the user in place of a reply. Callers that
//! only need displayable content can use `to_string()` on the error; callers
//! that want to branch on the failure use [`InferenceError::kind`].

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::api::{GenerateRequest, GenerateResponse};
use crate::core::constants::{GENERATE_ENDPOINT, REQUEST_TIMEOUT, UNREACHABLE_MESSAGE};
use crate::utils::url::construct_api_url;

/// Broad classes of exchange failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server could not be reached at all.
    ServerUnreachable,
    /// The server answered with a status other than 200.
    ServerError,
    /// Anything else: timeouts, malformed replies, transport errors.
    UnexpectedFailure,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ServerUnreachable => "server_unreachable",
            ErrorKind::ServerError => "server_error",
            ErrorKind::UnexpectedFailure => "unexpected_failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    ServerUnreachable,
    ServerError {
        /// HTTP status code returned by the server.
        status: u16,
        /// Raw response body.
        body: String,
    },
    Unexpected(String),
}

impl InferenceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InferenceError::ServerUnreachable => ErrorKind::ServerUnreachable,
            InferenceError::ServerError { .. } => ErrorKind::ServerError,
            InferenceError::Unexpected(_) => ErrorKind::UnexpectedFailure,
        }
    }

    fn from_transport(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_connect() {
            InferenceError::ServerUnreachable
        } else if err.is_timeout() {
            InferenceError::Unexpected(format!("request timed out after {timeout:?}"))
        } else {
            InferenceError::Unexpected(err.to_string())
        }
    }
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferenceError::ServerUnreachable => f.write_str(UNREACHABLE_MESSAGE),
            InferenceError::ServerError { status, body } => {
                write!(f, "Error: {status} - {body}")
            }
            InferenceError::Unexpected(message) => write!(f, "Error: {message}"),
        }
    }
}

impl std::error::Error for InferenceError {}

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, InferenceError>;
}

/// Client for Ollama's non-streaming `/api/generate` endpoint.
#[derive(Clone, Debug)]
pub struct OllamaClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: construct_api_url(base_url, GENERATE_ENDPOINT),
            timeout: REQUEST_TIMEOUT,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn exchange(
        &self,
        request: &GenerateRequest<'_>,
        model: &str,
    ) -> Result<String, InferenceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|err| InferenceError::from_transport(err, self.timeout))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| InferenceError::from_transport(err, self.timeout))?;

        if status != StatusCode::OK {
            return Err(InferenceError::ServerError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|err| {
            InferenceError::Unexpected(format!("invalid response from server: {err}"))
        })?;
        debug!(
            reported_model = parsed.model.as_deref().unwrap_or(model),
            done = parsed.done.unwrap_or(true),
            server_ms = parsed.total_duration.map(|ns| ns / 1_000_000),
            eval_count = parsed.eval_count,
            "Parsed generate response"
        );
        Ok(parsed.response)
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, InferenceError> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        info!(
            endpoint = self.endpoint.as_str(),
            model,
            prompt_chars = prompt.chars().count(),
            "Sending generate request"
        );
        let started = Instant::now();

        let result = self.exchange(&request, model).await;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(text) => info!(
                model,
                elapsed_ms,
                response_chars = text.chars().count(),
                "Generate request completed"
            ),
            Err(err) => warn!(
                model,
                elapsed_ms,
                kind = err.kind().as_str(),
                error = %err,
                "Generate request failed"
            ),
        }
        result
    }
}
