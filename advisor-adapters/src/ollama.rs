//! `Ollama` chat client implementation.

use std::{fmt, time::Duration};

use async_trait::async_trait;
use hyper::body::to_bytes;
use hyper::header::{AUTHORIZATION, CONTENT_TYPE};
use hyper::{Body, Request, StatusCode, Uri};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{debug, warn};

use advisor_primitives::BackendStatus;

use crate::client::{ChatClient, ChatOptions, ClientError, ClientResult};
use crate::http_client::{HyperClient, build_backend_client};

/// Configuration for the `Ollama` chat client.
#[derive(Clone, Debug)]
pub struct OllamaConfig {
    base_url: String,
    model: String,
    timeout: Duration,
    api_key: Option<String>,
}

impl OllamaConfig {
    /// Creates a configuration for the supplied model using default settings.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            base_url: "http://127.0.0.1:11434/".to_owned(),
            model: model.into(),
            timeout: Duration::from_secs(120),
            api_key: None,
        }
    }

    /// Overrides the base URL of the local Ollama daemon.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the supplied URL is invalid.
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> ClientResult<Self> {
        self.base_url = sanitize_base_url(base_url.as_ref())?;
        Ok(self)
    }

    /// Sets the per-call timeout; an expired timeout surfaces as
    /// [`ClientError::Unreachable`].
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Attaches an opaque API credential, forwarded as a bearer token and
    /// never inspected or logged.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

/// Chat client that calls the local Ollama daemon over HTTP/HTTPS.
pub struct OllamaClient {
    client: HyperClient,
    chat_endpoint: Uri,
    tags_endpoint: Uri,
    model: String,
    timeout: Duration,
    api_key: Option<String>,
}

impl fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaClient")
            .field("model", &self.model)
            .field("chat_endpoint", &self.chat_endpoint)
            .finish_non_exhaustive()
    }
}

impl OllamaClient {
    /// Constructs a new client from the supplied configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if an endpoint is invalid or
    /// the HTTP client cannot be constructed.
    pub fn new(config: OllamaConfig) -> ClientResult<Self> {
        let chat_endpoint = parse_endpoint(&config.base_url, "api/chat")?;
        let tags_endpoint = parse_endpoint(&config.base_url, "api/tags")?;
        let client = build_backend_client()?;

        Ok(Self {
            client,
            chat_endpoint,
            tags_endpoint,
            model: config.model,
            timeout: config.timeout,
            api_key: config.api_key,
        })
    }

    fn build_chat_payload(&self, system: &str, user: &str, options: &ChatOptions) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            stream: false,
            messages: vec![
                WireMessage {
                    role: "system".to_owned(),
                    content: system.to_owned(),
                },
                WireMessage {
                    role: "user".to_owned(),
                    content: user.to_owned(),
                },
            ],
            options: WireOptions {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
            },
        }
    }

    fn authorize(&self, builder: hyper::http::request::Builder) -> hyper::http::request::Builder {
        match &self.api_key {
            Some(key) => builder.header(AUTHORIZATION, format!("Bearer {key}")),
            None => builder,
        }
    }

    async fn send(&self, req: Request<Body>) -> ClientResult<(StatusCode, Vec<u8>)> {
        let response = timeout(self.timeout, self.client.request(req))
            .await
            .map_err(|_| ClientError::unreachable("request timed out"))?
            .map_err(classify_hyper_error)?;

        let status = response.status();
        let bytes = to_bytes(response.into_body())
            .await
            .map_err(|err| ClientError::unreachable(format!("failed to read response: {err}")))?;

        Ok((status, bytes.to_vec()))
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn probe(&self) -> BackendStatus {
        let req = match self
            .authorize(Request::get(self.tags_endpoint.clone()))
            .body(Body::empty())
        {
            Ok(req) => req,
            Err(err) => {
                warn!("failed to build probe request: {err}");
                return BackendStatus::unreachable();
            }
        };

        match self.send(req).await {
            Ok((status, bytes)) if status.is_success() => {
                match decode_tags_response(&bytes) {
                    Ok(models) => {
                        let present = models.iter().any(|name| matches_target(name, &self.model));
                        debug!(models = models.len(), present, "backend probe succeeded");
                        BackendStatus::reachable(models, present)
                    }
                    Err(err) => {
                        warn!("backend model listing was unreadable: {err}");
                        BackendStatus::unreachable()
                    }
                }
            }
            Ok((status, _)) => {
                warn!("backend model listing returned {status}");
                BackendStatus::unreachable()
            }
            Err(err) => {
                debug!("backend probe failed: {err}");
                BackendStatus::unreachable()
            }
        }
    }

    async fn chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        options: &ChatOptions,
    ) -> ClientResult<String> {
        let payload = self.build_chat_payload(system_prompt, user_prompt, options);
        let body = serde_json::to_vec(&payload)
            .map_err(|err| ClientError::backend(format!("failed to encode request: {err}")))?;

        let req = self
            .authorize(Request::post(self.chat_endpoint.clone()))
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .map_err(|err| ClientError::backend(format!("failed to build request: {err}")))?;

        debug!(model = %self.model, "sending chat request");
        let (status, bytes) = self.send(req).await?;

        if !status.is_success() {
            return Err(classify_http_failure(status, &bytes, &self.model));
        }

        decode_chat_response(&bytes)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    stream: bool,
    messages: Vec<WireMessage>,
    options: WireOptions,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct WireOptions {
    temperature: f32,
    #[serde(rename = "num_predict")]
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<WireMessage>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TaggedModel>,
}

#[derive(Debug, Deserialize)]
struct TaggedModel {
    name: String,
}

fn classify_hyper_error(err: hyper::Error) -> ClientError {
    if err.is_connect() || err.is_timeout() {
        ClientError::unreachable(err.to_string())
    } else {
        ClientError::backend(err.to_string())
    }
}

fn classify_http_failure(status: StatusCode, body: &[u8], model: &str) -> ClientError {
    let reason = String::from_utf8_lossy(body).to_string();
    // The daemon reports a missing model as a 404 with an error body naming it.
    if status == StatusCode::NOT_FOUND && reason.contains("not found") {
        return ClientError::ModelNotFound {
            model: model.to_owned(),
        };
    }
    ClientError::backend(format!("backend returned {status}: {reason}"))
}

fn decode_chat_response(bytes: &[u8]) -> ClientResult<String> {
    let response: ChatResponse = serde_json::from_slice(bytes)
        .map_err(|err| ClientError::malformed(format!("failed to decode response: {err}")))?;

    if let Some(error) = response.error {
        return Err(ClientError::backend(error));
    }

    match response.message {
        Some(message) if !message.content.is_empty() => Ok(message.content),
        Some(_) => Err(ClientError::malformed("message content was empty")),
        None => Err(ClientError::malformed("response carried no message field")),
    }
}

fn decode_tags_response(bytes: &[u8]) -> ClientResult<Vec<String>> {
    let response: TagsResponse = serde_json::from_slice(bytes)
        .map_err(|err| ClientError::malformed(format!("failed to decode model list: {err}")))?;
    Ok(response.models.into_iter().map(|m| m.name).collect())
}

/// Whether a catalog entry satisfies the target model.
///
/// Exact match, or equality once either side's `:tag` suffix is dropped, so
/// `gemma3:latest` satisfies a target of `gemma3` and `gemma3` satisfies
/// `gemma3:4b`. Two different explicit tags do not match each other.
fn matches_target(name: &str, target: &str) -> bool {
    fn base(s: &str) -> &str {
        s.split(':').next().unwrap_or(s)
    }
    if name == target {
        return true;
    }
    name == base(target) || base(name) == target
}

fn parse_endpoint(base_url: &str, path: &str) -> ClientResult<Uri> {
    format!("{base_url}{path}")
        .parse::<Uri>()
        .map_err(|err| ClientError::configuration(format!("invalid backend endpoint: {err}")))
}

fn sanitize_base_url(input: &str) -> ClientResult<String> {
    let mut base = input.trim().to_owned();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(ClientError::configuration(
            "backend base URL must start with http:// or https://",
        ));
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    base.parse::<Uri>()
        .map_err(|err| ClientError::configuration(format!("invalid backend base URL: {err}")))?;
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_base_url_without_scheme() {
        let err = OllamaConfig::new("gemma3:4b")
            .with_base_url("localhost:11434")
            .expect_err("missing scheme should error");
        assert!(matches!(err, ClientError::Configuration { .. }));
    }

    #[test]
    fn sanitize_adds_trailing_slash() {
        let cfg = OllamaConfig::new("gemma3:4b")
            .with_base_url("http://localhost:11434")
            .expect("valid url");
        assert_eq!(cfg.base_url, "http://localhost:11434/");
    }

    #[test]
    fn chat_payload_carries_both_roles_and_options() {
        let client = OllamaClient::new(OllamaConfig::new("gemma3:4b")).expect("client");
        let options = ChatOptions::default();
        let payload = client.build_chat_payload("be a trainer", "make a plan", &options);

        assert_eq!(payload.model, "gemma3:4b");
        assert!(!payload.stream);
        assert_eq!(payload.messages[0].role, "system");
        assert_eq!(payload.messages[1].role, "user");
        assert_eq!(payload.options.max_output_tokens, 1500);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["options"]["num_predict"], 1500);
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn decodes_a_successful_chat_response() {
        let json = br#"{"message": {"role": "assistant", "content": "Monday: squats"}}"#;
        assert_eq!(decode_chat_response(json).unwrap(), "Monday: squats");
    }

    #[test]
    fn missing_message_is_malformed() {
        let err = decode_chat_response(br#"{"done": true}"#).unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse { .. }));
    }

    #[test]
    fn empty_content_is_malformed() {
        let json = br#"{"message": {"role": "assistant", "content": ""}}"#;
        let err = decode_chat_response(json).unwrap_err();
        assert!(matches!(err, ClientError::MalformedResponse { .. }));
    }

    #[test]
    fn inline_error_field_is_a_backend_fault() {
        let json = br#"{"error": "model requires more system memory"}"#;
        let err = decode_chat_response(json).unwrap_err();
        assert!(matches!(err, ClientError::Backend { reason } if reason.contains("memory")));
    }

    #[test]
    fn missing_model_is_classified_from_the_404_body() {
        let body = br#"{"error":"model 'gemma3:4b' not found, try pulling it first"}"#;
        let err = classify_http_failure(StatusCode::NOT_FOUND, body, "gemma3:4b");
        assert!(matches!(err, ClientError::ModelNotFound { model } if model == "gemma3:4b"));
    }

    #[test]
    fn other_http_failures_keep_the_diagnostic() {
        let err = classify_http_failure(StatusCode::INTERNAL_SERVER_ERROR, b"boom", "gemma3:4b");
        assert!(matches!(err, ClientError::Backend { reason } if reason.contains("boom")));
    }

    #[test]
    fn decodes_the_model_catalog() {
        let json = br#"{"models": [{"name": "gemma3:4b"}, {"name": "llama3:8b"}]}"#;
        let models = decode_tags_response(json).unwrap();
        assert_eq!(models, vec!["gemma3:4b", "llama3:8b"]);
    }

    // Port 9 (discard) is closed on any sane host, so the connection is
    // refused immediately rather than hanging until the timeout.
    fn dead_endpoint_client() -> OllamaClient {
        let config = OllamaConfig::new("gemma3:4b")
            .with_base_url("http://127.0.0.1:9/")
            .expect("valid url")
            .with_timeout(Duration::from_secs(5));
        OllamaClient::new(config).expect("client")
    }

    #[tokio::test]
    async fn probing_a_dead_endpoint_reports_unreachable() {
        let status = dead_endpoint_client().probe().await;
        assert_eq!(status, BackendStatus::unreachable());
    }

    #[tokio::test]
    async fn chat_against_a_dead_endpoint_is_unreachable() {
        let err = dead_endpoint_client()
            .chat("be a trainer", "make a plan", &ChatOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Unreachable { .. }));
    }

    #[test]
    fn target_matching_tolerates_tag_suffixes() {
        assert!(matches_target("gemma3:4b", "gemma3:4b"));
        assert!(matches_target("gemma3:latest", "gemma3"));
        assert!(matches_target("gemma3", "gemma3:4b"));
        assert!(!matches_target("gemma3:1b", "gemma3:4b"));
        assert!(!matches_target("llama3:8b", "gemma3:4b"));
    }
}
