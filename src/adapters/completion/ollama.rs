//! Ollama chat-completion client
//!
//! This module implements [`CompletionBackend`] against the Ollama REST API.
//! Besides non-streaming chat it covers model provisioning: listing installed
//! tags, pulling a missing model, and walking a preference list until one
//! model is usable.

use super::{CompletionBackend, CompletionOutcome};
use crate::config::OllamaConfig;
use crate::domain::CompletionError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeout for model-listing calls; these should be fast even on a busy server
const TAGS_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of tag-list polls after a pull before giving up on the model
const PULL_POLL_ATTEMPTS: u32 = 12;

/// Delay between tag-list polls after a pull
const PULL_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Serialize)]
struct PullRequest<'a> {
    name: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// HTTP client for an Ollama server
///
/// Chat and pull calls carry their own timeouts from configuration since a
/// cold model load or a multi-gigabyte download dwarfs any sensible
/// client-wide limit.
///
/// # Example
///
/// ```no_run
/// use privchat::adapters::completion::OllamaClient;
/// use privchat::config::OllamaConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = OllamaConfig::default();
/// let client = OllamaClient::new(&config);
///
/// let model = client.select_model(&config.model_preferences).await?;
/// # Ok(())
/// # }
/// ```
pub struct OllamaClient {
    /// Base URL of the Ollama server, without a trailing slash
    base_url: String,

    /// HTTP client for making requests
    client: Client,

    /// Timeout applied to chat calls
    chat_timeout: Duration,

    /// Timeout applied to pull calls
    pull_timeout: Duration,

    /// Delay between tag-list polls after a pull
    poll_interval: Duration,
}

impl OllamaClient {
    /// Create a new Ollama client
    pub fn new(config: &OllamaConfig) -> Self {
        // No client-wide timeout; each request sets its own.
        let client = ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
            chat_timeout: Duration::from_secs(config.chat_timeout_seconds),
            pull_timeout: Duration::from_secs(config.pull_timeout_seconds),
            poll_interval: PULL_POLL_INTERVAL,
        }
    }

    #[cfg(test)]
    fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// List the model tags currently installed on the server
    async fn list_models(&self) -> std::result::Result<Vec<String>, CompletionError> {
        let url = format!("{}/api/tags", self.base_url);

        let resp = self
            .client
            .get(&url)
            .timeout(TAGS_TIMEOUT)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(CompletionError::ServerError { status, message });
        }

        let tags = resp
            .json::<TagsResponse>()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn model_present(&self, tag: &str) -> std::result::Result<bool, CompletionError> {
        Ok(self.list_models().await?.iter().any(|name| name == tag))
    }

    /// Ask the server to download `tag`
    async fn pull_model(&self, tag: &str) -> std::result::Result<(), CompletionError> {
        let url = format!("{}/api/pull", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&PullRequest {
                name: tag,
                stream: false,
            })
            .timeout(self.pull_timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(CompletionError::ServerError { status, message });
        }

        Ok(())
    }

    /// Make sure `tag` is installed, pulling it if missing
    ///
    /// After a pull the tag list is polled until the model shows up, since
    /// the server registers freshly pulled models with a delay.
    ///
    /// # Errors
    ///
    /// Returns an error if the server is unreachable, the pull is rejected,
    /// or the model never appears in the tag list.
    pub async fn ensure_model(&self, tag: &str) -> std::result::Result<(), CompletionError> {
        if self.model_present(tag).await? {
            tracing::info!(model = %tag, "Model already installed");
            return Ok(());
        }

        tracing::info!(model = %tag, "Model not installed, pulling");
        self.pull_model(tag).await?;

        for attempt in 1..=PULL_POLL_ATTEMPTS {
            tokio::time::sleep(self.poll_interval).await;

            if self.model_present(tag).await? {
                tracing::info!(model = %tag, attempt = attempt, "Model is ready");
                return Ok(());
            }
        }

        Err(CompletionError::ModelUnavailable(format!(
            "model '{tag}' still not listed after pull"
        )))
    }

    /// Walk `preferences` and return the first tag that can be provisioned
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError::ModelUnavailable`] if every candidate
    /// fails to install.
    pub async fn select_model(
        &self,
        preferences: &[String],
    ) -> std::result::Result<String, CompletionError> {
        for tag in preferences {
            match self.ensure_model(tag).await {
                Ok(()) => return Ok(tag.clone()),
                Err(e) => {
                    tracing::warn!(model = %tag, error = %e, "Unable to provision model");
                }
            }
        }

        Err(CompletionError::ModelUnavailable(
            "no configured completion model could be provisioned".to_string(),
        ))
    }
}

#[async_trait]
impl CompletionBackend for OllamaClient {
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<CompletionOutcome, CompletionError> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let resp = self
            .client
            .post(&url)
            .json(&request)
            .timeout(self.chat_timeout)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(CompletionError::ServerError { status, message });
        }

        let chat = resp
            .json::<ChatResponse>()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        let content = chat.message.map(|m| m.content).unwrap_or_default();
        let reply = content.trim();

        if reply.is_empty() {
            Ok(CompletionOutcome::Empty)
        } else {
            Ok(CompletionOutcome::Reply(reply.to_string()))
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> CompletionError {
    if err.is_timeout() {
        CompletionError::Timeout(err.to_string())
    } else {
        CompletionError::ConnectionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(base_url: String) -> OllamaConfig {
        OllamaConfig {
            base_url,
            model_preferences: vec!["tinyllama:latest".to_string()],
            chat_timeout_seconds: 5,
            pull_timeout_seconds: 5,
        }
    }

    #[tokio::test]
    async fn test_complete_returns_trimmed_reply() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "model": "tinyllama:latest",
                "messages": [{"role": "user", "content": "Say hello"}],
                "stream": false
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": {"role": "assistant", "content": "\n Hello there \n"}}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(server.url()));
        let outcome = client
            .complete("tinyllama:latest", "Say hello")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(outcome, CompletionOutcome::Reply("Hello there".to_string()));
    }

    #[tokio::test]
    async fn test_complete_reports_blank_content_as_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": {"role": "assistant", "content": "   "}}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(server.url()));
        let outcome = client.complete("tinyllama:latest", "Hi").await.unwrap();

        assert_eq!(outcome, CompletionOutcome::Empty);
    }

    #[tokio::test]
    async fn test_complete_reports_missing_message_as_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"done": true}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(server.url()));
        let outcome = client.complete("tinyllama:latest", "Hi").await.unwrap();

        assert_eq!(outcome, CompletionOutcome::Empty);
    }

    #[tokio::test]
    async fn test_complete_maps_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(404)
            .with_body("model 'missing' not found")
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(server.url()));
        let err = client.complete("missing", "Hi").await.unwrap_err();

        match err {
            CompletionError::ServerError { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "model 'missing' not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_complete_maps_undecodable_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("definitely not json")
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(server.url()));
        let err = client.complete("tinyllama:latest", "Hi").await.unwrap_err();

        assert!(matches!(err, CompletionError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_ensure_model_skips_pull_when_installed() {
        let mut server = mockito::Server::new_async().await;
        let _tags = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models": [{"name": "tinyllama:latest"}, {"name": "phi3:mini"}]}"#)
            .create_async()
            .await;
        let pull = server
            .mock("POST", "/api/pull")
            .with_status(200)
            .expect(0)
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(server.url()));
        client.ensure_model("tinyllama:latest").await.unwrap();

        pull.assert_async().await;
    }

    #[tokio::test]
    async fn test_ensure_model_gives_up_when_model_never_appears() {
        let mut server = mockito::Server::new_async().await;
        let _tags = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models": []}"#)
            .create_async()
            .await;
        let pull = server
            .mock("POST", "/api/pull")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "name": "tinyllama:latest"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status": "success"}"#)
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(server.url()))
            .with_poll_interval(Duration::from_millis(1));
        let err = client.ensure_model("tinyllama:latest").await.unwrap_err();

        pull.assert_async().await;
        assert!(matches!(err, CompletionError::ModelUnavailable(_)));
    }

    #[tokio::test]
    async fn test_select_model_falls_back_to_next_preference() {
        let mut server = mockito::Server::new_async().await;
        let _tags = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models": [{"name": "phi3:mini"}]}"#)
            .create_async()
            .await;
        let _pull = server
            .mock("POST", "/api/pull")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "name": "tinyllama:latest"
            })))
            .with_status(500)
            .with_body("pull failed")
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(server.url()));
        let preferences = vec!["tinyllama:latest".to_string(), "phi3:mini".to_string()];
        let model = client.select_model(&preferences).await.unwrap();

        assert_eq!(model, "phi3:mini");
    }

    #[tokio::test]
    async fn test_select_model_errors_when_no_candidate_provisions() {
        let mut server = mockito::Server::new_async().await;
        let _tags = server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models": []}"#)
            .create_async()
            .await;
        let _pull = server
            .mock("POST", "/api/pull")
            .with_status(500)
            .with_body("no space left")
            .create_async()
            .await;

        let client = OllamaClient::new(&test_config(server.url()));
        let preferences = vec!["tinyllama:latest".to_string()];
        let err = client.select_model(&preferences).await.unwrap_err();

        assert!(matches!(err, CompletionError::ModelUnavailable(_)));
    }

    #[test]
    fn test_ollama_client_strips_trailing_slash() {
        let client = OllamaClient::new(&test_config("http://127.0.0.1:11434/".to_string()));
        assert_eq!(client.base_url, "http://127.0.0.1:11434");
    }
}
