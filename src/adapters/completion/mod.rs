//! Chat-completion abstraction
//!
//! This module defines the `CompletionBackend` trait that abstracts the model
//! serving the redacted prompt. The production implementation talks to an
//! Ollama server; tests substitute scripted backends.

mod ollama;

pub use ollama::OllamaClient;

use crate::domain::CompletionError;
use async_trait::async_trait;

/// Outcome of a completion call that reached the service
///
/// An empty reply is a distinct condition, not an error and not a reply: the
/// caller decides how to present it rather than this layer inventing text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Trimmed, non-empty reply text
    Reply(String),
    /// The service answered but produced no usable text
    Empty,
}

impl CompletionOutcome {
    /// Return the reply text, if there is one
    pub fn as_reply(&self) -> Option<&str> {
        match self {
            CompletionOutcome::Reply(text) => Some(text),
            CompletionOutcome::Empty => None,
        }
    }
}

/// Trait for chat-completion backends
///
/// # Example
///
/// ```no_run
/// use privchat::adapters::completion::{CompletionBackend, OllamaClient};
/// use privchat::config::OllamaConfig;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = OllamaConfig::default();
/// let client = OllamaClient::new(&config);
///
/// let outcome = client.complete("tinyllama:latest", "Say hello").await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one user message to `model` and wait for the full reply
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unreachable, times out, rejects the
    /// request, or produces a response that cannot be decoded.
    async fn complete(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<CompletionOutcome, CompletionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_as_reply() {
        let reply = CompletionOutcome::Reply("hi".to_string());
        assert_eq!(reply.as_reply(), Some("hi"));
        assert_eq!(CompletionOutcome::Empty.as_reply(), None);
    }
}
