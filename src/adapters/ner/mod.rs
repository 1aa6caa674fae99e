//! Named-entity recognition abstraction
//!
//! This module defines the `EntityRecognizer` trait that abstracts the source
//! of model-based entity spans. The production implementation talks to a spaCy
//! HTTP sidecar; tests substitute scripted recognizers, and deployments
//! without a sidecar use [`DisabledRecognizer`].

mod spacy;

pub use spacy::SpacyNerClient;

use crate::domain::{EntitySpan, Result};
use async_trait::async_trait;

/// Trait for sources of model-based entity spans
///
/// Implementations must return spans whose byte offsets slice `text` back to
/// the span's own `text` field; the detection pipeline relies on that
/// invariant when redacting. Label policy (such as ignoring DATE) is applied
/// by the caller, not here.
///
/// # Example
///
/// ```no_run
/// use privchat::adapters::ner::{DisabledRecognizer, EntityRecognizer};
///
/// # async fn example() -> privchat::domain::Result<()> {
/// let recognizer = DisabledRecognizer;
/// let spans = recognizer.recognize("My name is John Doe").await?;
/// assert!(spans.is_empty());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait EntityRecognizer: Send + Sync {
    /// Recognize named entities in `text`
    ///
    /// # Errors
    ///
    /// Returns an error if the recognizer backend is unreachable, times out,
    /// or produces a response that cannot be decoded.
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>>;
}

/// Recognizer used when no NER sidecar is configured
///
/// Reports no entities, leaving detection entirely to the pattern bank.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRecognizer;

#[async_trait]
impl EntityRecognizer for DisabledRecognizer {
    async fn recognize(&self, _text: &str) -> Result<Vec<EntitySpan>> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_recognizer_reports_nothing() {
        let recognizer = DisabledRecognizer;
        let spans = recognizer
            .recognize("Dr. Smith lives at 10.0.0.1")
            .await
            .unwrap();
        assert!(spans.is_empty());
    }
}
