//! Prompt processor - main orchestrator for one request
//!
//! This module coordinates the full journey of a prompt: input validation,
//! entity recognition, pattern detection, redaction, and the completion call.
//! Detection is correctness-critical and fails the request on any fault;
//! the completion call is the only step allowed to degrade.

use crate::adapters::completion::{CompletionBackend, CompletionOutcome};
use crate::adapters::ner::EntityRecognizer;
use crate::detection::DetectionPipeline;
use crate::domain::{EntityLabel, EntitySpan, PrivChatError, Result};
use std::sync::Arc;

/// Placeholder reply when the model answers with no text
pub const EMPTY_REPLY_NOTICE: &str = "⚠️ LLM returned an empty response";

/// Prefix of the degraded reply when the completion call fails
pub const COMPLETION_ERROR_PREFIX: &str = "⚠️ LLM error: ";

/// Result of processing one prompt end-to-end
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// Final merged spans, in resolution order
    pub entities: Vec<EntitySpan>,

    /// Prompt with every span replaced by its `[[LABEL]]` placeholder;
    /// this is the text the model actually saw
    pub redacted_text: String,

    /// Prompt with every span wrapped in labeled markup, for display
    pub highlighted_text: String,

    /// Model reply, or a degraded notice when the call failed or came
    /// back empty
    pub llm_response: String,

    /// Whether any entity survived conflict resolution
    pub pii_detected: bool,
}

/// Prompt processor
///
/// Holds the detection pipeline and the two service adapters. Stateless with
/// respect to requests; one instance is shared across concurrent requests
/// behind an `Arc`.
pub struct PromptProcessor {
    pipeline: DetectionPipeline,
    recognizer: Arc<dyn EntityRecognizer>,
    backend: Arc<dyn CompletionBackend>,
    model: String,
}

impl PromptProcessor {
    /// Create a new prompt processor
    ///
    /// `model` is the completion model tag selected at startup; it never
    /// changes for the life of the process.
    pub fn new(
        pipeline: DetectionPipeline,
        recognizer: Arc<dyn EntityRecognizer>,
        backend: Arc<dyn CompletionBackend>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            pipeline,
            recognizer,
            backend,
            model: model.into(),
        }
    }

    /// The completion model tag this processor sends prompts to
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Process one prompt end-to-end
    ///
    /// # Errors
    ///
    /// Returns [`PrivChatError::Validation`] for an empty or whitespace-only
    /// prompt and [`PrivChatError::Ner`] when the recognizer fails. A failed
    /// completion call is not an error: the outcome carries a degraded
    /// `llm_response` instead, with all detection fields intact.
    pub async fn process(&self, prompt: &str) -> Result<ProcessOutcome> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(PrivChatError::Validation(
                "Prompt must not be empty".to_string(),
            ));
        }

        // A recognizer fault is fatal: continuing without its spans could
        // send unsanitized text to the completion service.
        let ner_spans = self.recognizer.recognize(prompt).await?;
        let ner_spans: Vec<EntitySpan> = ner_spans
            .into_iter()
            .filter(|span| span.label != EntityLabel::Date)
            .collect();

        let detection = self.pipeline.run(prompt, ner_spans);

        tracing::info!(
            entity_count = detection.entities.len(),
            pii_detected = detection.pii_detected(),
            "Detection pass complete"
        );

        let llm_response = match self
            .backend
            .complete(&self.model, &detection.redacted_text)
            .await
        {
            Ok(CompletionOutcome::Reply(text)) => text,
            Ok(CompletionOutcome::Empty) => {
                tracing::warn!(model = %self.model, "Completion returned an empty reply");
                EMPTY_REPLY_NOTICE.to_string()
            }
            Err(e) => {
                tracing::error!(model = %self.model, error = %e, "Completion call failed");
                format!("{COMPLETION_ERROR_PREFIX}{e}")
            }
        };

        let pii_detected = detection.pii_detected();

        Ok(ProcessOutcome {
            entities: detection.entities,
            redacted_text: detection.redacted_text,
            highlighted_text: detection.highlighted_text,
            llm_response,
            pii_detected,
        })
    }
}
