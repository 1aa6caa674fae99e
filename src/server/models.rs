//! API request and response types
//!
//! Wire shapes for the HTTP surface. The response deliberately strips span
//! offsets: callers get entity text and label only, plus the highlighted
//! markup for display.

use crate::core::processor::ProcessOutcome;
use crate::domain::EntityLabel;
use serde::{Deserialize, Serialize};

/// Body of `POST /process`
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessRequest {
    /// The raw user prompt
    pub prompt: String,
}

/// One detected entity, offsets stripped
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EntityView {
    /// Matched text
    pub text: String,

    /// Entity category
    pub label: EntityLabel,
}

/// Body of a successful `POST /process` response
#[derive(Debug, Clone, Serialize)]
pub struct ProcessResponse {
    /// Detected entities in final merged order
    pub entities: Vec<EntityView>,

    /// Prompt with entities wrapped in labeled markup
    pub highlighted_text: String,

    /// Model reply, or a degraded notice
    pub llm_response: String,

    /// True iff any entity was detected
    pub pii_detected: bool,
}

impl From<ProcessOutcome> for ProcessResponse {
    fn from(outcome: ProcessOutcome) -> Self {
        let entities = outcome
            .entities
            .into_iter()
            .map(|span| EntityView {
                text: span.text,
                label: span.label,
            })
            .collect();

        Self {
            entities,
            highlighted_text: outcome.highlighted_text,
            llm_response: outcome.llm_response,
            pii_detected: outcome.pii_detected,
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Always "ok" when the server is able to answer
    pub status: String,

    /// The completion model selected at startup
    pub model: String,
}
