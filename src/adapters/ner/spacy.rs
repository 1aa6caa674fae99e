//! spaCy NER sidecar client
//!
//! This module provides the HTTP implementation of [`EntityRecognizer`]. The
//! sidecar exposes a single `POST /ents` endpoint that tags a text with
//! spaCy and returns entities with **character** offsets; this client converts
//! them to byte offsets before handing spans to the detection pipeline.

use super::EntityRecognizer;
use crate::config::NerConfig;
use crate::domain::{EntityLabel, EntitySpan, NerError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct EntsRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct EntsResponse {
    #[serde(default)]
    entities: Vec<RawEntity>,
}

/// Entity as reported by the sidecar, offsets counted in characters
#[derive(Debug, Deserialize)]
struct RawEntity {
    text: String,
    label: String,
    start: usize,
    end: usize,
}

/// HTTP client for the spaCy sidecar
///
/// # Example
///
/// ```no_run
/// use privchat::adapters::ner::{EntityRecognizer, SpacyNerClient};
/// use privchat::config::NerConfig;
///
/// # async fn example() -> privchat::domain::Result<()> {
/// let config = NerConfig::default();
/// let client = SpacyNerClient::new(&config);
///
/// let spans = client.recognize("My name is John Doe").await?;
/// # Ok(())
/// # }
/// ```
pub struct SpacyNerClient {
    /// Base URL of the sidecar, without a trailing slash
    base_url: String,

    /// HTTP client for making requests
    client: Client,
}

impl SpacyNerClient {
    /// Create a new sidecar client
    pub fn new(config: &NerConfig) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl EntityRecognizer for SpacyNerClient {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>> {
        let url = format!("{}/ents", self.base_url);

        let resp = self
            .client
            .post(&url)
            .json(&EntsRequest { text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NerError::Timeout(e.to_string())
                } else {
                    NerError::ConnectionFailed(e.to_string())
                }
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(NerError::ServerError { status, message }.into());
        }

        let payload = resp
            .json::<EntsResponse>()
            .await
            .map_err(|e| NerError::InvalidResponse(e.to_string()))?;

        tracing::debug!(count = payload.entities.len(), "NER sidecar returned entities");

        Ok(convert_entities(text, payload.entities))
    }
}

/// Convert sidecar character offsets to byte offsets
///
/// Entities whose offsets fall outside the text, or whose reported text does
/// not match the slice at those offsets, are skipped with a warning rather
/// than failing the whole request.
fn convert_entities(text: &str, raw: Vec<RawEntity>) -> Vec<EntitySpan> {
    // Byte offset of each character, plus one past-the-end sentinel so a
    // char end of `text.chars().count()` maps to `text.len()`.
    let byte_of: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect();

    let mut spans = Vec::with_capacity(raw.len());
    for entity in raw {
        let (start, end) = match (byte_of.get(entity.start), byte_of.get(entity.end)) {
            (Some(&start), Some(&end)) if start < end => (start, end),
            _ => {
                tracing::warn!(
                    label = %entity.label,
                    start = entity.start,
                    end = entity.end,
                    "Skipping NER entity with out-of-range offsets"
                );
                continue;
            }
        };

        let slice = &text[start..end];
        if slice != entity.text {
            tracing::warn!(
                label = %entity.label,
                reported = %entity.text,
                actual = %slice,
                "Skipping NER entity whose text does not match its offsets"
            );
            continue;
        }

        spans.push(EntitySpan::new(
            entity.text,
            EntityLabel::from(entity.label),
            start,
            end,
        ));
    }

    spans
}
