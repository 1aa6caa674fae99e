//! External service integrations for PrivChat.
//!
//! This module provides adapters for the two services the gateway talks to:
//!
//! - [`ner`] - Named-entity recognition sidecar (spaCy HTTP service)
//! - [`completion`] - Chat-completion backend (Ollama)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. Both integrations are trait-based:
//! the processing core depends on [`ner::EntityRecognizer`] and
//! [`completion::CompletionBackend`], never on a concrete HTTP client.
//!
//! ```rust,no_run
//! use privchat::adapters::ner::SpacyNerClient;
//! use privchat::config::NerConfig;
//!
//! let config = NerConfig {
//!     enabled: true,
//!     base_url: "http://127.0.0.1:8001".to_string(),
//!     timeout_seconds: 30,
//! };
//!
//! let client = SpacyNerClient::new(&config);
//! // Use client (via the EntityRecognizer trait) to tag prompts
//! ```

pub mod completion;
pub mod ner;
