// PrivChat - PII-Redacting Chat Gateway
// Copyright (c) 2025 PrivChat Contributors
// Licensed under the MIT License

//! # PrivChat - PII-Redacting Chat Gateway
//!
//! PrivChat is a privacy gateway built in Rust that sits between users and a
//! local Ollama server. Prompts are scanned for personally identifiable
//! information, PII is replaced with placeholder tokens, and only the
//! sanitized text is forwarded to the language model.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Detecting** PII with an ordered regex pattern bank and an optional
//!   spaCy NER sidecar
//! - **Redacting** matched spans into `[[LABEL]]` placeholders before any
//!   text leaves the process
//! - **Completing** sanitized prompts against Ollama's `/api/chat` endpoint
//! - **Serving** the whole flow over HTTP with degraded-mode responses when
//!   the model misbehaves
//!
//! ## Architecture
//!
//! PrivChat follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (prompt orchestration)
//! - [`detection`] - Pattern bank, span merging, redaction and highlighting
//! - [`adapters`] - External integrations (Ollama, spaCy sidecar)
//! - [`server`] - Axum HTTP surface
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use privchat::adapters::completion::OllamaClient;
//! use privchat::adapters::ner::DisabledRecognizer;
//! use privchat::config::PrivChatConfig;
//! use privchat::core::PromptProcessor;
//! use privchat::detection::{DetectionPipeline, PatternBank};
//! use privchat::server::{router, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PrivChatConfig::default();
//!
//!     // Assemble the detection pipeline and the completion backend
//!     let pipeline = DetectionPipeline::new(Arc::new(PatternBank::built_in()?));
//!     let backend = Arc::new(OllamaClient::new(&config.ollama));
//!     let model = backend.select_model(&config.ollama.model_preferences).await?;
//!
//!     let processor = PromptProcessor::new(
//!         pipeline,
//!         Arc::new(DisabledRecognizer),
//!         backend,
//!         model,
//!     );
//!     let app = router(AppState {
//!         processor: Arc::new(processor),
//!     });
//!
//!     let listener = tokio::net::TcpListener::bind(config.server.bind_address()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! ### PII Detection
//!
//! Detection runs the regex pattern bank over the prompt, merges in NER
//! spans, resolves overlaps by priority and rewrites the text:
//!
//! ```rust
//! use std::sync::Arc;
//! use privchat::detection::{DetectionPipeline, PatternBank};
//!
//! # fn main() -> anyhow::Result<()> {
//! let pipeline = DetectionPipeline::new(Arc::new(PatternBank::built_in()?));
//!
//! let outcome = pipeline.run("Email me at jane@example.com", Vec::new());
//! assert_eq!(outcome.redacted_text, "Email me at [[EMAIL]]");
//! assert!(outcome.pii_detected());
//! # Ok(())
//! # }
//! ```
//!
//! ### Degraded Completion
//!
//! The gateway never fails a request because the model did: an empty reply
//! or a transport error is substituted with a `⚠️` notice while the
//! detection results are still returned in full.
//!
//! ## Error Handling
//!
//! PrivChat uses the [`domain::PrivChatError`] type for all errors:
//!
//! ```rust,no_run
//! use privchat::domain::PrivChatError;
//!
//! fn example() -> Result<(), PrivChatError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = privchat::config::load_config("privchat.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! PrivChat uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! # let err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
//! info!("Starting gateway");
//! warn!(label = "EMAIL", "Dropped invalid span");
//! error!(error = ?err, "Completion failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod detection;
pub mod domain;
pub mod logging;
pub mod server;
