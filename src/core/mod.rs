//! Core business logic for PrivChat.
//!
//! This module contains the request orchestration for the gateway.
//!
//! # Modules
//!
//! - [`processor`] - Prompt processing: validate, detect, redact, complete
//!
//! # Request Workflow
//!
//! One prompt flows through these steps:
//!
//! 1. **Validate**: reject empty or whitespace-only prompts
//! 2. **Recognize**: fetch model-based entity spans (dates are ignored)
//! 3. **Detect**: run the pattern bank, classifier, and conflict resolution
//! 4. **Redact**: build the placeholder text and the highlighted markup
//! 5. **Complete**: send the redacted text to the model; transport failures
//!    degrade to an inline notice instead of failing the request
//!
//! # Example
//!
//! ```rust,no_run
//! use privchat::adapters::completion::OllamaClient;
//! use privchat::adapters::ner::DisabledRecognizer;
//! use privchat::config::OllamaConfig;
//! use privchat::core::processor::PromptProcessor;
//! use privchat::detection::{DetectionPipeline, PatternBank};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bank = Arc::new(PatternBank::built_in()?);
//! let pipeline = DetectionPipeline::new(bank);
//! let backend = Arc::new(OllamaClient::new(&OllamaConfig::default()));
//!
//! let processor = PromptProcessor::new(
//!     pipeline,
//!     Arc::new(DisabledRecognizer),
//!     backend,
//!     "tinyllama:latest",
//! );
//!
//! let outcome = processor.process("My card ends in 4242").await?;
//! println!("PII detected: {}", outcome.pii_detected);
//! # Ok(())
//! # }
//! ```

pub mod processor;

pub use processor::{ProcessOutcome, PromptProcessor, COMPLETION_ERROR_PREFIX, EMPTY_REPLY_NOTICE};
