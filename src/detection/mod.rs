//! Entity detection and redaction for PrivChat
//!
//! This module implements the core detection-and-conflict-resolution
//! pipeline: regex candidates from an ordered pattern bank are combined
//! with NER spans, refined by a context classifier, resolved into a
//! non-overlapping set, and rendered as redacted and highlighted text.
//!
//! # Architecture
//!
//! - **Bank**: ordered label -> (regex, priority) rules, TOML-loadable
//! - **Detector**: applies every bank rule plus the suffix-recovery pass
//! - **Classifier**: context-window label refinement (replaceable policy)
//! - **Merger**: greedy interval scheduling with priority tie-breaks
//! - **Redactor / Highlighter**: placeholder and `<mark>` rendering
//!
//! # Usage
//!
//! ```rust
//! use privchat::detection::{DetectionPipeline, PatternBank};
//! use std::sync::Arc;
//!
//! # fn example() -> anyhow::Result<()> {
//! let bank = Arc::new(PatternBank::built_in()?);
//! let pipeline = DetectionPipeline::new(bank);
//! let outcome = pipeline.run("mail me at a@b.co", Vec::new());
//! assert_eq!(outcome.redacted_text, "mail me at [[EMAIL]]");
//! # Ok(())
//! # }
//! ```

pub mod bank;
pub mod classifier;
pub mod detector;
pub mod highlighter;
pub mod merger;
pub mod pipeline;
pub mod redactor;

// Re-export main types
pub use bank::{PatternBank, PatternRule};
pub use classifier::{ContextClassifier, ContextPolicy};
pub use detector::RegexDetector;
pub use pipeline::{DetectionPipeline, RedactionOutcome};
