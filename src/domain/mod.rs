//! Domain models and types for PrivChat.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Entity model** ([`EntitySpan`], [`EntityLabel`])
//! - **Error types** ([`PrivChatError`], [`NerError`], [`CompletionError`])
//! - **Result type alias** ([`Result`])
//!
//! # Offsets
//!
//! Entity spans carry half-open byte offsets into the original text,
//! always on UTF-8 character boundaries:
//!
//! ```rust
//! use privchat::domain::{EntityLabel, EntitySpan};
//!
//! let text = "Contact me at john@x.com";
//! let span = EntitySpan::new("john@x.com", EntityLabel::Email, 14, 24);
//! assert_eq!(&text[span.start..span.end], span.text);
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`]; adapters map transport
//! failures into domain errors before they cross a module boundary:
//!
//! ```rust
//! use privchat::domain::{PrivChatError, Result};
//!
//! fn example(prompt: &str) -> Result<()> {
//!     if prompt.trim().is_empty() {
//!         return Err(PrivChatError::Validation(
//!             "Prompt must not be empty".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod label;
pub mod result;
pub mod span;

// Re-export commonly used types for convenience
pub use errors::{CompletionError, NerError, PrivChatError};
pub use label::EntityLabel;
pub use result::Result;
pub use span::EntitySpan;
