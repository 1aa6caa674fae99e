//! Configuration management for PrivChat.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! PrivChat uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting (an empty file is a valid config)
//! - Environment overrides (`PRIVCHAT_*` prefix)
//! - Comprehensive validation
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use privchat::config::load_config_or_default;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Load configuration, falling back to defaults if the file is absent
//! let config = load_config_or_default("privchat.toml")?;
//!
//! println!("Listening on {}", config.server.bind_address());
//! println!("Ollama: {}", config.ollama.base_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! The configuration is organized into sections:
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ServerConfig`] - HTTP bind address and port
//! - [`NerConfig`] - NER sidecar connection
//! - [`OllamaConfig`] - Ollama connection, model preferences, timeouts
//! - [`DetectionConfig`] - Pattern bank override
//! - [`LoggingConfig`] - File logging settings
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8000
//!
//! [ner]
//! base_url = "http://127.0.0.1:8001"
//!
//! [ollama]
//! base_url = "http://127.0.0.1:11434"
//! model_preferences = ["tinyllama:latest", "tinyllama:1.1b"]
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for substitution inside the file, or
//! `PRIVCHAT_<SECTION>_<KEY>` variables to override individual values:
//!
//! ```bash
//! export PRIVCHAT_OLLAMA_BASE_URL="http://ollama.internal:11434"
//! export PRIVCHAT_SERVER_PORT="9000"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, DetectionConfig, LoggingConfig, NerConfig, OllamaConfig, PrivChatConfig,
    ServerConfig,
};
