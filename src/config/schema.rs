//! Configuration schema types
//!
//! This module defines the configuration structure for PrivChat.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Main PrivChat configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section carries working defaults, so an empty file (or no file at
/// all) yields a gateway that binds locally and talks to local sidecars.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrivChatConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// NER sidecar configuration
    #[serde(default)]
    pub ner: NerConfig,

    /// Ollama server configuration
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Detection settings
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PrivChatConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.ner.validate()?;
        self.ollama.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// The `host:port` string the listener binds
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("server.host cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// NER sidecar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerConfig {
    /// Whether model-based entity recognition is used at all
    ///
    /// Off by default: the sidecar is an optional deployment, and detection
    /// falls back to the pattern bank alone without it.
    #[serde(default)]
    pub enabled: bool,

    /// Base URL of the spaCy sidecar
    #[serde(default = "default_ner_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_ner_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl NerConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.enabled {
            return Ok(());
        }

        Url::parse(&self.base_url)
            .map_err(|e| format!("ner.base_url is not a valid URL: {e}"))?;

        if self.timeout_seconds == 0 {
            return Err("ner.timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for NerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: default_ner_base_url(),
            timeout_seconds: default_ner_timeout_seconds(),
        }
    }
}

/// Ollama server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server
    #[serde(default = "default_ollama_base_url")]
    pub base_url: String,

    /// Model tags to try at startup, in order of preference
    #[serde(default = "default_model_preferences")]
    pub model_preferences: Vec<String>,

    /// Timeout for one chat completion, in seconds
    #[serde(default = "default_chat_timeout_seconds")]
    pub chat_timeout_seconds: u64,

    /// Timeout for one model pull, in seconds
    #[serde(default = "default_pull_timeout_seconds")]
    pub pull_timeout_seconds: u64,
}

impl OllamaConfig {
    fn validate(&self) -> Result<(), String> {
        Url::parse(&self.base_url)
            .map_err(|e| format!("ollama.base_url is not a valid URL: {e}"))?;

        if self.model_preferences.is_empty() {
            return Err("ollama.model_preferences must list at least one model".to_string());
        }

        if self.chat_timeout_seconds == 0 {
            return Err("ollama.chat_timeout_seconds must be > 0".to_string());
        }

        if self.pull_timeout_seconds == 0 {
            return Err("ollama.pull_timeout_seconds must be > 0".to_string());
        }

        Ok(())
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            model_preferences: default_model_preferences(),
            chat_timeout_seconds: default_chat_timeout_seconds(),
            pull_timeout_seconds: default_pull_timeout_seconds(),
        }
    }
}

/// Detection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Optional path to a custom pattern bank TOML file
    ///
    /// When absent, the bank compiled into the binary is used.
    #[serde(default)]
    pub pattern_bank: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

fn default_ner_base_url() -> String {
    "http://127.0.0.1:8001".to_string()
}

fn default_ner_timeout_seconds() -> u64 {
    30
}

fn default_ollama_base_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_model_preferences() -> Vec<String> {
    vec!["tinyllama:latest".to_string(), "tinyllama:1.1b".to_string()]
}

fn default_chat_timeout_seconds() -> u64 {
    300
}

fn default_pull_timeout_seconds() -> u64 {
    600
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PrivChatConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let config = PrivChatConfig::default();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.server.bind_address(), "127.0.0.1:8000");
        assert!(!config.ner.enabled);
        assert_eq!(config.ner.base_url, "http://127.0.0.1:8001");
        assert_eq!(config.ollama.base_url, "http://127.0.0.1:11434");
        assert_eq!(
            config.ollama.model_preferences,
            vec!["tinyllama:latest", "tinyllama:1.1b"]
        );
        assert_eq!(config.ollama.chat_timeout_seconds, 300);
        assert_eq!(config.ollama.pull_timeout_seconds, 600);
        assert!(config.detection.pattern_bank.is_none());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = PrivChatConfig::default();
        config.application.log_level = "verbose".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.contains("log_level"));
    }

    #[test]
    fn test_empty_host_rejected() {
        let mut config = PrivChatConfig::default();
        config.server.host = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_ner_url_rejected() {
        let mut config = PrivChatConfig::default();
        config.ner.enabled = true;
        config.ner.base_url = "not a url".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.contains("ner.base_url"));
    }

    #[test]
    fn test_invalid_ner_url_accepted_when_disabled() {
        let mut config = PrivChatConfig::default();
        config.ner.enabled = false;
        config.ner.base_url = "not a url".to_string();

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_model_preferences_rejected() {
        let mut config = PrivChatConfig::default();
        config.ollama.model_preferences.clear();

        let err = config.validate().unwrap_err();
        assert!(err.contains("model_preferences"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = PrivChatConfig::default();
        config.ollama.chat_timeout_seconds = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_rotation_rejected() {
        let mut config = PrivChatConfig::default();
        config.logging.local_rotation = "weekly".to_string();

        let err = config.validate().unwrap_err();
        assert!(err.contains("local_rotation"));
    }

    #[test]
    fn test_minimal_toml_parses_with_defaults() {
        let config: PrivChatConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8000);
        assert!(!config.ner.enabled);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: PrivChatConfig = toml::from_str(
            r#"
[server]
port = 9000
"#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.ollama.chat_timeout_seconds, 300);
    }
}
