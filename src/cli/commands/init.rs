//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "privchat.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing PrivChat configuration");
        println!();

        // Check if file already exists
        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        // Generate configuration content
        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        // Write to file
        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Start an Ollama server (https://ollama.com) if you have not already");
                println!("  3. Optional: run a spaCy NER sidecar and set [ner] enabled = true");
                println!("  4. Validate configuration: privchat validate-config");
                println!("  5. Run the gateway: privchat serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# PrivChat Configuration File
# PII-redacting gateway in front of a local Ollama server

[application]
log_level = "info"

[server]
host = "127.0.0.1"
port = 8000

[ner]
enabled = false
base_url = "http://127.0.0.1:8001"
timeout_seconds = 30

[ollama]
base_url = "http://127.0.0.1:11434"
model_preferences = ["tinyllama:latest", "tinyllama:1.1b"]
chat_timeout_seconds = 300
pull_timeout_seconds = 600

[detection]
# pattern_bank = "patterns/pii_patterns.toml"

[logging]
local_enabled = true
local_path = "logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# PrivChat Configuration File
# PII-redacting gateway in front of a local Ollama server
#
# This file contains all configuration options with examples and explanations.
#
# Every section is optional; omitted values fall back to the defaults shown
# here. Environment variables prefixed with PRIVCHAT_ override file values.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# HTTP Server Configuration
# ============================================================================
[server]
# Bind host for the gateway
host = "127.0.0.1"

# Bind port for the gateway
port = 8000

# ============================================================================
# Named-Entity Recognition Sidecar
# ============================================================================
# When enabled, prompts are sent to a spaCy sidecar exposing POST /ents
# before the regex patterns run. When disabled, detection is regex-only.
[ner]
enabled = false

# Base URL of the NER sidecar
base_url = "http://127.0.0.1:8001"

# Request timeout in seconds
timeout_seconds = 30

# ============================================================================
# Ollama Completion Backend
# ============================================================================
[ollama]
# Base URL of the Ollama server
base_url = "http://127.0.0.1:11434"

# Models to try in order at startup; the first one that is installed or can
# be pulled becomes the active model.
model_preferences = ["tinyllama:latest", "tinyllama:1.1b"]

# Timeout for chat completions in seconds
chat_timeout_seconds = 300

# Timeout for model pulls in seconds
pull_timeout_seconds = 600

# ============================================================================
# PII Detection Configuration
# ============================================================================
[detection]
# Optional path to a custom pattern bank; the compiled-in bank is used
# when unset.
# pattern_bank = "patterns/pii_patterns.toml"

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local file logging (JSON lines)
local_enabled = true

# Local log file directory
local_path = "logs"

# Log rotation (daily, hourly or never)
local_rotation = "daily"
"#
        .to_string()
    }
}
