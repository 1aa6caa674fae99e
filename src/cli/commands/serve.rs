//! Serve command implementation
//!
//! Provisions a completion model, assembles the redaction pipeline and runs
//! the HTTP gateway until a shutdown signal arrives.

use std::sync::Arc;

use clap::Args;
use tokio::sync::watch;

use crate::adapters::completion::OllamaClient;
use crate::adapters::ner::{DisabledRecognizer, EntityRecognizer, SpacyNerClient};
use crate::config::load_config_or_default;
use crate::core::PromptProcessor;
use crate::detection::{DetectionPipeline, PatternBank};
use crate::server::{self, AppState};

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the bind host from configuration
    #[arg(long)]
    pub host: Option<String>,

    /// Override the bind port from configuration
    #[arg(long)]
    pub port: Option<u16>,

    /// Skip model provisioning and use the first configured preference as-is
    #[arg(long)]
    pub skip_model_check: bool,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        println!("🚀 Starting PrivChat gateway...");

        // Load configuration (built-in defaults when the file is absent)
        let mut config = match load_config_or_default(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Configuration error: {}", e);
                return Ok(2);
            }
        };

        // Apply CLI overrides
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }

        // Validate configuration
        if let Err(e) = config.validate() {
            eprintln!("❌ Configuration validation failed: {}", e);
            return Ok(2);
        }

        // Load the pattern bank
        let bank = match &config.detection.pattern_bank {
            Some(path) => match PatternBank::from_file(path) {
                Ok(bank) => {
                    println!("📋 Loaded pattern bank from {}", path.display());
                    bank
                }
                Err(e) => {
                    eprintln!("❌ Failed to load pattern bank: {}", e);
                    return Ok(2);
                }
            },
            None => match PatternBank::built_in() {
                Ok(bank) => bank,
                Err(e) => {
                    eprintln!("❌ Failed to compile built-in patterns: {}", e);
                    return Ok(5);
                }
            },
        };
        let pipeline = DetectionPipeline::new(Arc::new(bank));

        // Named-entity recognition sidecar (regex-only detection when disabled)
        let recognizer: Arc<dyn EntityRecognizer> = if config.ner.enabled {
            println!("🔎 NER sidecar: {}", config.ner.base_url);
            Arc::new(SpacyNerClient::new(&config.ner))
        } else {
            println!("🔎 NER sidecar disabled, using regex detection only");
            Arc::new(DisabledRecognizer)
        };

        // Provision a completion model
        let ollama = OllamaClient::new(&config.ollama);
        let model = if self.skip_model_check {
            match config.ollama.model_preferences.first() {
                Some(model) => model.clone(),
                None => {
                    eprintln!("❌ No completion model configured");
                    return Ok(2);
                }
            }
        } else {
            println!("📦 Provisioning completion model...");
            match ollama.select_model(&config.ollama.model_preferences).await {
                Ok(model) => model,
                Err(e) => {
                    eprintln!("❌ Model provisioning failed: {}", e);
                    return Ok(5);
                }
            }
        };
        println!("⚡ Using Ollama model: {}", model);

        let processor = PromptProcessor::new(pipeline, recognizer, Arc::new(ollama), model);
        let state = AppState {
            processor: Arc::new(processor),
        };

        println!(
            "✅ Gateway listening on http://{}",
            config.server.bind_address()
        );

        match server::serve(&config.server, state, shutdown_signal).await {
            Ok(()) => {
                println!("👋 Server stopped");
                Ok(0)
            }
            Err(e) => {
                eprintln!("❌ Server error: {}", e);
                Ok(5)
            }
        }
    }
}
