//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for PrivChat using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// PrivChat - PII-redacting chat gateway
#[derive(Parser, Debug)]
#[command(name = "privchat")]
#[command(version, about, long_about = None)]
#[command(author = "PrivChat Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "privchat.toml", env = "PRIVCHAT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PRIVCHAT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision a completion model and run the HTTP gateway
    Serve(commands::serve::ServeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
