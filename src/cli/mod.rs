//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Medtrack using clap.
//!
//! Exit codes: 0 success, 2 configuration error, 4 connection error,
//! 5 fatal error.

pub mod commands;

use clap::{Parser, Subcommand};

/// Medtrack - Medication treatment assignment service
#[derive(Parser, Debug)]
#[command(name = "medtrack")]
#[command(version, about, long_about = None)]
#[command(author = "Medtrack Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "medtrack.toml", env = "MEDTRACK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "MEDTRACK_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve(commands::serve::ServeArgs),

    /// Print the remaining-days report
    Report(commands::report::ReportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
