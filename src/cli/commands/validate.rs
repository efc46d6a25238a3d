//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Medtrack configuration file.

use crate::config::load_config;
use crate::config::schema::{DatabaseTarget, MedtrackConfig};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a config that loads is valid.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        match load_config(config_path) {
            Ok(config) => {
                println!("✅ Configuration is valid");
                println!();
                print!("{}", summary(&config));
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                println!();
                Ok(2) // Configuration error exit code
            }
        }
    }
}

fn summary(config: &MedtrackConfig) -> String {
    let mut lines = vec![
        "Configuration Summary:".to_string(),
        format!("  Environment: {:?}", config.environment),
        format!("  Log Level: {}", config.application.log_level),
        format!("  Calendar: {}", config.application.calendar),
        format!("  Listen Address: {}", config.server.bind_address()),
        format!("  CORS Origin: {}", config.server.cors_allowed_origin),
        format!("  Database Target: {}", config.database_target),
    ];

    if config.database_target == DatabaseTarget::PostgreSQL {
        if let Some(ref pg_config) = config.postgresql {
            lines.push(format!(
                "  PostgreSQL Connection: {}",
                pg_config.connection_string.expose_secret().redacted_target()
            ));
            lines.push(format!("  Max Connections: {}", pg_config.max_connections));
            lines.push(format!("  SSL Mode: {}", pg_config.ssl_mode));
        }
    }

    if config.logging.local_enabled {
        lines.push(format!(
            "  Log Files: {} ({})",
            config.logging.local_path, config.logging.local_rotation
        ));
    } else {
        lines.push("  Log Files: disabled".to_string());
    }

    lines.join("\n") + "\n"
}
