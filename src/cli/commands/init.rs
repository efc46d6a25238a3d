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
    #[arg(short, long, default_value = "medtrack.toml")]
    pub output: String,

    /// Include every option with comments
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

        println!("📝 Initializing Medtrack configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set database_target to 'memory' or 'postgresql'");
                println!("  3. For PostgreSQL, set MEDTRACK_PG_URL in .env");
                println!("  4. Validate configuration: medtrack validate-config");
                println!("  5. Start the API: medtrack serve");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Medtrack Configuration File

environment = "development"
database_target = "memory"  # memory | postgresql

[application]
log_level = "info"
calendar = "local"

[server]
host = "0.0.0.0"
port = 8080
cors_allowed_origin = "http://localhost:3000"

# [postgresql]
# connection_string = "${MEDTRACK_PG_URL}"
# ssl_mode = "require"

[logging]
local_enabled = false
local_path = "/var/log/medtrack"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Medtrack Configuration File
#
# Every option is listed with its default. Values of the form ${VAR} are
# read from the environment (a .env file is loaded first). Any key can also
# be overridden with MEDTRACK_<SECTION>_<KEY>, e.g. MEDTRACK_SERVER_PORT.

# ============================================================================
# Environment
# ============================================================================
# development | staging | production
# Production refuses the in-memory store and ssl_mode = "disable".
environment = "development"

# ============================================================================
# Storage Backend
# ============================================================================
# memory     - process-local, lost on restart
# postgresql - requires the [postgresql] section below
database_target = "memory"

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# Calendar used for "today" in remaining-days reports (local or utc)
calendar = "local"

# ============================================================================
# HTTP Server
# ============================================================================
[server]
host = "0.0.0.0"
port = 8080

# Browser origin allowed by CORS (credentials are allowed)
cors_allowed_origin = "http://localhost:3000"

# Seconds to wait for in-flight requests after a shutdown signal (1-300)
shutdown_timeout_secs = 30

# ============================================================================
# PostgreSQL
# ============================================================================
# Uncomment when database_target = "postgresql". The schema in
# migrations/001_initial_schema.sql is applied on startup.
#
# [postgresql]
# connection_string = "${MEDTRACK_PG_URL}"
#
# # Connection pool settings
# max_connections = 10                # Maximum connections in pool (1-100)
# connection_timeout_seconds = 30     # Timeout for acquiring a connection
# statement_timeout_seconds = 60      # Server-side statement timeout
#
# # disable | allow | prefer | require | verify-ca | verify-full
# ssl_mode = "require"

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files next to the console output
local_enabled = true
local_path = "/var/log/medtrack"

# daily | hourly | never
local_rotation = "daily"
"#
        .to_string()
    }
}
