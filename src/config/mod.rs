//! Configuration management for Medtrack.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Medtrack uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `MEDTRACK_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use medtrack::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medtrack.toml")?;
//!
//! println!("Bind: {}", config.server.bind_address());
//! println!("Store: {}", config.database_target);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level and the calendar used for "today"
//! - [`ServerConfig`] - Bind address, CORS origin, shutdown timeout
//! - [`PostgreSQLConfig`] - PostgreSQL connection and pool settings
//! - [`LoggingConfig`] - Local file logging
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//! database_target = "postgresql"
//!
//! [application]
//! log_level = "info"
//! calendar = "local"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! cors_allowed_origin = "http://localhost:3000"
//!
//! [postgresql]
//! connection_string = "${MEDTRACK_PG_URL}"
//! ssl_mode = "require"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, DatabaseTarget, Environment, LoggingConfig, MedtrackConfig,
    PostgreSQLConfig, ServerConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
