//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{DatabaseTarget, Environment, MedtrackConfig};
use super::secret::secret_string;
use crate::domain::errors::MedtrackError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into MedtrackConfig
/// 4. Applies environment variable overrides (MEDTRACK_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use medtrack::config::loader::load_config;
///
/// let config = load_config("medtrack.toml").expect("Failed to load config");
/// println!("listening on {}", config.server.bind_address());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<MedtrackConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MedtrackError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        MedtrackError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text, with substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus the file access errors.
pub fn parse_config(contents: &str) -> Result<MedtrackConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: MedtrackConfig = toml::from_str(&contents)
        .map_err(|e| MedtrackError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        MedtrackError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied through untouched.
///
/// # Errors
///
/// Returns an error listing every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| MedtrackError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(MedtrackError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        MedtrackError::Configuration(format!("Invalid value '{value}' for {name}"))
    })
}

/// Applies environment variable overrides using the MEDTRACK_* prefix
///
/// Environment variables follow the pattern: MEDTRACK_<SECTION>_<KEY>
/// For example: MEDTRACK_SERVER_PORT, MEDTRACK_POSTGRESQL_SSL_MODE
fn apply_env_overrides(config: &mut MedtrackConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("MEDTRACK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("MEDTRACK_APPLICATION_CALENDAR") {
        config.application.calendar = val;
    }

    if let Ok(val) = std::env::var("MEDTRACK_ENVIRONMENT") {
        config.environment = match val.as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            other => {
                return Err(MedtrackError::Configuration(format!(
                    "Invalid value '{other}' for MEDTRACK_ENVIRONMENT"
                )))
            }
        };
    }

    // Server overrides
    if let Ok(val) = std::env::var("MEDTRACK_SERVER_HOST") {
        config.server.host = val;
    }
    if let Ok(val) = std::env::var("MEDTRACK_SERVER_PORT") {
        config.server.port = parse_override("MEDTRACK_SERVER_PORT", &val)?;
    }
    if let Ok(val) = std::env::var("MEDTRACK_SERVER_CORS_ALLOWED_ORIGIN") {
        config.server.cors_allowed_origin = val;
    }
    if let Ok(val) = std::env::var("MEDTRACK_SERVER_SHUTDOWN_TIMEOUT_SECS") {
        config.server.shutdown_timeout_secs =
            parse_override("MEDTRACK_SERVER_SHUTDOWN_TIMEOUT_SECS", &val)?;
    }

    if let Ok(val) = std::env::var("MEDTRACK_DATABASE_TARGET") {
        config.database_target = match val.as_str() {
            "memory" => DatabaseTarget::Memory,
            "postgresql" => DatabaseTarget::PostgreSQL,
            other => {
                return Err(MedtrackError::Configuration(format!(
                    "Invalid value '{other}' for MEDTRACK_DATABASE_TARGET"
                )))
            }
        };
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg_config) = config.postgresql {
        if let Ok(val) = std::env::var("MEDTRACK_POSTGRESQL_CONNECTION_STRING") {
            pg_config.connection_string = secret_string(val);
        }
        if let Ok(val) = std::env::var("MEDTRACK_POSTGRESQL_MAX_CONNECTIONS") {
            pg_config.max_connections =
                parse_override("MEDTRACK_POSTGRESQL_MAX_CONNECTIONS", &val)?;
        }
        if let Ok(val) = std::env::var("MEDTRACK_POSTGRESQL_STATEMENT_TIMEOUT_SECONDS") {
            pg_config.statement_timeout_seconds =
                parse_override("MEDTRACK_POSTGRESQL_STATEMENT_TIMEOUT_SECONDS", &val)?;
        }
        if let Ok(val) = std::env::var("MEDTRACK_POSTGRESQL_SSL_MODE") {
            pg_config.ssl_mode = val;
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("MEDTRACK_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("MEDTRACK_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Ok(val) = std::env::var("MEDTRACK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("MEDTRACK_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
