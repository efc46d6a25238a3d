//! Serve command implementation
//!
//! This module implements the `serve` command, which runs the HTTP API until
//! a shutdown signal arrives.

use crate::adapters::database::create_stores;
use crate::api::{bind, build_router, serve, AppState};
use crate::config::load_config;
use crate::core::SystemClock;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Override the configured listen port
    #[arg(short, long)]
    pub port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!("Starting serve command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Some(port) = self.port {
            tracing::info!(port, "Overriding server port from CLI");
            config.server.port = port;
        }

        let stores = match create_stores(&config).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize stores");
                eprintln!("Failed to connect to the database: {e}");
                return Ok(4); // Connection error exit code
            }
        };
        tracing::info!(backend = stores.backend_name(), "Stores ready");

        let clock = SystemClock::from_setting(&config.application.calendar);
        let state = AppState::new(stores, Arc::new(clock));

        let router = match build_router(state, &config.server.cors_allowed_origin) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Invalid server configuration: {e}");
                return Ok(2);
            }
        };

        let listener = match bind(&config.server).await {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %e, "Failed to bind listener");
                eprintln!("{e}");
                return Ok(5); // Fatal error exit code
            }
        };

        println!("Medtrack listening on {}", config.server.bind_address());

        let drain_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
        if let Err(e) = serve(listener, router, drain_timeout, shutdown_signal).await {
            tracing::error!(error = %e, "Server terminated with an error");
            eprintln!("Server failed: {e}");
            return Ok(5);
        }

        println!("Medtrack stopped");
        Ok(0)
    }
}
