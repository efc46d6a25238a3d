//! Storage integrations for Medtrack.
//!
//! - [`database`] - Store traits and the backend factory
//! - [`memory`] - In-memory backend for development and tests
//! - [`postgresql`] - PostgreSQL backend
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern**: services depend only on the
//! `async_trait` store contracts, held as `Arc<dyn Trait + Send + Sync>`.
//! Each backend implements all three contracts, so one instance can serve
//! patients, medications and assignments with shared referential checks.
//!
//! ```rust,no_run
//! use medtrack::adapters::database::create_stores;
//! use medtrack::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("medtrack.toml")?;
//! let stores = create_stores(&config).await?;
//! println!("using {} store", stores.backend_name());
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod memory;
pub mod postgresql;
