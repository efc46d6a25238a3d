//! PostgreSQL storage backend
//!
//! Stores patients, medications and assignments in three tables linked by
//! foreign keys. The schema is applied on startup.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
