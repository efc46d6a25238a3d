//! In-memory storage backend
//!
//! Holds everything in process memory. Data does not survive a restart.

pub mod store;

pub use store::MemoryStore;
