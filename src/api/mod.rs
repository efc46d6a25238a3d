//! REST surface
//!
//! - [`router`] - Routes, shared state, CORS and request tracing
//! - [`handlers`] - One module per resource
//! - [`dto`] - Request body and query parsing with field-level validation
//! - [`response`] - `{statusCode, message, data}` success envelope
//! - [`error`] - Error to HTTP status mapping
//! - [`server`] - Listener and graceful shutdown

pub mod dto;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use response::ApiResponse;
pub use router::{build_router, AppState};
pub use server::{bind, serve};
