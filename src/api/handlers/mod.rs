//! Request handlers, one module per resource

pub mod assignment;
pub mod medication;
pub mod patient;
