//! Shared configuration and wire types for the p-log server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types (JWT, database, server, environment and logging)
//! - The error response structure returned by the HTTP boundary

pub mod config;
pub mod errors;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, JwtConfig, LogFormat, LoggingConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
