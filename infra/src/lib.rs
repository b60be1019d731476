//! # Infrastructure Layer
//!
//! Concrete implementations of the repository traits declared in
//! `plog_core`, backed by PostgreSQL through SQLx:
//!
//! - **Database**: connection pool management
//! - **Repositories**: refresh-token persistence and user existence lookup

pub mod database;

pub use database::{DatabasePool, PgTokenRepository, PgUserRepository, PoolStatistics};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
