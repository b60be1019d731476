//! Database module - PostgreSQL implementations using SQLx
//!
//! - Connection pool management
//! - Repository implementations for the core traits

pub mod connection;
pub mod postgres;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use postgres::{PgTokenRepository, PgUserRepository};

/// DDL for the `refresh_tokens` table and its indexes
///
/// Applied by deployment tooling; kept here so integration tests can build
/// a scratch schema.
pub const REFRESH_TOKENS_SCHEMA: &str = include_str!("../../schema/refresh_tokens.sql");
