//! PostgreSQL implementation of the UserRepository trait.
//!
//! The `users` table belongs to the user-management side of the system;
//! the auth core only needs to know whether an id exists.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use plog_core::errors::DomainError;
use plog_core::repositories::UserRepository;

use super::persistence_error;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn exists(&self, user_id: Uuid) -> Result<bool, DomainError> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to check user existence", e))
    }
}
