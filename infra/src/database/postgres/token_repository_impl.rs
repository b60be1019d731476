//! PostgreSQL implementation of the TokenRepository trait.
//!
//! Rows are keyed by the token hash computed in the core; this layer never
//! sees a raw token.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};

use plog_core::domain::entities::token::RefreshToken;
use plog_core::errors::DomainError;
use plog_core::repositories::TokenRepository;

use super::persistence_error;

/// PostgreSQL implementation of TokenRepository
#[derive(Clone)]
pub struct PgTokenRepository {
    pool: PgPool,
}

impl PgTokenRepository {
    /// Create a new repository over `pool`
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &PgRow) -> Result<RefreshToken, DomainError> {
        let column = |name: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", name, e),
        };

        Ok(RefreshToken {
            id: row.try_get("id").map_err(|e| column("id", e))?,
            user_id: row.try_get("user_id").map_err(|e| column("user_id", e))?,
            token_hash: row.try_get("token_hash").map_err(|e| column("token_hash", e))?,
            expires_at: row.try_get("expires_at").map_err(|e| column("expires_at", e))?,
            revoked: row.try_get("revoked").map_err(|e| column("revoked", e))?,
            created_at: row.try_get("created_at").map_err(|e| column("created_at", e))?,
        })
    }
}

#[async_trait]
impl TokenRepository for PgTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let query = r#"
            INSERT INTO refresh_tokens (
                id, user_id, token_hash, expires_at, revoked, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
        "#;

        sqlx::query(query)
            .bind(token.id)
            .bind(token.user_id)
            .bind(&token.token_hash)
            .bind(token.expires_at)
            .bind(token.revoked)
            .bind(token.created_at)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to save refresh token", e))?;

        Ok(token)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, user_id, token_hash, expires_at, revoked, created_at
            FROM refresh_tokens
            WHERE token_hash = $1
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to find refresh token", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn count_valid_tokens(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        let query = r#"
            SELECT COUNT(*)
            FROM refresh_tokens
            WHERE token_hash = $1
                AND revoked = FALSE
                AND expires_at > $2
        "#;

        let count: i64 = sqlx::query_scalar(query)
            .bind(token_hash)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to count valid refresh tokens", e))?;

        Ok(count.max(0) as u64)
    }

    async fn revoke_token(&self, token_hash: &str) -> Result<u64, DomainError> {
        let query = r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE token_hash = $1 AND revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| persistence_error("Failed to revoke refresh token", e))?;

        Ok(result.rows_affected())
    }
}
