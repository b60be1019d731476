//! Refresh store: the durable record of which refresh tokens are live

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha512};
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;
use crate::repositories::{TokenRepository, UserRepository};

use super::clock::Clock;

/// Hashes a raw token for storage (SHA-512, lowercase hex)
///
/// The raw token never reaches the repository; lookups and revocation go
/// through this digest.
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha512::digest(token.as_bytes()))
}

/// Owns refresh-token persistence on top of a [`TokenRepository`]
///
/// A token is live when exactly one record with its hash exists, that record
/// has not expired, and it has not been revoked.
pub struct RefreshStore<R: TokenRepository, U: UserRepository> {
    tokens: R,
    users: U,
    clock: Arc<dyn Clock>,
}

impl<R: TokenRepository, U: UserRepository> RefreshStore<R, U> {
    /// Creates a store over the given repositories
    pub fn new(tokens: R, users: U, clock: Arc<dyn Clock>) -> Self {
        Self {
            tokens,
            users,
            clock,
        }
    }

    /// Records a newly issued refresh token
    ///
    /// # Errors
    ///
    /// * `NotFound` - `user_id` does not reference an existing user
    /// * `Persistence` - the repository failed
    pub async fn insert(
        &self,
        token_hash: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, DomainError> {
        // Checked up front so a missing user is a NotFound, not a foreign-key violation
        if !self.users.exists(user_id).await? {
            tracing::warn!(%user_id, "Refusing to store refresh token for unknown user");
            return Err(DomainError::NotFound {
                resource: format!("user {}", user_id),
            });
        }

        let record = RefreshToken::new(user_id, token_hash, expires_at, self.clock.now());
        self.tokens.save_refresh_token(record).await.map_err(|e| {
            tracing::error!(%user_id, error = %e, "Failed to store refresh token");
            e
        })
    }

    /// Returns true iff exactly one unexpired, unrevoked record has `token_hash`
    pub async fn is_valid(&self, token_hash: &str) -> Result<bool, DomainError> {
        let live = self
            .tokens
            .count_valid_tokens(token_hash, self.clock.now())
            .await?;
        Ok(live == 1)
    }

    /// Marks every record with `token_hash` as revoked
    ///
    /// Returns the number of records that changed; revoking an unknown or
    /// already revoked token is not an error.
    pub async fn revoke(&self, token_hash: &str) -> Result<u64, DomainError> {
        self.tokens.revoke_token(token_hash).await
    }

    /// Looks up the record for `token_hash`
    pub async fn find(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        self.tokens.find_refresh_token(token_hash).await
    }
}
