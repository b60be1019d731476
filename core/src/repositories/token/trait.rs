//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken record persistence operations
///
/// Implementations own the `refresh_tokens` rows. Only hashes are stored;
/// `token_hash` is unique. Rows are never deleted by the token flow, and the
/// only mutation after insert is flipping `revoked` to true.
///
/// Every method is a single durable read or write. Implementations must not
/// retry internally; cancellation is propagated by dropping the future.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token record
    ///
    /// # Arguments
    /// * `token` - The RefreshToken record to persist
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved record
    /// * `Err(DomainError::Persistence)` - Save failed (e.g. duplicate hash, lost connection)
    ///
    /// # Example
    /// ```no_run
    /// # use chrono::{Duration, Utc};
    /// # use uuid::Uuid;
    /// # use plog_core::repositories::TokenRepository;
    /// # use plog_core::domain::entities::token::RefreshToken;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// let now = Utc::now();
    /// let token = RefreshToken::new(Uuid::new_v4(), "sha512_hex".to_string(), now + Duration::days(7), now);
    ///
    /// let saved = repo.save_refresh_token(token).await?;
    /// println!("Token saved with ID: {}", saved.id);
    /// # Ok(())
    /// # }
    /// ```
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found
    /// * `Ok(None)` - No token found with given hash
    /// * `Err(DomainError)` - Database error occurred
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Count records with `token_hash` that are unexpired at `now` and not revoked
    ///
    /// With the unique index on `token_hash` the result is 0 or 1.
    async fn count_valid_tokens(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError>;

    /// Revoke every record matching `token_hash`
    ///
    /// # Returns
    /// * `Ok(n)` - Number of records that flipped from unrevoked to revoked
    /// * `Err(DomainError)` - Revocation failed
    async fn revoke_token(&self, token_hash: &str) -> Result<u64, DomainError>;
}
