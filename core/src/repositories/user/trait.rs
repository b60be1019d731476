//! User repository trait: the one user-facing collaborator the auth core needs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::DomainError;

/// Lookup of users by identifier
///
/// User CRUD lives elsewhere; the token flow only needs to know that the
/// user a refresh token is issued for exists, so it can fail with a clear
/// `NotFound` instead of a foreign-key violation.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Check whether a user with `user_id` exists
    ///
    /// # Returns
    /// * `Ok(true)` - User exists
    /// * `Ok(false)` - No such user
    /// * `Err(DomainError)` - Database error occurred
    async fn exists(&self, user_id: Uuid) -> Result<bool, DomainError>;
}
