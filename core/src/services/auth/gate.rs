//! Bearer credential authentication

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

/// Anything that can turn a signed token into verified claims
pub trait TokenValidator: Send + Sync {
    fn validate_token(&self, token: &str) -> Result<Claims, DomainError>;
}

impl<R: TokenRepository, U: UserRepository> TokenValidator for TokenService<R, U> {
    fn validate_token(&self, token: &str) -> Result<Claims, DomainError> {
        TokenService::validate_token(self, token)
    }
}

/// Identity of an authenticated caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    pub user_id: Uuid,
    pub email: String,
}

impl CallerContext {
    /// Builds a context from access-token claims
    ///
    /// Fails with `InvalidClaims` when the subject is not a UUID.
    pub fn from_claims(claims: &Claims) -> Result<Self, TokenError> {
        let user_id = claims.user_id().map_err(|_| TokenError::InvalidClaims)?;
        Ok(Self {
            user_id,
            email: claims.email.clone(),
        })
    }

    pub fn caller_id(&self) -> Uuid {
        self.user_id
    }
}

/// Resolves bearer credentials into a [`CallerContext`]
#[derive(Clone)]
pub struct AuthGate {
    validator: Arc<dyn TokenValidator>,
}

impl AuthGate {
    pub fn new(validator: Arc<dyn TokenValidator>) -> Self {
        Self { validator }
    }

    /// Authenticates a raw credential (the token without any `Bearer ` prefix)
    ///
    /// # Errors
    ///
    /// * `MissingToken` - the credential is empty
    /// * `InvalidClaims` - a refresh token was presented, or the subject is malformed
    /// * anything the validator returns
    pub fn authenticate(&self, credential: &str) -> Result<CallerContext, DomainError> {
        let credential = credential.trim();
        if credential.is_empty() {
            return Err(TokenError::MissingToken.into());
        }

        let claims = self.validator.validate_token(credential)?;
        if claims.kind() == TokenKind::Refresh {
            tracing::warn!(sub = %claims.sub, "Refresh token presented as access credential");
            return Err(TokenError::InvalidClaims.into());
        }

        Ok(CallerContext::from_claims(&claims)?)
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}
