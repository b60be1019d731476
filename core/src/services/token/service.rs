//! Token service: issuance, validation, refresh and revocation

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{TokenRepository, UserRepository};

use super::clock::{Clock, SystemClock};
use super::codec::TokenCodec;
use super::config::TokenServiceConfig;
use super::store::{hash_token, RefreshStore};

/// Service for managing JWT access tokens and persisted refresh tokens
pub struct TokenService<R: TokenRepository, U: UserRepository> {
    store: RefreshStore<R, U>,
    codec: TokenCodec,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
}

impl<R: TokenRepository, U: UserRepository> TokenService<R, U> {
    /// Creates a new token service instance on the system clock
    ///
    /// # Arguments
    ///
    /// * `repository` - Refresh token persistence
    /// * `users` - User existence lookup
    /// * `config` - Token service configuration
    pub fn new(repository: R, users: U, config: TokenServiceConfig) -> Self {
        Self::with_clock(repository, users, config, Arc::new(SystemClock))
    }

    /// Creates a new token service reading time from `clock`
    pub fn with_clock(
        repository: R,
        users: U,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let codec = TokenCodec::with_algorithm(config.jwt_secret.as_bytes(), config.algorithm);
        let store = RefreshStore::new(repository, users, Arc::clone(&clock));

        Self {
            store,
            codec,
            config,
            clock,
        }
    }

    /// The configuration the service was built with
    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Generates a new token pair for a user
    ///
    /// The refresh token is persisted (by hash) before anything is returned;
    /// if persistence fails, no token leaves the service.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The generated token pair
    /// * `Err(DomainError::NotFound)` - `user_id` is not a known user
    /// * `Err(DomainError)` - Signing or persistence failed
    pub async fn generate_tokens(&self, user_id: Uuid, email: &str) -> Result<TokenPair, DomainError> {
        let access_token = self.mint(user_id, email, TokenKind::Access)?.0;
        let (refresh_token, refresh_claims) = self.mint(user_id, email, TokenKind::Refresh)?;

        let expires_at = refresh_claims
            .expires_at()
            .ok_or(TokenError::TokenGenerationFailed)?;
        self.store
            .insert(hash_token(&refresh_token), user_id, expires_at)
            .await?;

        tracing::debug!(%user_id, "Issued token pair");

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_ttl,
            self.config.refresh_token_ttl,
        ))
    }

    /// Verifies a token and returns its claims
    ///
    /// Signature and time checks come from the codec; issuer must equal and
    /// audience must contain the configured values. Works for both kinds.
    pub fn validate_token(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.codec.decode(token, self.clock.now())?;

        if claims.iss != self.config.issuer {
            tracing::warn!(issuer = %claims.iss, "Rejected token from unexpected issuer");
            return Err(TokenError::InvalidClaims.into());
        }
        if !claims.has_audience(&self.config.audience) {
            tracing::warn!(audience = ?claims.aud, "Rejected token for unexpected audience");
            return Err(TokenError::InvalidClaims.into());
        }

        Ok(claims)
    }

    /// Exchanges a live refresh token for a new access token
    ///
    /// The refresh token itself is left untouched and stays usable.
    ///
    /// # Errors
    ///
    /// * `InvalidClaims` - the token is an access token or has a malformed subject
    /// * `RevokedToken` - the store does not hold exactly one live record for it
    /// * anything `validate_token` returns
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String, DomainError> {
        let claims = self.check_refresh_token(refresh_token).await?;
        let user_id = subject_of(&claims)?;

        let (access_token, _) = self.mint(user_id, &claims.email, TokenKind::Access)?;
        tracing::debug!(%user_id, "Refreshed access token");
        Ok(access_token)
    }

    /// Exchanges a live refresh token for a fresh pair and revokes it
    ///
    /// The new pair is persisted before the old token is revoked, so a
    /// failure part way leaves the caller with a usable token.
    pub async fn rotate_refresh_token(&self, refresh_token: &str) -> Result<TokenPair, DomainError> {
        let claims = self.check_refresh_token(refresh_token).await?;
        let user_id = subject_of(&claims)?;

        let pair = self.generate_tokens(user_id, &claims.email).await?;
        self.store.revoke(&hash_token(refresh_token)).await?;

        tracing::debug!(%user_id, "Rotated refresh token");
        Ok(pair)
    }

    /// Revokes a refresh token
    ///
    /// Unknown or already revoked tokens are not an error.
    pub async fn revoke_refresh_token(&self, refresh_token: &str) -> Result<(), DomainError> {
        let revoked = self.store.revoke(&hash_token(refresh_token)).await?;
        tracing::debug!(revoked, "Revoked refresh token");
        Ok(())
    }

    /// Validates a refresh token against both the signature and the store
    async fn check_refresh_token(&self, refresh_token: &str) -> Result<Claims, DomainError> {
        let claims = self.validate_token(refresh_token)?;
        if claims.kind() != TokenKind::Refresh {
            tracing::warn!(sub = %claims.sub, "Access token presented for refresh");
            return Err(TokenError::InvalidClaims.into());
        }

        if !self.store.is_valid(&hash_token(refresh_token)).await? {
            tracing::warn!(sub = %claims.sub, "Refresh token is not live in the store");
            return Err(TokenError::RevokedToken.into());
        }

        // The store round trip may have crossed the expiry boundary
        self.validate_token(refresh_token)
    }

    fn mint(&self, user_id: Uuid, email: &str, kind: TokenKind) -> Result<(String, Claims), DomainError> {
        let lifetime = match kind {
            TokenKind::Access => self.config.access_token_ttl,
            TokenKind::Refresh => self.config.refresh_token_ttl,
        };
        let claims = Claims::new(
            user_id,
            email,
            kind,
            self.clock.now(),
            lifetime,
            self.config.issuer.as_str(),
            self.config.audience.as_str(),
        )?;
        let token = self.codec.encode(&claims)?;
        Ok((token, claims))
    }
}

fn subject_of(claims: &Claims) -> Result<Uuid, DomainError> {
    claims
        .user_id()
        .map_err(|_| DomainError::from(TokenError::InvalidClaims))
}
