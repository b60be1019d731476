//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Whether a token grants API access or may only be exchanged for new access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// User email, informational only
    pub email: String,

    /// Distinguishes refresh tokens from access tokens
    pub is_refresh: bool,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims for a token of `kind` issued at `issued_at`
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `email` - The user's email
    /// * `kind` - Access or refresh
    /// * `issued_at` - Issue time, also used as not-before
    /// * `lifetime` - How long the token stays valid
    /// * `issuer` - Issuer claim
    /// * `audience` - Single audience the token is minted for
    ///
    /// # Errors
    ///
    /// `TokenGenerationFailed` if the expiry falls outside the representable range
    pub fn new(
        user_id: Uuid,
        email: impl Into<String>,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
        lifetime: Duration,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(lifetime)
            .ok_or(TokenError::TokenGenerationFailed)?;
        let issued = issued_at.timestamp();
        Ok(Self {
            sub: user_id.to_string(),
            email: email.into(),
            is_refresh: kind == TokenKind::Refresh,
            iss: issuer.into(),
            aud: vec![audience.into()],
            iat: issued,
            nbf: issued,
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Access or refresh, as signed
    pub fn kind(&self) -> TokenKind {
        if self.is_refresh {
            TokenKind::Refresh
        } else {
            TokenKind::Access
        }
    }

    /// Checks if the claims have expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Checks if the claims are not yet valid at `now`
    pub fn is_premature_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() < self.nbf
    }

    /// Returns true if `audience` is one of the token's audiences
    pub fn has_audience(&self, audience: &str) -> bool {
        self.aud.iter().any(|aud| aud == audience)
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// Gets the user ID from the claims
    ///
    /// # Returns
    ///
    /// `Ok(Uuid)` if the subject can be parsed as a UUID, `Err` otherwise
    pub fn user_id(&self) -> Result<Uuid, uuid::Error> {
        Uuid::parse_str(&self.sub)
    }
}

/// Refresh token record stored in the database
///
/// Only the hash of the raw token is kept. Rows are never deleted by the
/// normal flow; `revoked` flips one way from false to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshToken {
    /// Unique identifier for the refresh token
    pub id: Uuid,

    /// User ID this token belongs to
    pub user_id: Uuid,

    /// Hashed token value
    pub token_hash: String,

    /// Timestamp when the token expires
    pub expires_at: DateTime<Utc>,

    /// Whether the token has been revoked
    pub revoked: bool,

    /// Timestamp when the token was created
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Creates a new, unrevoked refresh token record
    pub fn new(
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_hash,
            expires_at,
            revoked: false,
            created_at,
        }
    }

    /// Checks if the refresh token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// A token is valid if it hasn't expired and hasn't been revoked
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        !self.is_expired_at(now) && !self.revoked
    }

    /// Revokes the refresh token
    pub fn revoke(&mut self) {
        self.revoked = true;
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            access_expires_in: access_ttl.num_seconds(),
            refresh_expires_in: refresh_ttl.num_seconds(),
        }
    }
}
