//! Token error taxonomy
//!
//! Every variant is a distinct failure the HTTP boundary can map to a status
//! code; the mapping itself lives in the presentation layer.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No credential was supplied
    #[error("Missing token")]
    MissingToken,

    /// Malformed token, bad signature, unexpected algorithm or not yet valid
    #[error("Invalid token")]
    InvalidToken,

    /// `exp` has passed
    #[error("Token expired")]
    ExpiredToken,

    /// Signature is fine but issuer, audience, subject or token kind is wrong
    #[error("Invalid claims")]
    InvalidClaims,

    /// Refresh token is unknown to the store, revoked, or expired there
    #[error("Token revoked")]
    RevokedToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
