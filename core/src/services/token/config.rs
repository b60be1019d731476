//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use plog_shared::config::JwtConfig;

/// Configuration for the token service
///
/// Built once at startup from [`JwtConfig`] and owned by the service; never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm (HMAC family only)
    pub algorithm: Algorithm,
    /// Issuer stamped into and required on every token
    pub issuer: String,
    /// Audience stamped into and required on every token
    pub audience: String,
    /// Access token lifetime
    pub access_token_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_token_ttl: Duration,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        let defaults = JwtConfig::default();
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: signing_algorithm(&config.algorithm),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_ttl: lifetime(config.access_token_expiry, defaults.access_token_expiry),
            refresh_token_ttl: lifetime(config.refresh_token_expiry, defaults.refresh_token_expiry),
        }
    }
}

/// Unknown names fall back to HS256; non-HMAC names are narrowed by the codec
fn signing_algorithm(name: &str) -> Algorithm {
    name.parse().unwrap_or_else(|_| {
        tracing::warn!(algorithm = name, "Unknown signing algorithm, using HS256");
        Algorithm::HS256
    })
}

/// Out-of-range lifetimes (the struct can be built without `from_source`)
/// fall back to the default instead of overflowing
fn lifetime(seconds: i64, default: i64) -> Duration {
    if JwtConfig::is_valid_lifetime(seconds) {
        Duration::seconds(seconds)
    } else {
        tracing::warn!(seconds, default, "Token lifetime out of range, using default");
        Duration::seconds(default)
    }
}
