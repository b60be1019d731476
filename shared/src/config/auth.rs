//! Authentication configuration: JWT signing and the auth cookies

use serde::{Deserialize, Serialize};

use super::{parse_or, string_or, Environment};

/// Secret used when `JWT_SECRET` is not set. Only suitable for local development.
pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// Upper bound for either token lifetime (10 years)
pub const MAX_TOKEN_EXPIRY_SECS: i64 = 10 * 365 * 86_400;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret for signing tokens
    pub secret: String,

    /// HMAC signing algorithm name (HS256, HS384 or HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// JWT issuer claim, checked for equality on validation
    pub issuer: String,

    /// JWT audience claim, checked for membership on validation
    pub audience: String,

    /// Access token lifetime in seconds
    pub access_token_expiry: i64,

    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,

    /// Issue a new refresh token (and revoke the presented one) on refresh
    #[serde(default)]
    pub rotate_refresh_tokens: bool,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            algorithm: default_algorithm(),
            issuer: String::from("p-log"),
            audience: String::from("p-log-users"),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            rotate_refresh_tokens: false,
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set issuer and audience
    pub fn with_scope(mut self, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self.audience = audience.into();
        self
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes.saturating_mul(60);
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days.saturating_mul(86400);
        self
    }

    /// Enable or disable refresh token rotation
    pub fn with_rotation(mut self, rotate: bool) -> Self {
        self.rotate_refresh_tokens = rotate;
        self
    }

    /// Whether `seconds` is usable as a token lifetime
    pub fn is_valid_lifetime(seconds: i64) -> bool {
        (1..=MAX_TOKEN_EXPIRY_SECS).contains(&seconds)
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }

    /// Load from a key lookup (`JWT_*` variables)
    pub fn from_source<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            secret: string_or(lookup, "JWT_SECRET", DEFAULT_JWT_SECRET),
            algorithm: string_or(lookup, "JWT_ALGORITHM", &defaults.algorithm),
            issuer: string_or(lookup, "JWT_ISSUER", &defaults.issuer),
            audience: string_or(lookup, "JWT_AUDIENCE", &defaults.audience),
            access_token_expiry: lifetime_or(
                lookup,
                "JWT_ACCESS_TOKEN_EXPIRY",
                defaults.access_token_expiry,
            ),
            refresh_token_expiry: lifetime_or(
                lookup,
                "JWT_REFRESH_TOKEN_EXPIRY",
                defaults.refresh_token_expiry,
            ),
            rotate_refresh_tokens: parse_or(lookup, "JWT_ROTATE_REFRESH_TOKENS", false),
        }
    }
}

/// Attributes of the `access_token` / `refresh_token` cookies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Path the refresh token cookie is scoped to; must cover both the
    /// refresh and the logout endpoints
    #[serde(default = "default_refresh_path")]
    pub refresh_path: String,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: false, // Set to true in production
            refresh_path: default_refresh_path(),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,
}

impl AuthConfig {
    /// Defaults appropriate for an environment
    pub fn for_environment(env: Environment) -> Self {
        Self {
            jwt: JwtConfig::default(),
            cookies: CookieConfig {
                secure: env.is_production(),
                ..Default::default()
            },
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_source(Environment::from_env(), &|key: &str| std::env::var(key).ok())
    }

    /// Load from a key lookup
    pub fn from_source<F>(env: Environment, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            jwt: JwtConfig::from_source(lookup),
            cookies: CookieConfig {
                secure: parse_or(lookup, "COOKIE_SECURE", env.is_production()),
                ..Default::default()
            },
        }
    }
}

/// Like `parse_or`, but also rejects lifetimes outside `1..=MAX_TOKEN_EXPIRY_SECS`
fn lifetime_or<F>(lookup: &F, key: &str, default: i64) -> i64
where
    F: Fn(&str) -> Option<String>,
{
    let seconds = parse_or(lookup, key, default);
    if JwtConfig::is_valid_lifetime(seconds) {
        seconds
    } else {
        tracing::warn!(key, seconds, default, "Token lifetime out of range, using default");
        default
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_refresh_path() -> String {
    String::from("/api/v1/auth")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert_eq!(config.algorithm, "HS256");
        assert_eq!(config.issuer, "p-log");
        assert_eq!(config.audience, "p-log-users");
        assert!(!config.rotate_refresh_tokens);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("my-secret")
            .with_scope("issuer-a", "audience-a")
            .with_access_expiry_minutes(30)
            .with_refresh_expiry_days(14)
            .with_rotation(true);

        assert_eq!(config.access_token_expiry, 1800);
        assert_eq!(config.refresh_token_expiry, 1209600);
        assert_eq!(config.issuer, "issuer-a");
        assert_eq!(config.audience, "audience-a");
        assert!(config.rotate_refresh_tokens);
        assert!(!config.is_using_default_secret());
    }

    #[test]
    fn test_jwt_config_from_source() {
        let lookup = |key: &str| match key {
            "JWT_SECRET" => Some("env-secret".to_string()),
            "JWT_ISSUER" => Some("staging-plog".to_string()),
            "JWT_ALGORITHM" => Some("HS512".to_string()),
            "JWT_ACCESS_TOKEN_EXPIRY" => Some("60".to_string()),
            "JWT_ROTATE_REFRESH_TOKENS" => Some("true".to_string()),
            _ => None,
        };
        let config = JwtConfig::from_source(&lookup);

        assert_eq!(config.secret, "env-secret");
        assert_eq!(config.issuer, "staging-plog");
        assert_eq!(config.algorithm, "HS512");
        assert_eq!(config.audience, "p-log-users");
        assert_eq!(config.access_token_expiry, 60);
        assert_eq!(config.refresh_token_expiry, 604800);
        assert!(config.rotate_refresh_tokens);
    }

    #[test]
    fn test_jwt_config_rejects_out_of_range_lifetimes() {
        let lookup = |key: &str| match key {
            "JWT_ACCESS_TOKEN_EXPIRY" => Some("-60".to_string()),
            "JWT_REFRESH_TOKEN_EXPIRY" => Some("10000000000000000".to_string()),
            _ => None,
        };
        let config = JwtConfig::from_source(&lookup);

        assert_eq!(config.access_token_expiry, 900);
        assert_eq!(config.refresh_token_expiry, 604800);

        let zero = |key: &str| (key == "JWT_ACCESS_TOKEN_EXPIRY").then(|| "0".to_string());
        assert_eq!(JwtConfig::from_source(&zero).access_token_expiry, 900);
    }

    #[test]
    fn test_lifetime_bounds() {
        assert!(JwtConfig::is_valid_lifetime(1));
        assert!(JwtConfig::is_valid_lifetime(MAX_TOKEN_EXPIRY_SECS));
        assert!(!JwtConfig::is_valid_lifetime(0));
        assert!(!JwtConfig::is_valid_lifetime(-60));
        assert!(!JwtConfig::is_valid_lifetime(MAX_TOKEN_EXPIRY_SECS + 1));
    }

    #[test]
    fn test_cookie_config_follows_environment() {
        assert!(!AuthConfig::for_environment(Environment::Development).cookies.secure);
        assert!(AuthConfig::for_environment(Environment::Production).cookies.secure);
        assert_eq!(
            CookieConfig::default().refresh_path,
            "/api/v1/auth"
        );
    }
}
