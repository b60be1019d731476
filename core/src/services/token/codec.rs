//! JWT encoding and decoding with a shared HMAC secret

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

/// HMAC algorithms accepted on decode
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Signs claims into compact JWTs and verifies them back
///
/// Pure: no I/O. Time-based checks take `now` from the caller so the same
/// codec works against a real or a manual clock.
#[derive(Clone)]
pub struct TokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates an HS256 codec keyed by `secret`
    pub fn new(secret: &[u8]) -> Self {
        Self::with_algorithm(secret, Algorithm::HS256)
    }

    /// Creates a codec signing with `algorithm`
    ///
    /// Non-HMAC algorithms fall back to HS256; asymmetric signing is not
    /// supported.
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Self {
        let algorithm = if HMAC_ALGORITHMS.contains(&algorithm) {
            algorithm
        } else {
            tracing::warn!(?algorithm, "Unsupported signing algorithm, using HS256");
            Algorithm::HS256
        };

        let mut validation = Validation::new(algorithm);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // exp/nbf are checked against the injected clock, aud/iss by the service
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Encodes claims into a signed JWT
    pub fn encode(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(self.algorithm), claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::TokenGenerationFailed
        })
    }

    /// Verifies `token` and returns its claims
    ///
    /// # Errors
    ///
    /// * `InvalidToken` - malformed, bad signature, non-HMAC algorithm, or not yet valid at `now`
    /// * `ExpiredToken` - `exp` is at or before `now`
    /// * `InvalidClaims` - signature verified but the payload is not a claim set
    pub fn decode(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        // A broken header is a structural failure, not a claims failure
        decode_header(token).map_err(|_| TokenError::InvalidToken)?;

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) => TokenError::InvalidClaims,
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                _ => TokenError::InvalidToken,
            })?
            .claims;

        if claims.is_expired_at(now) {
            return Err(TokenError::ExpiredToken);
        }
        if claims.is_premature_at(now) {
            return Err(TokenError::InvalidToken);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}
