//! Mapping from domain failures to HTTP responses
//!
//! Every token failure except `TokenGenerationFailed` is the caller's
//! problem and maps to 401; a missing user is 404; everything else is 500
//! with a generic message.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use plog_core::errors::{DomainError, TokenError};
use plog_shared::{error_codes, ErrorResponse};

/// Domain error carried through actix's error machinery
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        Self(DomainError::Token(error))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        classify(&self.0).0
    }

    fn error_response(&self) -> HttpResponse {
        handle_domain_error(&self.0)
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code, message) = classify(error);

    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    } else {
        tracing::warn!(error = %error, code, "Request rejected");
    }

    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

fn classify(error: &DomainError) -> (StatusCode, &'static str, String) {
    match error {
        DomainError::Token(token_error) => {
            let code = match token_error {
                TokenError::MissingToken => error_codes::MISSING_TOKEN,
                TokenError::InvalidToken => error_codes::TOKEN_INVALID,
                TokenError::ExpiredToken => error_codes::TOKEN_EXPIRED,
                TokenError::InvalidClaims => error_codes::INVALID_CLAIMS,
                TokenError::RevokedToken => error_codes::TOKEN_REVOKED,
                TokenError::TokenGenerationFailed => {
                    return internal(error_codes::INTERNAL_ERROR);
                }
            };
            (StatusCode::UNAUTHORIZED, code, token_error.to_string())
        }
        DomainError::NotFound { .. } => (
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            error.to_string(),
        ),
        DomainError::Persistence { .. } => internal(error_codes::DATABASE_ERROR),
        DomainError::Internal { .. } => internal(error_codes::INTERNAL_ERROR),
    }
}

fn internal(code: &'static str) -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code,
        "An internal error occurred".to_string(),
    )
}
