//! Unit tests for the authentication gate

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{MockTokenRepository, MockUserRepository};
use crate::services::auth::{AuthGate, CallerContext, TokenValidator};
use crate::services::token::{ManualClock, TokenService, TokenServiceConfig};

const EMAIL: &str = "yamada@example.com";

type TestService = TokenService<MockTokenRepository, MockUserRepository>;

fn setup() -> (AuthGate, Arc<TestService>, Arc<ManualClock>, Uuid) {
    let user_id = Uuid::new_v4();
    let clock = Arc::new(ManualClock::default());
    let service = Arc::new(TokenService::with_clock(
        MockTokenRepository::new(),
        MockUserRepository::with_users([user_id]),
        TokenServiceConfig::default(),
        clock.clone(),
    ));
    let gate = AuthGate::new(service.clone());
    (gate, service, clock, user_id)
}

fn expect_token_error(result: Result<CallerContext, DomainError>, expected: TokenError) {
    match result {
        Err(DomainError::Token(actual)) => assert_eq!(actual, expected),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

/// Validator that accepts any credential and returns fixed claims
struct FixedClaims(Claims);

impl TokenValidator for FixedClaims {
    fn validate_token(&self, _token: &str) -> Result<Claims, DomainError> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn test_authenticate_access_token() {
    let (gate, service, _, user_id) = setup();
    let pair = service.generate_tokens(user_id, EMAIL).await.unwrap();

    let caller = gate.authenticate(&pair.access_token).unwrap();

    assert_eq!(caller.caller_id(), user_id);
    assert_eq!(caller.email, EMAIL);
}

#[test]
fn test_empty_credential_is_missing() {
    let (gate, _, _, _) = setup();

    expect_token_error(gate.authenticate(""), TokenError::MissingToken);
    expect_token_error(gate.authenticate("   "), TokenError::MissingToken);
}

#[test]
fn test_garbage_credential_is_invalid() {
    let (gate, _, _, _) = setup();
    expect_token_error(gate.authenticate("garbage"), TokenError::InvalidToken);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_credential() {
    let (gate, service, _, user_id) = setup();
    let pair = service.generate_tokens(user_id, EMAIL).await.unwrap();

    expect_token_error(gate.authenticate(&pair.refresh_token), TokenError::InvalidClaims);
}

#[tokio::test]
async fn test_expired_access_token() {
    let (gate, service, clock, user_id) = setup();
    let pair = service.generate_tokens(user_id, EMAIL).await.unwrap();

    clock.advance(Duration::minutes(20));

    expect_token_error(gate.authenticate(&pair.access_token), TokenError::ExpiredToken);
}

#[test]
fn test_non_uuid_subject_is_invalid_claims() {
    let mut claims = Claims::new(
        Uuid::new_v4(),
        EMAIL,
        TokenKind::Access,
        Utc::now(),
        Duration::minutes(15),
        "p-log",
        "p-log-users",
    )
    .unwrap();
    claims.sub = "github|12345".to_string();
    let gate = AuthGate::new(Arc::new(FixedClaims(claims)));

    expect_token_error(gate.authenticate("anything"), TokenError::InvalidClaims);
}

#[test]
fn test_caller_context_from_claims() {
    let user_id = Uuid::new_v4();
    let claims = Claims::new(
        user_id,
        EMAIL,
        TokenKind::Access,
        Utc::now(),
        Duration::minutes(15),
        "p-log",
        "p-log-users",
    )
    .unwrap();

    let caller = CallerContext::from_claims(&claims).unwrap();
    assert_eq!(caller.user_id, user_id);
    assert_eq!(caller.email, EMAIL);
}
