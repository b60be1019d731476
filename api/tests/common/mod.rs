//! Shared fixtures for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;
use uuid::Uuid;

use plog_api::AppState;
use plog_core::repositories::{MockTokenRepository, MockUserRepository};
use plog_core::services::{ManualClock, TokenService, TokenServiceConfig};
use plog_shared::config::{AuthConfig, JwtConfig};

pub const EMAIL: &str = "kato@example.com";

pub type TestState = AppState<MockTokenRepository, MockUserRepository>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub service: Arc<TokenService<MockTokenRepository, MockUserRepository>>,
    pub tokens: MockTokenRepository,
    pub clock: Arc<ManualClock>,
    pub user_id: Uuid,
}

pub fn context() -> TestContext {
    context_with(JwtConfig::new("api-test-secret"))
}

pub fn rotating_context() -> TestContext {
    context_with(JwtConfig::new("api-test-secret").with_rotation(true))
}

fn context_with(jwt: JwtConfig) -> TestContext {
    let user_id = Uuid::new_v4();
    let tokens = MockTokenRepository::new();
    let clock = Arc::new(ManualClock::default());

    let service = Arc::new(TokenService::with_clock(
        tokens.clone(),
        MockUserRepository::with_users([user_id]),
        TokenServiceConfig::from(&jwt),
        clock.clone(),
    ));
    let auth = AuthConfig {
        jwt,
        ..AuthConfig::default()
    };
    let state = web::Data::new(AppState::new(service.clone(), &auth));

    TestContext {
        state,
        service,
        tokens,
        clock,
        user_id,
    }
}
