//! # p-log Core
//!
//! Core authentication logic and domain layer for the p-log backend.
//! This crate contains the token entities, the error taxonomy, repository
//! interfaces for refresh-token persistence and user lookup, and the
//! services built on top of them:
//!
//! - [`TokenCodec`] signs and verifies JWTs
//! - [`RefreshStore`] records which refresh tokens are live
//! - [`TokenService`] issues, validates, refreshes and revokes tokens
//! - [`AuthGate`] resolves a bearer credential into a [`CallerContext`]

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{Claims, RefreshToken, TokenKind, TokenPair};
pub use errors::{DomainError, TokenError};
pub use repositories::{TokenRepository, UserRepository};
#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockTokenRepository, MockUserRepository};
pub use services::{
    hash_token, AuthGate, CallerContext, Clock, RefreshStore, SystemClock, TokenCodec,
    TokenService, TokenServiceConfig, TokenValidator,
};
#[cfg(any(test, feature = "test-utils"))]
pub use services::ManualClock;
