//! Repository interfaces for the persistence the auth core depends on.

pub mod token;
pub mod user;

pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
pub use token::MockTokenRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user::MockUserRepository;
