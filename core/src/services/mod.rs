//! Business services containing domain logic and use cases.

pub mod auth;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthGate, CallerContext, TokenValidator};
pub use token::{
    hash_token, Clock, RefreshStore, SystemClock, TokenCodec, TokenService, TokenServiceConfig,
};
#[cfg(any(test, feature = "test-utils"))]
pub use token::ManualClock;
