//! Token service module for JWT management
//!
//! - [`TokenCodec`]: HMAC signing and verification
//! - [`RefreshStore`]: hashed refresh-token persistence
//! - [`TokenService`]: issuance, validation, refresh and revocation
//! - [`Clock`]: injected time source

mod clock;
mod codec;
mod config;
mod service;
mod store;


pub use clock::{Clock, SystemClock};
#[cfg(any(test, feature = "test-utils"))]
pub use clock::ManualClock;
pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
pub use store::{hash_token, RefreshStore};
