pub mod auth;

pub use auth::{MeResponse, RefreshTokenRequest, RefreshTokenResponse};
pub use plog_shared::ErrorResponse;
