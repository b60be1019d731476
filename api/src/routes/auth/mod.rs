//! Authentication route handlers
//!
//! - Token refresh
//! - Logout
//! - Current caller

pub mod cookies;
pub mod logout;
pub mod me;
pub mod refresh;

pub use logout::logout;
pub use me::me;
pub use refresh::refresh;

use actix_web::HttpRequest;

use crate::dto::RefreshTokenRequest;

/// Refresh token from the `refresh_token` cookie, else from the JSON body
pub(crate) fn presented_refresh_token(
    req: &HttpRequest,
    body: Option<&RefreshTokenRequest>,
) -> Option<String> {
    req.cookie(cookies::REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .or_else(|| body.map(|body| body.refresh_token.clone()))
        .filter(|token| !token.trim().is_empty())
}
