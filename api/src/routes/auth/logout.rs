use actix_web::{web, HttpRequest, HttpResponse};

use plog_core::repositories::{TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::RefreshTokenRequest;
use crate::handlers::ApiError;

use super::cookies::removal_cookies;
use super::presented_refresh_token;

/// Handler for POST /api/v1/auth/logout
///
/// Revokes the presented refresh token (cookie or body) and clears both
/// auth cookies. Logging out without a refresh token only clears cookies.
///
/// # Response
///
/// ## Success (204 No Content)
///
/// ## Errors
/// - 500 Internal Server Error: store failure
pub async fn logout<R, U>(
    req: HttpRequest,
    state: web::Data<AppState<R, U>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, ApiError>
where
    R: TokenRepository + 'static,
    U: UserRepository + 'static,
{
    if let Some(refresh_token) = presented_refresh_token(&req, body.as_deref()) {
        state.token_service.revoke_refresh_token(&refresh_token).await?;
    }

    let mut response = HttpResponse::NoContent();
    for cookie in removal_cookies(&state.cookies) {
        response.cookie(cookie);
    }
    Ok(response.finish())
}
