use actix_web::{web, HttpRequest, HttpResponse};

use plog_core::errors::TokenError;
use plog_core::repositories::{TokenRepository, UserRepository};

use crate::app::AppState;
use crate::dto::{RefreshTokenRequest, RefreshTokenResponse};
use crate::handlers::ApiError;

use super::cookies::{access_token_cookie, refresh_token_cookie};
use super::presented_refresh_token;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new access token. The refresh token is
/// read from the `refresh_token` cookie, or from the body:
///
/// ```json
/// {
///     "refresh_token": "eyJ..."
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "expires_in": 900
/// }
/// ```
/// With rotation enabled the body also carries `refresh_token` and
/// `refresh_expires_in`, and the refresh cookie is replaced.
///
/// ## Errors
/// - 401 Unauthorized: missing, invalid, expired or revoked refresh token
/// - 500 Internal Server Error: store failure
pub async fn refresh<R, U>(
    req: HttpRequest,
    state: web::Data<AppState<R, U>>,
    body: Option<web::Json<RefreshTokenRequest>>,
) -> Result<HttpResponse, ApiError>
where
    R: TokenRepository + 'static,
    U: UserRepository + 'static,
{
    let refresh_token =
        presented_refresh_token(&req, body.as_deref()).ok_or(TokenError::MissingToken)?;
    let access_ttl = state.token_service.config().access_token_ttl.num_seconds();

    if state.rotate_refresh_tokens {
        let pair = state.token_service.rotate_refresh_token(&refresh_token).await?;

        return Ok(HttpResponse::Ok()
            .cookie(access_token_cookie(&pair.access_token, pair.access_expires_in, &state.cookies))
            .cookie(refresh_token_cookie(&pair.refresh_token, pair.refresh_expires_in, &state.cookies))
            .json(RefreshTokenResponse {
                access_token: pair.access_token,
                expires_in: pair.access_expires_in,
                refresh_token: Some(pair.refresh_token),
                refresh_expires_in: Some(pair.refresh_expires_in),
            }));
    }

    let access_token = state.token_service.refresh_access_token(&refresh_token).await?;

    Ok(HttpResponse::Ok()
        .cookie(access_token_cookie(&access_token, access_ttl, &state.cookies))
        .json(RefreshTokenResponse {
            access_token,
            expires_in: access_ttl,
            refresh_token: None,
            refresh_expires_in: None,
        }))
}
