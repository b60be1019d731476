use actix_web::HttpResponse;

use crate::dto::MeResponse;
use crate::middleware::Authenticated;

/// Handler for GET /api/v1/auth/me
///
/// Requires the JWT middleware; returns the caller's id and email.
pub async fn me(caller: Authenticated) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        user_id: caller.caller_id(),
        email: caller.email.clone(),
    })
}
