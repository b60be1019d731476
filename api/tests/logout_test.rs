//! Integration tests for POST /api/v1/auth/logout

mod common;

use actix_web::{cookie::Cookie, http::StatusCode, test};

use plog_api::create_app;
use common::{context, rotating_context, EMAIL};

#[actix_web::test]
async fn test_logout_revokes_and_clears_cookies() {
    let ctx = context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let cleared: Vec<String> = resp
        .response()
        .cookies()
        .filter(|cookie| cookie.value().is_empty())
        .map(|cookie| cookie.name().to_string())
        .collect();
    assert!(cleared.contains(&"access_token".to_string()));
    assert!(cleared.contains(&"refresh_token".to_string()));

    assert!(ctx.tokens.all().await[0].revoked);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_logout_with_body_token() {
    let ctx = context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .set_json(serde_json::json!({ "refresh_token": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(ctx.tokens.all().await[0].revoked);
}

#[actix_web::test]
async fn test_logout_without_token_still_clears_cookies() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/logout").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(resp.response().cookies().count(), 2);
}

#[actix_web::test]
async fn test_logout_when_store_is_down() {
    let ctx = context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    ctx.tokens.set_unavailable(true);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .cookie(Cookie::new("refresh_token", pair.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

/// Sends `cookie` to `uri` only when its path covers the URI, like a browser does
fn browser_cookie<'a>(cookie: &Cookie<'a>, uri: &str) -> Option<Cookie<'a>> {
    let path = cookie.path().unwrap_or("/");
    uri.starts_with(path)
        .then(|| Cookie::new(cookie.name().to_string(), cookie.value().to_string()))
}

#[actix_web::test]
async fn test_cookie_from_rotation_reaches_logout() {
    let ctx = rotating_context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let issued = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "refresh_token")
        .map(|cookie| cookie.into_owned())
        .expect("refresh cookie set");

    let logout_uri = "/api/v1/auth/logout";
    let sent = browser_cookie(&issued, logout_uri).expect("refresh cookie not sent to logout");
    let req = test::TestRequest::post().uri(logout_uri).cookie(sent).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let live = ctx
        .tokens
        .all()
        .await
        .into_iter()
        .filter(|record| !record.revoked)
        .count();
    assert_eq!(live, 0);
}
