//! Integration tests for POST /api/v1/auth/refresh

mod common;

use actix_web::{cookie::Cookie, http::StatusCode, test};
use chrono::Duration;

use plog_api::create_app;
use plog_core::services::hash_token;
use common::{context, rotating_context, EMAIL};

#[actix_web::test]
async fn test_refresh_from_cookie() {
    let ctx = context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let access_cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "access_token")
        .expect("access cookie set");
    assert_eq!(access_cookie.path(), Some("/"));
    assert_eq!(access_cookie.http_only(), Some(true));
    assert!(resp.response().cookies().all(|cookie| cookie.name() != "refresh_token"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["expires_in"], 900);
    assert!(body.get("refresh_token").is_none());

    let claims = ctx
        .service
        .validate_token(body["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(claims.user_id().unwrap(), ctx.user_id);
    assert!(!claims.is_refresh);
}

#[actix_web::test]
async fn test_refresh_from_body() {
    let ctx = context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(serde_json::json!({ "refresh_token": pair.refresh_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_without_token() {
    let ctx = context();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post().uri("/api/v1/auth/refresh").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "MISSING_TOKEN");
}

#[actix_web::test]
async fn test_refresh_with_access_token() {
    let ctx = context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(serde_json::json!({ "refresh_token": pair.access_token }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INVALID_CLAIMS");
}

#[actix_web::test]
async fn test_refresh_with_revoked_token() {
    let ctx = context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    ctx.service.revoke_refresh_token(&pair.refresh_token).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_REVOKED");
}

#[actix_web::test]
async fn test_refresh_after_access_expiry() {
    let ctx = context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    ctx.clock.advance(Duration::hours(1));
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_refresh_when_store_is_down() {
    let ctx = context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    ctx.tokens.set_unavailable(true);
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "DATABASE_ERROR");
}

#[actix_web::test]
async fn test_refresh_with_rotation() {
    let ctx = rotating_context();
    let pair = ctx.service.generate_tokens(ctx.user_id, EMAIL).await.unwrap();
    let app = test::init_service(create_app(ctx.state.clone())).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .cookie(Cookie::new("refresh_token", pair.refresh_token.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let refresh_cookie = resp
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "refresh_token")
        .expect("refresh cookie set");
    assert_eq!(refresh_cookie.path(), Some("/api/v1/auth"));

    let body: serde_json::Value = test::read_body_json(resp).await;
    let rotated = body["refresh_token"].as_str().unwrap();
    assert_ne!(rotated, pair.refresh_token);
    assert_eq!(body["refresh_expires_in"], 7 * 24 * 60 * 60);

    let records = ctx.tokens.all().await;
    let old = records
        .iter()
        .find(|record| record.token_hash == hash_token(&pair.refresh_token))
        .unwrap();
    assert!(old.revoked);
    assert_eq!(records.len(), 2);
}
