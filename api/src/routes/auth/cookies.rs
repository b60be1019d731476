//! Auth cookies
//!
//! Both cookies are `HttpOnly; SameSite=Lax`. The access token is sent
//! everywhere (`Path=/`); the refresh token only under `/api/v1/auth`, which
//! covers refresh and logout.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use plog_shared::config::CookieConfig;

pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

pub fn access_token_cookie(token: &str, max_age_secs: i64, config: &CookieConfig) -> Cookie<'static> {
    build(ACCESS_TOKEN_COOKIE, token, "/", config)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

pub fn refresh_token_cookie(token: &str, max_age_secs: i64, config: &CookieConfig) -> Cookie<'static> {
    build(REFRESH_TOKEN_COOKIE, token, &config.refresh_path, config)
        .max_age(Duration::seconds(max_age_secs))
        .finish()
}

/// Removal cookies for both tokens, scoped to the paths they were set on
pub fn removal_cookies(config: &CookieConfig) -> [Cookie<'static>; 2] {
    let mut access = build(ACCESS_TOKEN_COOKIE, "", "/", config).finish();
    access.make_removal();
    let mut refresh = build(REFRESH_TOKEN_COOKIE, "", &config.refresh_path, config).finish();
    refresh.make_removal();
    [access, refresh]
}

fn build(
    name: &'static str,
    value: &str,
    path: &str,
    config: &CookieConfig,
) -> actix_web::cookie::CookieBuilder<'static> {
    Cookie::build(name, value.to_string())
        .path(path.to_string())
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.secure)
}
