//! JWT authentication middleware for protecting API endpoints.
//!
//! Extracts the access token from the `Authorization: Bearer` header, or
//! from the `access_token` cookie when no bearer header is sent, hands it
//! to the [`AuthGate`] and injects the resulting [`CallerContext`] into the
//! request extensions. Handlers read it back through [`Authenticated`].

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    ops::Deref,
    rc::Rc,
    task::{Context, Poll},
};

use plog_core::errors::TokenError;
use plog_core::services::{AuthGate, CallerContext};

use crate::handlers::{handle_domain_error, ApiError};
use crate::routes::auth::cookies::ACCESS_TOKEN_COOKIE;

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    gate: AuthGate,
}

impl JwtAuth {
    pub fn new(gate: AuthGate) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            gate: self.gate.clone(),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    gate: AuthGate,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let credential = extract_credential(&req).unwrap_or_default();

        match self.gate.authenticate(&credential) {
            Ok(caller) => {
                tracing::debug!(user_id = %caller.user_id, "Authenticated request");
                req.extensions_mut().insert(caller);
                Box::pin(async move {
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                })
            }
            Err(error) => {
                let response = handle_domain_error(&error);
                let response = req.into_response(response).map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}

/// Bearer token from the Authorization header, falling back to the access cookie
fn extract_credential(req: &ServiceRequest) -> Option<String> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| {
            value
                .strip_prefix("Bearer ")
                .or_else(|| value.strip_prefix("bearer "))
        })
        .map(|token| token.trim().to_string());

    bearer.or_else(|| {
        req.cookie(ACCESS_TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_string())
    })
}

/// Extractor for the caller identity set by [`JwtAuth`]
///
/// Fails with 401 when the route is not behind the middleware or the
/// middleware did not authenticate the request.
#[derive(Debug, Clone)]
pub struct Authenticated(pub CallerContext);

impl Deref for Authenticated {
    type Target = CallerContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for Authenticated {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<CallerContext>()
            .cloned()
            .map(Authenticated)
            .ok_or_else(|| ApiError::from(TokenError::MissingToken));

        ready(result)
    }
}
