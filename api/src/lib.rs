//! # p-log API
//!
//! `actix-web` boundary for the token authentication core: bearer
//! middleware, the refresh / logout / me endpoints, and the mapping from
//! domain errors to HTTP responses.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
