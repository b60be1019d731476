pub mod auth;

pub use auth::{Authenticated, JwtAuth, JwtAuthMiddleware};
