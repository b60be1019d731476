//! PostgreSQL repository implementations

mod token_repository_impl;
mod user_repository_impl;

pub use token_repository_impl::PgTokenRepository;
pub use user_repository_impl::PgUserRepository;

use plog_core::errors::DomainError;

/// Maps a SQLx failure into the domain's persistence error
pub(crate) fn persistence_error(context: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(error = %error, "{}", context);
    DomainError::Persistence {
        message: format!("{}: {}", context, error),
    }
}
