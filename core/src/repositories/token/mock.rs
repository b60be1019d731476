//! In-memory implementation of TokenRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository for testing
///
/// Keyed by token hash, which mirrors the unique index of the real table.
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
    unavailable: Arc<AtomicBool>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// True if nothing has been stored
    pub async fn is_empty(&self) -> bool {
        self.tokens.read().await.is_empty()
    }

    /// Snapshot of every stored record
    pub async fn all(&self) -> Vec<RefreshToken> {
        self.tokens.read().await.values().cloned().collect()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::Persistence {
                message: "connection refused".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;

        if tokens.contains_key(&token.token_hash) {
            return Err(DomainError::Persistence {
                message: "duplicate key value violates unique constraint on token_hash".to_string(),
            });
        }

        tokens.insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        self.check_available()?;
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token_hash).cloned())
    }

    async fn count_valid_tokens(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, DomainError> {
        self.check_available()?;
        let tokens = self.tokens.read().await;
        Ok(tokens
            .get(token_hash)
            .filter(|token| token.is_valid_at(now))
            .map_or(0, |_| 1))
    }

    async fn revoke_token(&self, token_hash: &str) -> Result<u64, DomainError> {
        self.check_available()?;
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(token_hash) {
            Some(token) if !token.revoked => {
                token.revoke();
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
