//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
#[derive(Clone, Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashSet<Uuid>>>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository that already knows `users`
    pub fn with_users(users: impl IntoIterator<Item = Uuid>) -> Self {
        Self {
            users: Arc::new(RwLock::new(users.into_iter().collect())),
        }
    }

    /// Register a user
    pub async fn add_user(&self, user_id: Uuid) {
        self.users.write().await.insert(user_id);
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn exists(&self, user_id: Uuid) -> Result<bool, DomainError> {
        Ok(self.users.read().await.contains(&user_id))
    }
}
