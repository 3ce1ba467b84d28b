use std::collections::HashMap;

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::StoreError;

use super::repo::{User, UserCredentials, UserRepo};

#[derive(Default)]
struct Users {
    by_id: HashMap<Uuid, (User, String)>,
    by_email: HashMap<String, Uuid>,
}

#[derive(Default)]
pub struct MemoryUserRepo {
    users: RwLock<Users>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops a user, so tokens already issued for it stop resolving.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut users = self.users.write().await;
        match users.by_id.remove(&id) {
            Some((user, _)) => {
                users.by_email.remove(&user.email);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.by_email.contains_key(email) {
            return Err(StoreError::Duplicate);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: OffsetDateTime::now_utc(),
        };
        users.by_email.insert(user.email.clone(), user.id);
        users
            .by_id
            .insert(user.id, (user.clone(), password_hash.to_string()));
        Ok(user)
    }

    async fn find_credentials(&self, email: &str) -> Result<Option<UserCredentials>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .by_email
            .get(email)
            .and_then(|id| users.by_id.get(id))
            .map(|(user, hash)| UserCredentials {
                id: user.id,
                password_hash: hash.clone(),
            }))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.by_id.get(&id).map(|(user, _)| user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = MemoryUserRepo::new();
        repo.create("a@example.test", "hash").await.unwrap();
        let err = repo.create("a@example.test", "other").await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate));
    }

    #[tokio::test]
    async fn removed_user_is_gone_everywhere() {
        let repo = MemoryUserRepo::new();
        let user = repo.create("b@example.test", "hash").await.unwrap();
        assert!(repo.find_credentials("b@example.test").await.unwrap().is_some());

        assert!(repo.remove(user.id).await);
        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(repo.find_credentials("b@example.test").await.unwrap().is_none());
    }
}
