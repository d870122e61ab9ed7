//! In-memory record store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{AppError, PersistenceError, Result};
use crate::records::{NewUser, RecordStore, User, UserChanges, UserId};

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<UserId, User>,
    /// Last id handed out; ids are never reused
    last_id: UserId,
}

impl Inner {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.email == email && Some(u.id) != except)
    }
}

/// [`RecordStore`] kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    inner: RwLock<Inner>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut inner = self.inner.write().await;

        if inner.email_taken(&new_user.email, None) {
            return Err(PersistenceError::DuplicateEmail(new_user.email).into());
        }

        inner.last_id += 1;
        let now = Utc::now();
        let user = User {
            id: inner.last_id,
            name: new_user.name,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(user.id, user.clone());

        debug!(id = user.id, "record created");
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.inner.read().await.users.values().cloned().collect())
    }

    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User> {
        let mut inner = self.inner.write().await;

        if !inner.users.contains_key(&id) {
            return Err(AppError::NotFound(format!("User {}", id)));
        }
        if let Some(email) = &changes.email {
            if inner.email_taken(email, Some(id)) {
                return Err(PersistenceError::DuplicateEmail(email.clone()).into());
            }
        }

        let user = inner
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("User {}", id)))?;
        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(password_hash) = changes.password_hash {
            user.password_hash = password_hash;
        }
        user.updated_at = Utc::now();

        debug!(id, "record updated");
        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.users.remove(&id) {
            Some(_) => {
                debug!(id, "record deleted");
                Ok(())
            }
            None => Err(AppError::NotFound(format!("User {}", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> NewUser {
        NewUser::new("alice", "alice@example.com", "hash")
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let store = MemoryRecordStore::new();

        let first = store.create(alice()).await.unwrap();
        let second = store
            .create(NewUser::new("bob", "bob@example.com", "hash"))
            .await
            .unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[tokio::test]
    async fn test_ids_are_never_reused() {
        let store = MemoryRecordStore::new();

        let first = store.create(alice()).await.unwrap();
        store.delete(first.id).await.unwrap();
        let second = store.create(alice()).await.unwrap();

        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryRecordStore::new();
        store.create(alice()).await.unwrap();

        let result = store.create(alice()).await;
        assert!(matches!(
            result,
            Err(AppError::Persistence(PersistenceError::DuplicateEmail(_)))
        ));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = MemoryRecordStore::new();
        let user = store.create(alice()).await.unwrap();

        assert_eq!(store.find_by_id(user.id).await.unwrap(), Some(user));
        assert_eq!(store.find_by_id(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_applies_changes() {
        let store = MemoryRecordStore::new();
        let user = store.create(alice()).await.unwrap();

        let changes = UserChanges {
            name: Some("alicia".to_string()),
            ..Default::default()
        };
        let updated = store.update(user.id, changes).await.unwrap();

        assert_eq!(updated.name, "alicia");
        assert_eq!(updated.email, "alice@example.com");
        assert!(updated.updated_at >= user.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing_and_duplicate() {
        let store = MemoryRecordStore::new();
        store.create(alice()).await.unwrap();
        let bob = store
            .create(NewUser::new("bob", "bob@example.com", "hash"))
            .await
            .unwrap();

        let missing = store.update(99, UserChanges::default()).await;
        assert!(matches!(missing, Err(AppError::NotFound(_))));

        let clash = UserChanges {
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        let result = store.update(bob.id, clash).await;
        assert!(matches!(
            result,
            Err(AppError::Persistence(PersistenceError::DuplicateEmail(_)))
        ));

        // Keeping one's own email is not a clash
        let same = UserChanges {
            email: Some("bob@example.com".to_string()),
            ..Default::default()
        };
        assert!(store.update(bob.id, same).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryRecordStore::new();
        let user = store.create(alice()).await.unwrap();

        store.delete(user.id).await.unwrap();
        assert_eq!(store.find_by_id(user.id).await.unwrap(), None);
        assert!(matches!(
            store.delete(user.id).await,
            Err(AppError::NotFound(_))
        ));
    }
}
