//! User Cache Repository
//!
//! Keeps a cached copy of each user's display name next to the record
//! store. Names are written through on create and read through on lookup.
//! Nothing ever evicts a name early: updates and deletes go straight to the
//! record store, so a cached name can outlive its record until the TTL
//! runs out.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::NameCache;
use crate::error::{AppError, Result};
use crate::records::{NewUser, RecordStore, User, UserId};

/// Default lifetime of a cached display name.
pub const NAME_TTL: Duration = Duration::from_secs(600);

/// Cache key holding the display name of user `id`.
pub fn name_key(id: UserId) -> String {
    format!("user:{}:name", id)
}

// == User Cache Repository ==
#[derive(Clone)]
pub struct UserCacheRepository {
    records: Arc<dyn RecordStore>,
    cache: Arc<dyn NameCache>,
    ttl: Duration,
}

impl UserCacheRepository {
    pub fn new(records: Arc<dyn RecordStore>, cache: Arc<dyn NameCache>) -> Self {
        Self::with_ttl(records, cache, NAME_TTL)
    }

    pub fn with_ttl(
        records: Arc<dyn RecordStore>,
        cache: Arc<dyn NameCache>,
        ttl: Duration,
    ) -> Self {
        Self {
            records,
            cache,
            ttl,
        }
    }

    // == Create ==
    /// Persists a new user and caches its name.
    ///
    /// Store errors propagate unchanged and leave the cache untouched.
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        let user = self.records.create(new_user).await?;
        self.cache_name(user.id, &user.name).await;
        Ok(user)
    }

    // == Get Username ==
    /// Returns the display name for `id`.
    ///
    /// A cache hit is returned as-is without consulting the record store,
    /// even if the record has since been deleted. On a miss the store is
    /// read and the cache refreshed.
    pub async fn get_username(&self, id: UserId) -> Result<String> {
        let key = name_key(id);

        if let Some(name) = self.cache.get(&key).await? {
            if !name.is_empty() {
                debug!(id, "username cache hit");
                return Ok(name);
            }
        }

        debug!(id, "username cache miss");
        let user = self
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {}", id)))?;

        self.cache_name(user.id, &user.name).await;
        Ok(user.name)
    }

    /// Best-effort write; a failing cache never fails the caller.
    async fn cache_name(&self, id: UserId, name: &str) {
        if let Err(err) = self.cache.put(&name_key(id), name, self.ttl).await {
            warn!(id, error = %err, "failed to cache username");
        }
    }
}
