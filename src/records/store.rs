//! Record store contract.

use async_trait::async_trait;

use crate::error::Result;
use crate::records::{NewUser, User, UserChanges, UserId};

/// Authoritative persistent storage for user records.
///
/// Implementations assign ids and maintain timestamps. Email must be
/// unique across records; a clash is reported as
/// [`PersistenceError::DuplicateEmail`](crate::error::PersistenceError).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persists a new record and returns it with its id and timestamps.
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Looks a record up by id. Absence is `Ok(None)`.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>>;

    /// All records ordered by id.
    async fn list(&self) -> Result<Vec<User>>;

    /// Applies `changes` to an existing record. Fails with `NotFound` if absent.
    async fn update(&self, id: UserId, changes: UserChanges) -> Result<User>;

    /// Removes a record. Fails with `NotFound` if absent.
    async fn delete(&self, id: UserId) -> Result<()>;
}
