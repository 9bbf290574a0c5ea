//! Port abstraction for user persistence adapters.
use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, User, UserChanges, UserId, Username};

use super::SchemaPersistenceError;

/// Storage for `user` rows.
///
/// Deleting a user cascades to their posts (with those posts' media and
/// comments), every comment they authored, and every follower edge naming
/// them on either side.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned identifier.
    ///
    /// Fails with [`SchemaPersistenceError::UniqueViolation`] when the
    /// username or email is already taken.
    async fn create(&self, user: &NewUser) -> Result<User, SchemaPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, SchemaPersistenceError>;

    /// Fetch a user by their unique username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, SchemaPersistenceError>;

    /// Fetch a user by their unique email address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, SchemaPersistenceError>;

    /// Apply a partial update. Returns `None` when the user does not exist.
    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, SchemaPersistenceError>;

    /// Delete a user and everything they own. Returns `false` when absent.
    async fn delete(&self, id: UserId) -> Result<bool, SchemaPersistenceError>;
}
