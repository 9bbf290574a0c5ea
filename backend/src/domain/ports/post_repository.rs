//! Port abstraction for post persistence.
use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostId, UserId};

use super::SchemaPersistenceError;

/// Storage for `post` rows.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post. Fails with a foreign-key violation when the author is
    /// missing.
    async fn create(&self, post: &NewPost) -> Result<Post, SchemaPersistenceError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, SchemaPersistenceError>;

    /// Posts authored by `user`, ordered by id.
    async fn list_by_user(&self, user: UserId) -> Result<Vec<Post>, SchemaPersistenceError>;

    /// Delete a post with its media and comments. The author is untouched.
    /// Returns `false` when absent.
    async fn delete(&self, id: PostId) -> Result<bool, SchemaPersistenceError>;
}
