//! Port abstraction for comment persistence.
use async_trait::async_trait;

use crate::domain::{Comment, CommentId, NewComment, PostId, UserId};

use super::SchemaPersistenceError;

/// Storage for `comment` rows.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Insert a comment. Fails with a foreign-key violation when the author
    /// or the post is missing.
    async fn create(&self, comment: &NewComment) -> Result<Comment, SchemaPersistenceError>;

    /// Fetch a comment by identifier.
    async fn find_by_id(&self, id: CommentId)
    -> Result<Option<Comment>, SchemaPersistenceError>;

    /// Comments on `post`, ordered by id.
    async fn list_by_post(&self, post: PostId) -> Result<Vec<Comment>, SchemaPersistenceError>;

    /// Comments written by `author` on any post, ordered by id.
    async fn list_by_author(&self, author: UserId)
    -> Result<Vec<Comment>, SchemaPersistenceError>;

    /// Replace the comment text. Returns `None` when absent.
    async fn update_text(
        &self,
        id: CommentId,
        comment_text: &str,
    ) -> Result<Option<Comment>, SchemaPersistenceError>;

    /// Delete a comment. Returns `false` when absent.
    async fn delete(&self, id: CommentId) -> Result<bool, SchemaPersistenceError>;
}
