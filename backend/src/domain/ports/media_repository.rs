//! Port abstraction for media attachment persistence.
use async_trait::async_trait;

use crate::domain::{Media, MediaId, NewMedia, PostId};

use super::SchemaPersistenceError;

/// Storage for `media` rows. Media never outlives its post.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    /// Attach media to a post. Fails with a foreign-key violation when the
    /// post is missing.
    async fn attach(&self, media: &NewMedia) -> Result<Media, SchemaPersistenceError>;

    /// Fetch a media item by identifier.
    async fn find_by_id(&self, id: MediaId) -> Result<Option<Media>, SchemaPersistenceError>;

    /// Media attached to `post`, ordered by id.
    async fn list_by_post(&self, post: PostId) -> Result<Vec<Media>, SchemaPersistenceError>;

    /// Detach a single media item. Returns `false` when absent.
    async fn delete(&self, id: MediaId) -> Result<bool, SchemaPersistenceError>;
}
