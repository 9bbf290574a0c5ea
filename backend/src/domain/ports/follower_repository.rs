//! Port abstraction for follower edge persistence.
use async_trait::async_trait;

use crate::domain::{FollowEdge, UserId};

use super::SchemaPersistenceError;

/// Storage for directed `follower` edges.
///
/// The two navigation queries replace the `followers`/`following`
/// back-references: `followers_of(u)` reads edges where `u` is
/// `user_to_id`, `following_of(u)` reads edges where `u` is `user_from_id`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowerRepository: Send + Sync {
    /// Insert an edge.
    ///
    /// Fails with a [`SchemaPersistenceError::UniqueViolation`] on
    /// [`super::UniqueConstraint::FollowEdge`] when the pair already exists and
    /// with a [`SchemaPersistenceError::ForeignKeyViolation`] when either user
    /// is missing.
    async fn follow(&self, edge: &FollowEdge) -> Result<(), SchemaPersistenceError>;

    /// Remove an edge. Returns `false` when it did not exist.
    async fn unfollow(&self, edge: &FollowEdge) -> Result<bool, SchemaPersistenceError>;

    /// Whether the edge exists.
    async fn exists(&self, edge: &FollowEdge) -> Result<bool, SchemaPersistenceError>;

    /// Users following `user`, ordered by id.
    async fn followers_of(&self, user: UserId) -> Result<Vec<UserId>, SchemaPersistenceError>;

    /// Users that `user` follows, ordered by id.
    async fn following_of(&self, user: UserId) -> Result<Vec<UserId>, SchemaPersistenceError>;
}
