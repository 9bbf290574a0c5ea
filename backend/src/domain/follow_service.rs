//! Follow and unfollow operations with the configured self-follow policy.

use std::sync::Arc;

use tracing::debug;

use crate::domain::ports::{FollowerRepository, SchemaPersistenceError};
use crate::domain::{FollowEdge, FollowerValidationError, SelfFollowPolicy, UserId};

/// Failures surfaced by [`FollowService`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FollowError {
    /// The edge was rejected before reaching the store.
    #[error(transparent)]
    Invalid(#[from] FollowerValidationError),
    /// The store rejected or failed the operation.
    #[error(transparent)]
    Persistence(#[from] SchemaPersistenceError),
}

/// Follower graph operations for the request layer.
#[derive(Clone)]
pub struct FollowService<F> {
    followers: Arc<F>,
    policy: SelfFollowPolicy,
}

impl<F> FollowService<F> {
    /// Create a service over `followers` applying `policy`.
    #[must_use]
    pub fn new(followers: Arc<F>, policy: SelfFollowPolicy) -> Self {
        Self { followers, policy }
    }

    /// The policy in force.
    #[must_use]
    pub fn policy(&self) -> SelfFollowPolicy {
        self.policy
    }
}

impl<F> FollowService<F>
where
    F: FollowerRepository,
{
    /// Record that `follower` follows `followed`.
    pub async fn follow(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<FollowEdge, FollowError> {
        let edge = FollowEdge::new(follower, followed, self.policy)?;
        self.followers.follow(&edge).await?;
        debug!(%follower, %followed, "follow edge recorded");
        Ok(edge)
    }

    /// Remove the edge if present. Returns `false` when nothing was removed.
    ///
    /// Removal ignores the policy so self edges created under a more
    /// permissive configuration can still be cleaned up.
    pub async fn unfollow(
        &self,
        follower: UserId,
        followed: UserId,
    ) -> Result<bool, FollowError> {
        let edge = FollowEdge::new(follower, followed, SelfFollowPolicy::Allow)?;
        Ok(self.followers.unfollow(&edge).await?)
    }

    /// Users following `user`.
    pub async fn followers_of(&self, user: UserId) -> Result<Vec<UserId>, FollowError> {
        Ok(self.followers.followers_of(user).await?)
    }

    /// Users that `user` follows.
    pub async fn following_of(&self, user: UserId) -> Result<Vec<UserId>, FollowError> {
        Ok(self.followers.following_of(user).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockFollowerRepository, UniqueConstraint};

    fn service(
        repo: MockFollowerRepository,
        policy: SelfFollowPolicy,
    ) -> FollowService<MockFollowerRepository> {
        FollowService::new(Arc::new(repo), policy)
    }

    #[tokio::test]
    async fn follow_stores_the_edge() {
        let mut repo = MockFollowerRepository::new();
        repo.expect_follow()
            .withf(|edge| edge.follower() == UserId::new(1) && edge.followed() == UserId::new(2))
            .times(1)
            .return_once(|_| Ok(()));

        let edge = service(repo, SelfFollowPolicy::Allow)
            .follow(UserId::new(1), UserId::new(2))
            .await
            .expect("follow succeeds");
        assert_eq!(edge.followed(), UserId::new(2));
    }

    #[tokio::test]
    async fn self_follow_is_rejected_without_touching_the_store() {
        let mut repo = MockFollowerRepository::new();
        repo.expect_follow().never();

        let error = service(repo, SelfFollowPolicy::Reject)
            .follow(UserId::new(5), UserId::new(5))
            .await
            .expect_err("self follow rejected");
        assert_eq!(
            error,
            FollowError::Invalid(FollowerValidationError::SelfFollow {
                user: UserId::new(5)
            })
        );
    }

    #[tokio::test]
    async fn self_follow_is_stored_when_allowed() {
        let mut repo = MockFollowerRepository::new();
        repo.expect_follow().times(1).return_once(|_| Ok(()));

        let edge = service(repo, SelfFollowPolicy::Allow)
            .follow(UserId::new(5), UserId::new(5))
            .await
            .expect("self follow allowed");
        assert!(edge.is_self_loop());
    }

    #[tokio::test]
    async fn duplicate_edges_surface_the_store_error_unchanged() {
        let mut repo = MockFollowerRepository::new();
        repo.expect_follow().times(1).return_once(|_| {
            Err(SchemaPersistenceError::unique_violation(
                UniqueConstraint::FollowEdge,
            ))
        });

        let error = service(repo, SelfFollowPolicy::Allow)
            .follow(UserId::new(1), UserId::new(2))
            .await
            .expect_err("duplicate rejected");
        assert_eq!(
            error,
            FollowError::Persistence(SchemaPersistenceError::UniqueViolation {
                constraint: UniqueConstraint::FollowEdge
            })
        );
    }

    #[tokio::test]
    async fn unfollow_removes_self_edges_under_reject_policy() {
        let mut repo = MockFollowerRepository::new();
        repo.expect_unfollow().times(1).return_once(|_| Ok(true));

        let removed = service(repo, SelfFollowPolicy::Reject)
            .unfollow(UserId::new(3), UserId::new(3))
            .await
            .expect("unfollow succeeds");
        assert!(removed);
    }

    #[tokio::test]
    async fn navigation_delegates_to_the_store() {
        let mut repo = MockFollowerRepository::new();
        repo.expect_followers_of()
            .times(1)
            .return_once(|_| Ok(vec![UserId::new(2), UserId::new(3)]));
        repo.expect_following_of()
            .times(1)
            .return_once(|_| Ok(Vec::new()));

        let service = service(repo, SelfFollowPolicy::Allow);
        let followers = service.followers_of(UserId::new(1)).await.expect("followers");
        let following = service.following_of(UserId::new(1)).await.expect("following");

        assert_eq!(followers, vec![UserId::new(2), UserId::new(3)]);
        assert!(following.is_empty());
    }
}
