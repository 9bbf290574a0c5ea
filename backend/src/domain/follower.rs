//! Directed follower edges between users.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::UserId;

/// Whether a user may follow themselves.
///
/// The stored schema accepts self edges. The policy lets deployments forbid
/// them before they reach the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfFollowPolicy {
    #[default]
    Allow,
    Reject,
}

impl SelfFollowPolicy {
    /// Map a boolean configuration flag onto a policy.
    #[must_use]
    pub const fn from_allow_flag(allow: bool) -> Self {
        if allow { Self::Allow } else { Self::Reject }
    }
}

/// Validation errors returned by [`FollowEdge::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowerValidationError {
    SelfFollow { user: UserId },
}

impl fmt::Display for FollowerValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfFollow { user } => write!(f, "user {user} may not follow themselves"),
        }
    }
}

impl std::error::Error for FollowerValidationError {}

/// Directed edge: `follower` follows `followed`.
///
/// ## Invariants
/// - At most one edge exists per ordered `(follower, followed)` pair; the pair is the
///   primary key of the `follower` table.
/// - The edge disappears when either endpoint user is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FollowEdge {
    from: UserId,
    to: UserId,
}

impl FollowEdge {
    /// Build an edge, applying the self-follow policy.
    pub fn new(
        from: UserId,
        to: UserId,
        policy: SelfFollowPolicy,
    ) -> Result<Self, FollowerValidationError> {
        if from == to && policy == SelfFollowPolicy::Reject {
            return Err(FollowerValidationError::SelfFollow { user: from });
        }
        Ok(Self { from, to })
    }

    /// The follower (`user_from_id`).
    #[must_use]
    pub const fn follower(&self) -> UserId {
        self.from
    }

    /// The followed user (`user_to_id`).
    #[must_use]
    pub const fn followed(&self) -> UserId {
        self.to
    }

    /// True when both endpoints are the same user.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// True when `user` is either endpoint.
    #[must_use]
    pub fn involves(&self, user: UserId) -> bool {
        self.from == user || self.to == user
    }
}
