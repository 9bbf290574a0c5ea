//! Posts authored by users.

use serde::{Deserialize, Serialize};

use super::{PostId, UserId};

/// A post owned by exactly one user.
///
/// Deleting the post deletes its media and comments; the author is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
}

/// Values required to insert a post row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPost {
    pub user_id: UserId,
}

impl NewPost {
    /// Draft a post for `user_id`.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

impl Post {
    /// Combine an assigned identifier with the inserted values.
    #[must_use]
    pub const fn from_new(id: PostId, new_post: NewPost) -> Self {
        Self {
            id,
            user_id: new_post.user_id,
        }
    }
}
