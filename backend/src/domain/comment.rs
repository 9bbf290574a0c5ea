//! Comments left by users on posts.

use serde::{Deserialize, Serialize};

use super::{CommentId, PostId, UserId};

/// A comment written by `author_id` on `post_id`.
///
/// The row is removed when either the post or the author is deleted, even if
/// the other survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub comment_text: String,
    pub author_id: UserId,
    pub post_id: PostId,
}

/// Values required to insert a comment row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub comment_text: String,
    pub author_id: UserId,
    pub post_id: PostId,
}

impl NewComment {
    /// Draft a comment by `author_id` on `post_id`.
    #[must_use]
    pub fn new(author_id: UserId, post_id: PostId, comment_text: impl Into<String>) -> Self {
        Self {
            comment_text: comment_text.into(),
            author_id,
            post_id,
        }
    }
}

impl Comment {
    /// Combine an assigned identifier with the inserted values.
    #[must_use]
    pub fn from_new(id: CommentId, new_comment: NewComment) -> Self {
        Self {
            id,
            comment_text: new_comment.comment_text,
            author_id: new_comment.author_id,
            post_id: new_comment.post_id,
        }
    }
}
