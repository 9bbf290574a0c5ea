//! Error type shared by every social schema repository port.
//!
//! Uniqueness and referential-integrity failures are intrinsic to the model
//! and get their own variants so callers can tell them apart from generic
//! query failures. Adapters never retry; errors surface to the caller's
//! transaction unchanged.

use std::fmt;

use super::define_port_error;

/// Uniqueness constraint named by a [`SchemaPersistenceError::UniqueViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniqueConstraint {
    /// `user.username` is already taken.
    Username,
    /// `user.email` is already taken.
    Email,
    /// The `(user_from_id, user_to_id)` pair already exists.
    FollowEdge,
}

impl fmt::Display for UniqueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Username => "user.username",
            Self::Email => "user.email",
            Self::FollowEdge => "follower(user_from_id, user_to_id)",
        };
        f.write_str(name)
    }
}

/// Parent table referenced by a [`SchemaPersistenceError::ForeignKeyViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentEntity {
    User,
    Post,
}

impl fmt::Display for ParentEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Post => f.write_str("post"),
        }
    }
}

define_port_error! {
    /// Persistence errors raised by social schema repository adapters.
    pub enum SchemaPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "schema repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "schema repository query failed: {message}",
        /// Insert or update collided with a unique key.
        UniqueViolation { constraint: UniqueConstraint } =>
            "duplicate value violates unique constraint on {constraint}",
        /// Row referenced a parent that does not exist.
        ForeignKeyViolation { parent: ParentEntity } =>
            "referenced {parent} does not exist",
        /// A stored row no longer satisfies a domain invariant.
        InvalidRow { message: String } => "stored row is invalid: {message}",
    }
}

impl SchemaPersistenceError {
    /// True for the uniqueness and referential-integrity kinds.
    #[must_use]
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self,
            Self::UniqueViolation { .. } | Self::ForeignKeyViolation { .. }
        )
    }
}
