//! Domain records and ports for the social schema.
//!
//! Purpose: define the five persisted entities (users, follower edges, posts,
//! media, comments) as strongly typed records, the validation newtypes that
//! mirror the column constraints, and the repository ports adapters
//! implement. Nothing here depends on a database driver.
//!
//! Public surface:
//! - `User`, `NewUser`, `UserChanges`, `SerializedUser` and field newtypes.
//! - `FollowEdge`, `SelfFollowPolicy`.
//! - `Post`, `Media`, `MediaType`, `Comment` and their insert drafts.
//! - `FollowService` for policy-aware follower operations.

pub mod comment;
pub mod follow_service;
pub mod follower;
pub mod ids;
pub mod media;
pub mod ports;
pub mod post;
pub mod user;

pub use self::comment::{Comment, NewComment};
pub use self::follow_service::{FollowError, FollowService};
pub use self::follower::{FollowEdge, FollowerValidationError, SelfFollowPolicy};
pub use self::ids::{CommentId, MediaId, PostId, UserId};
pub use self::media::{MEDIA_URL_MAX, Media, MediaType, MediaUrl, MediaValidationError, NewMedia};
pub use self::post::{NewPost, Post};
pub use self::user::{
    EMAIL_MAX, EmailAddress, NewUser, PERSON_NAME_MAX, PasswordHash, PersonName, SerializedUser,
    USERNAME_MAX, User, UserChanges, UserValidationError, Username,
};
