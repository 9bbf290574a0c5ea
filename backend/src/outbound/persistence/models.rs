//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain records
//! re-validate every column so rows written out-of-band surface as
//! `InvalidRow` instead of slipping past the type invariants.

use diesel::prelude::*;

use crate::domain::ports::SchemaPersistenceError;
use crate::domain::{
    Comment, CommentId, EmailAddress, Media, MediaId, MediaType, MediaUrl, PasswordHash,
    PersonName, Post, PostId, User, UserId, UserValidationError, Username,
};

use super::schema::{comment, follower, media, post, user};

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the user table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    pub is_active: bool,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = user)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub firstname: &'a str,
    pub lastname: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub is_active: bool,
}

/// Changeset struct for partial user updates. `None` columns are skipped.
#[derive(Debug, Clone, Default, AsChangeset)]
#[diesel(table_name = user)]
pub(crate) struct UserUpdate<'a> {
    pub username: Option<&'a str>,
    pub firstname: Option<&'a str>,
    pub lastname: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub is_active: Option<bool>,
}

fn invalid_row(table: &str, id: i32, detail: impl std::fmt::Display) -> SchemaPersistenceError {
    SchemaPersistenceError::invalid_row(format!("{table} {id}: {detail}"))
}

impl TryFrom<UserRow> for User {
    type Error = SchemaPersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |err: UserValidationError| invalid_row("user", id, err);
        Ok(Self {
            id: UserId::new(id),
            username: Username::new(row.username).map_err(invalid)?,
            firstname: PersonName::new(row.firstname).map_err(invalid)?,
            lastname: PersonName::new(row.lastname).map_err(invalid)?,
            email: EmailAddress::new(row.email).map_err(invalid)?,
            password: PasswordHash::new(row.password).map_err(invalid)?,
            is_active: row.is_active,
        })
    }
}

// ---------------------------------------------------------------------------
// Follower models
// ---------------------------------------------------------------------------

/// Insertable struct for follower edges.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = follower)]
pub(crate) struct NewFollowerRow {
    pub user_from_id: i32,
    pub user_to_id: i32,
}

// ---------------------------------------------------------------------------
// Post models
// ---------------------------------------------------------------------------

/// Row struct for reading from the post table.
#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = post)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i32,
    pub user_id: i32,
}

/// Insertable struct for creating new post records.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = post)]
pub(crate) struct NewPostRow {
    pub user_id: i32,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: PostId::new(row.id),
            user_id: UserId::new(row.user_id),
        }
    }
}

// ---------------------------------------------------------------------------
// Media models
// ---------------------------------------------------------------------------

/// Row struct for reading from the media table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = media)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MediaRow {
    pub id: i32,
    pub kind: String,
    pub url: String,
    pub post_id: i32,
}

/// Insertable struct for creating new media records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = media)]
pub(crate) struct NewMediaRow<'a> {
    pub kind: &'a str,
    pub url: &'a str,
    pub post_id: i32,
}

impl TryFrom<MediaRow> for Media {
    type Error = SchemaPersistenceError;

    fn try_from(row: MediaRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let kind = row.kind.parse::<MediaType>().map_err(|err| {
            tracing::warn!(media_id = id, value = %row.kind, "unrecognised media type in storage");
            invalid_row("media", id, err)
        })?;
        Ok(Self {
            id: MediaId::new(id),
            kind,
            url: MediaUrl::new(row.url).map_err(|err| invalid_row("media", id, err))?,
            post_id: PostId::new(row.post_id),
        })
    }
}

// ---------------------------------------------------------------------------
// Comment models
// ---------------------------------------------------------------------------

/// Row struct for reading from the comment table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comment)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub id: i32,
    pub comment_text: String,
    pub author_id: i32,
    pub post_id: i32,
}

/// Insertable struct for creating new comment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comment)]
pub(crate) struct NewCommentRow<'a> {
    pub comment_text: &'a str,
    pub author_id: i32,
    pub post_id: i32,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: CommentId::new(row.id),
            comment_text: row.comment_text,
            author_id: UserId::new(row.author_id),
            post_id: PostId::new(row.post_id),
        }
    }
}
