//! PostgreSQL-backed `CommentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CommentRepository, SchemaPersistenceError};
use crate::domain::{Comment, CommentId, NewComment, PostId, UserId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{CommentRow, NewCommentRow};
use super::pool::DbPool;
use super::schema::comment;

/// Diesel-backed implementation of the `CommentRepository` port.
///
/// A comment disappears when either its post or its author is deleted.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn create(&self, new_comment: &NewComment) -> Result<Comment, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CommentRow = diesel::insert_into(comment::table)
            .values(NewCommentRow {
                comment_text: &new_comment.comment_text,
                author_id: new_comment.author_id.get(),
                post_id: new_comment.post_id.get(),
            })
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Comment::from(row))
    }

    async fn find_by_id(
        &self,
        id: CommentId,
    ) -> Result<Option<Comment>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CommentRow> = comment::table
            .find(id.get())
            .select(CommentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Comment::from))
    }

    async fn list_by_post(&self, post: PostId) -> Result<Vec<Comment>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CommentRow> = comment::table
            .filter(comment::post_id.eq(post.get()))
            .select(CommentRow::as_select())
            .order_by(comment::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn list_by_author(
        &self,
        author: UserId,
    ) -> Result<Vec<Comment>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CommentRow> = comment::table
            .filter(comment::author_id.eq(author.get()))
            .select(CommentRow::as_select())
            .order_by(comment::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn update_text(
        &self,
        id: CommentId,
        comment_text: &str,
    ) -> Result<Option<Comment>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<CommentRow> = diesel::update(comment::table.find(id.get()))
            .set(comment::comment_text.eq(comment_text))
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Comment::from))
    }

    async fn delete(&self, id: CommentId) -> Result<bool, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(comment::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
