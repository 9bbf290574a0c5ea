//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PostRepository, SchemaPersistenceError};
use crate::domain::{NewPost, Post, PostId, UserId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{NewPostRow, PostRow};
use super::pool::DbPool;
use super::schema::post;

/// Diesel-backed implementation of the `PostRepository` port.
///
/// Deleting a post removes its media and comments through the
/// `media_post_id_fkey` and `comment_post_id_fkey` cascades.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn create(&self, new_post: &NewPost) -> Result<Post, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: PostRow = diesel::insert_into(post::table)
            .values(NewPostRow {
                user_id: new_post.user_id.get(),
            })
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Post::from(row))
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<PostRow> = post::table
            .find(id.get())
            .select(PostRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Post::from))
    }

    async fn list_by_user(&self, user: UserId) -> Result<Vec<Post>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PostRow> = post::table
            .filter(post::user_id.eq(user.get()))
            .select(PostRow::as_select())
            .order_by(post::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn delete(&self, id: PostId) -> Result<bool, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(post::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
