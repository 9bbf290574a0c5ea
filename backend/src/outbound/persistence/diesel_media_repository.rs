//! PostgreSQL-backed `MediaRepository` implementation using Diesel ORM.
//!
//! The `type` column is a `VARCHAR(5)` guarded by `media_type_check`; rows
//! are converted through `MediaType::from_str` on the way out so values
//! written out-of-band surface as `InvalidRow`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MediaRepository, SchemaPersistenceError};
use crate::domain::{Media, MediaId, NewMedia, PostId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{MediaRow, NewMediaRow};
use super::pool::DbPool;
use super::schema::media;

/// Diesel-backed implementation of the `MediaRepository` port.
#[derive(Clone)]
pub struct DieselMediaRepository {
    pool: DbPool,
}

impl DieselMediaRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl<'a> From<&'a NewMedia> for NewMediaRow<'a> {
    fn from(new_media: &'a NewMedia) -> Self {
        Self {
            kind: new_media.kind.as_str(),
            url: new_media.url.as_str(),
            post_id: new_media.post_id.get(),
        }
    }
}

#[async_trait]
impl MediaRepository for DieselMediaRepository {
    async fn attach(&self, new_media: &NewMedia) -> Result<Media, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: MediaRow = diesel::insert_into(media::table)
            .values(NewMediaRow::from(new_media))
            .returning(MediaRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Media::try_from(row)
    }

    async fn find_by_id(&self, id: MediaId) -> Result<Option<Media>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<MediaRow> = media::table
            .find(id.get())
            .select(MediaRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(Media::try_from).transpose()
    }

    async fn list_by_post(&self, post: PostId) -> Result<Vec<Media>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MediaRow> = media::table
            .filter(media::post_id.eq(post.get()))
            .select(MediaRow::as_select())
            .order_by(media::id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(Media::try_from).collect()
    }

    async fn delete(&self, id: MediaId) -> Result<bool, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(media::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
