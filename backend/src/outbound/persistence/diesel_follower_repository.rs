//! PostgreSQL-backed `FollowerRepository` implementation using Diesel ORM.
//!
//! Edges live in the `follower` table keyed by `(user_from_id, user_to_id)`.
//! Both columns reference `user` with `ON DELETE CASCADE`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FollowerRepository, SchemaPersistenceError};
use crate::domain::{FollowEdge, UserId};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::NewFollowerRow;
use super::pool::DbPool;
use super::schema::follower;

/// Diesel-backed implementation of the `FollowerRepository` port.
#[derive(Clone)]
pub struct DieselFollowerRepository {
    pool: DbPool,
}

impl DieselFollowerRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl From<&FollowEdge> for NewFollowerRow {
    fn from(edge: &FollowEdge) -> Self {
        Self {
            user_from_id: edge.follower().get(),
            user_to_id: edge.followed().get(),
        }
    }
}

#[async_trait]
impl FollowerRepository for DieselFollowerRepository {
    async fn follow(&self, edge: &FollowEdge) -> Result<(), SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(follower::table)
            .values(NewFollowerRow::from(edge))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn unfollow(&self, edge: &FollowEdge) -> Result<bool, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(
            follower::table.find((edge.follower().get(), edge.followed().get())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }

    async fn exists(&self, edge: &FollowEdge) -> Result<bool, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<i32> = follower::table
            .find((edge.follower().get(), edge.followed().get()))
            .select(follower::user_from_id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(found.is_some())
    }

    async fn followers_of(&self, user: UserId) -> Result<Vec<UserId>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids: Vec<i32> = follower::table
            .filter(follower::user_to_id.eq(user.get()))
            .select(follower::user_from_id)
            .order_by(follower::user_from_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ids.into_iter().map(UserId::new).collect())
    }

    async fn following_of(&self, user: UserId) -> Result<Vec<UserId>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let ids: Vec<i32> = follower::table
            .filter(follower::user_from_id.eq(user.get()))
            .select(follower::user_to_id)
            .order_by(follower::user_to_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ids.into_iter().map(UserId::new).collect())
    }
}
