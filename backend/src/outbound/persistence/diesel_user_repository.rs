//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Username and email uniqueness are enforced by `user_username_key` and
//! `user_email_key`; deleting a user relies on the `ON DELETE CASCADE`
//! foreign keys to remove posts, comments, media and follower edges.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{SchemaPersistenceError, UserRepository};
use crate::domain::{EmailAddress, NewUser, User, UserChanges, UserId, Username};

use super::diesel_helpers::{map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow, UserUpdate};
use super::pool::DbPool;
use super::schema::user;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(new_user: &'a NewUser) -> Self {
        Self {
            username: new_user.username.as_str(),
            firstname: new_user.firstname.as_str(),
            lastname: new_user.lastname.as_str(),
            email: new_user.email.as_str(),
            password: new_user.password.as_str(),
            is_active: new_user.is_active,
        }
    }
}

impl<'a> From<&'a UserChanges> for UserUpdate<'a> {
    fn from(changes: &'a UserChanges) -> Self {
        Self {
            username: changes.username.as_ref().map(Username::as_str),
            firstname: changes.firstname.as_ref().map(|name| name.as_str()),
            lastname: changes.lastname.as_ref().map(|name| name.as_str()),
            email: changes.email.as_ref().map(EmailAddress::as_str),
            password: changes.password.as_ref().map(|hash| hash.as_str()),
            is_active: changes.is_active,
        }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, new_user: &NewUser) -> Result<User, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(user::table)
            .values(NewUserRow::from(new_user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        User::try_from(row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = user::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = user::table
            .filter(user::username.eq(username.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = user::table
            .filter(user::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(User::try_from).transpose()
    }

    async fn update(
        &self,
        id: UserId,
        changes: &UserChanges,
    ) -> Result<Option<User>, SchemaPersistenceError> {
        // Diesel rejects an empty changeset, so a no-op update is a lookup.
        if changes.is_empty() {
            return self.find_by_id(id).await;
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = diesel::update(user::table.find(id.get()))
            .set(UserUpdate::from(changes))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(User::try_from).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<bool, SchemaPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(user::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
