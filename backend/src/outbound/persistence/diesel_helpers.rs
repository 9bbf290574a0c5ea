//! Shared error mapping for the Diesel repository implementations.
//!
//! Integrity failures are classified by the constraint names declared in the
//! migrations. Anything PostgreSQL reports without a recognised constraint
//! falls back to a generic query error.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::{ParentEntity, SchemaPersistenceError, UniqueConstraint};

use super::pool::PoolError;

/// Map pool errors to connection failures.
pub fn map_pool_error(error: PoolError) -> SchemaPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            SchemaPersistenceError::connection(message)
        }
    }
}

/// Resolve a unique constraint name to the column set it guards.
fn unique_constraint(name: &str) -> Option<UniqueConstraint> {
    match name {
        "user_username_key" => Some(UniqueConstraint::Username),
        "user_email_key" => Some(UniqueConstraint::Email),
        "follower_pkey" => Some(UniqueConstraint::FollowEdge),
        _ => None,
    }
}

/// Resolve a foreign key constraint name to the parent table it references.
fn parent_entity(name: &str) -> Option<ParentEntity> {
    match name {
        "follower_user_from_id_fkey"
        | "follower_user_to_id_fkey"
        | "post_user_id_fkey"
        | "comment_author_id_fkey" => Some(ParentEntity::User),
        "media_post_id_fkey" | "comment_post_id_fkey" => Some(ParentEntity::Post),
        _ => None,
    }
}

/// Check constraints declared by the migrations.
fn is_known_check(name: &str) -> bool {
    matches!(
        name,
        "user_username_check"
            | "user_firstname_check"
            | "user_lastname_check"
            | "user_email_check"
            | "user_password_check"
            | "media_type_check"
            | "media_url_check"
    )
}

fn unrecognised(kind: &DatabaseErrorKind, message: &str, constraint: Option<&str>) {
    warn!(
        ?kind,
        message,
        constraint_name = ?constraint,
        "unrecognised constraint violation - may need specific error mapping"
    );
}

fn map_database_error(
    kind: DatabaseErrorKind,
    message: &str,
    constraint: Option<&str>,
) -> SchemaPersistenceError {
    match kind {
        DatabaseErrorKind::UniqueViolation => {
            match constraint.and_then(unique_constraint) {
                Some(column) => SchemaPersistenceError::unique_violation(column),
                None => {
                    unrecognised(&kind, message, constraint);
                    SchemaPersistenceError::query("unique violation")
                }
            }
        }
        DatabaseErrorKind::ForeignKeyViolation => {
            match constraint.and_then(parent_entity) {
                Some(parent) => SchemaPersistenceError::foreign_key_violation(parent),
                None => {
                    unrecognised(&kind, message, constraint);
                    SchemaPersistenceError::query("foreign key violation")
                }
            }
        }
        DatabaseErrorKind::CheckViolation => match constraint {
            Some(name) if is_known_check(name) => {
                SchemaPersistenceError::query(format!("check constraint {name} violated"))
            }
            _ => {
                unrecognised(&kind, message, constraint);
                SchemaPersistenceError::query("check violation")
            }
        },
        DatabaseErrorKind::ClosedConnection => {
            SchemaPersistenceError::connection("database connection error")
        }
        _ => SchemaPersistenceError::query("database error"),
    }
}

/// Map Diesel errors to schema persistence errors.
pub fn map_diesel_error(error: DieselError) -> SchemaPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint_name = ?info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => SchemaPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => {
            SchemaPersistenceError::query("database query error")
        }
        DieselError::DatabaseError(kind, info) => {
            map_database_error(kind, info.message(), info.constraint_name())
        }
        _ => SchemaPersistenceError::query("database error"),
    }
}
