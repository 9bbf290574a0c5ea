//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the social schema ports backed by PostgreSQL
//! through `diesel-async` and a `bb8` connection pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain records. Cascades are declared in the migrations, not here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Central error mapping**: every Diesel failure passes through
//!   `diesel_helpers`, which classifies constraint violations by name.
//!
//! # Example
//!
//! ```no_run
//! use social_schema::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), social_schema::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/social")).await?;
//! let users = DieselUserRepository::new(pool);
//! # let _ = users;
//! # Ok(())
//! # }
//! ```

mod diesel_comment_repository;
mod diesel_follower_repository;
mod diesel_helpers;
mod diesel_media_repository;
mod diesel_post_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use diesel_follower_repository::DieselFollowerRepository;
pub use diesel_media_repository::DieselMediaRepository;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
