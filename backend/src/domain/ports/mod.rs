//! Domain ports for the social schema.
//!
//! Each entity has a repository trait; adapters in `outbound` implement them
//! against PostgreSQL or memory. All ports share [`SchemaPersistenceError`].

mod macros;
pub(crate) use macros::define_port_error;

mod comment_repository;
mod follower_repository;
mod media_repository;
mod post_repository;
mod schema_persistence_error;
mod user_repository;

pub use comment_repository::CommentRepository;
pub use follower_repository::FollowerRepository;
#[cfg(test)]
pub use follower_repository::MockFollowerRepository;
pub use media_repository::MediaRepository;
pub use post_repository::PostRepository;
pub use schema_persistence_error::{ParentEntity, SchemaPersistenceError, UniqueConstraint};
pub use user_repository::UserRepository;
