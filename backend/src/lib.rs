//! Persistence schema for a small social application.
//!
//! Five entities (users, follower edges, posts, media and comments) with
//! uniqueness and foreign-key constraints plus the delete cascades between
//! them. The domain layer defines records and repository ports; `outbound`
//! provides a Diesel/PostgreSQL adapter and an in-memory one.

pub mod config;
pub mod domain;
pub mod outbound;
