//! Outbound adapters implementing the domain repository ports.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM, with
//!   cascades declared in the embedded migrations.
//! - **memory**: a process-local store that replays the same constraints and
//!   cascades explicitly, for tests and prototyping.
//!
//! Adapters are thin translators between domain records and storage. They
//! contain no business logic.

pub mod memory;
pub mod persistence;

pub use memory::InMemorySocialStore;
