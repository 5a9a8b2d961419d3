//! Repository implementations.
//!
//! # Repositories
//!
//! - [`PgMiniUrlRepository`] - PostgreSQL storage (SQLx, runtime-checked queries)
//! - [`InMemoryMiniUrlRepository`] - process-local storage for development and tests

pub mod memory_mini_url_repository;
pub mod pg_mini_url_repository;

pub use memory_mini_url_repository::InMemoryMiniUrlRepository;
pub use pg_mini_url_repository::PgMiniUrlRepository;
