//! Repository trait definitions.
//!
//! Implemented by the infrastructure layer
//! ([`crate::infrastructure::persistence`]).

pub mod mini_url_repository;

pub use mini_url_repository::MiniUrlRepository;

#[cfg(test)]
pub use mini_url_repository::MockMiniUrlRepository;
