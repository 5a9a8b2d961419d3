//! Core domain entities.
//!
//! - [`MiniUrl`] - a stored short key to full URL mapping
//! - [`NewMiniUrl`] - input for creating a mapping
//! - [`InsertOutcome`] - result of reserving a key in the store

pub mod mini_url;

pub use mini_url::{InsertOutcome, MiniUrl, NewMiniUrl};
