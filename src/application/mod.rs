//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::mini_url_service::MiniUrlService`] - get-or-create, lookup, update and delete of short key mappings

pub mod services;
