//! Utility functions for key generation and URL validation.
//!
//! - [`key_generator`] - Random short key generation
//! - [`url_validator`] - URL validation capability and its default implementation

pub mod key_generator;
pub mod url_validator;
