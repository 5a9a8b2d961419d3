//! URL validation.
//!
//! Validation is a capability behind the [`UrlValidator`] trait so the
//! service does not depend on a particular parser. [`DefaultUrlValidator`]
//! accepts absolute `http`, `https` and `ftp` URLs with a host.

use url::Url;

/// Maximum accepted URL length in characters.
pub const MAX_URL_LENGTH: usize = 2048;

/// Schemes accepted by [`DefaultUrlValidator`].
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Reasons a URL is rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be blank")]
    Blank,

    #[error("URL must not exceed {max} characters (got {length})")]
    TooLong { length: usize, max: usize },

    #[error("Invalid URL format: {0}")]
    Malformed(String),

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that a string is an acceptable target URL.
pub trait UrlValidator: Send + Sync {
    fn validate(&self, url: &str) -> Result<(), UrlValidationError>;
}

/// [`UrlValidator`] backed by the WHATWG parser from the `url` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultUrlValidator;

impl UrlValidator for DefaultUrlValidator {
    fn validate(&self, input: &str) -> Result<(), UrlValidationError> {
        if input.trim().is_empty() {
            return Err(UrlValidationError::Blank);
        }

        let length = input.chars().count();
        if length > MAX_URL_LENGTH {
            return Err(UrlValidationError::TooLong {
                length,
                max: MAX_URL_LENGTH,
            });
        }

        // The parser strips surrounding whitespace; the stored value must not have any.
        if input.trim() != input {
            return Err(UrlValidationError::Malformed(
                "leading or trailing whitespace".to_string(),
            ));
        }

        let url = Url::parse(input).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

        if !ALLOWED_SCHEMES.contains(&url.scheme()) {
            return Err(UrlValidationError::UnsupportedScheme(
                url.scheme().to_string(),
            ));
        }

        match url.host_str() {
            Some(host) if !host.is_empty() => Ok(()),
            _ => Err(UrlValidationError::MissingHost),
        }
    }
}
