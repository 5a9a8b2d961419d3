//! Repository trait for short key mappings.

use crate::domain::entities::{InsertOutcome, MiniUrl, NewMiniUrl};
use crate::error::AppError;
use async_trait::async_trait;

/// Key-value store of [`MiniUrl`] records keyed by `mini_key`.
///
/// The store is the only owner of record data and enforces key uniqueness.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMiniUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryMiniUrlRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MiniUrlRepository: Send + Sync {
    /// Returns `true` if a record exists for `mini_key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn exists(&self, mini_key: &str) -> Result<bool, AppError>;

    /// Finds a record by its short key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_key(&self, mini_key: &str) -> Result<Option<MiniUrl>, AppError>;

    /// Finds the canonical record for an exact full URL.
    ///
    /// If several records share the URL, the oldest one is returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<MiniUrl>, AppError>;

    /// Atomically stores `new_mini_url` unless its key is already taken.
    ///
    /// Both timestamps of the stored record are set to the current time.
    ///
    /// # Returns
    ///
    /// - `Ok(InsertOutcome::Inserted(record))` if the key was free
    /// - `Ok(InsertOutcome::KeyTaken)` if another record holds the key
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert_if_absent(&self, new_mini_url: NewMiniUrl) -> Result<InsertOutcome, AppError>;

    /// Replaces the full URL of an existing record and bumps `updated_at`.
    ///
    /// Returns `Ok(None)` if no record exists for `mini_key`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update_full_url(
        &self,
        mini_key: &str,
        full_url: &str,
    ) -> Result<Option<MiniUrl>, AppError>;

    /// Removes a record. Returns `Ok(true)` if a record was removed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, mini_key: &str) -> Result<bool, AppError>;

    /// Returns every stored record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn list_all(&self) -> Result<Vec<MiniUrl>, AppError>;

    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
