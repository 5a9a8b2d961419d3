//! Mini URL creation, lookup and maintenance service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{InsertOutcome, MiniUrl, NewMiniUrl};
use crate::domain::repositories::MiniUrlRepository;
use crate::error::AppError;
use crate::utils::key_generator::KeyGenerator;
use crate::utils::url_validator::UrlValidator;

/// Default number of candidate keys tried before giving up.
pub const DEFAULT_MAX_KEY_ATTEMPTS: usize = 10;

/// Service for creating and maintaining short key mappings.
///
/// Holds no durable state: the repository owns every record, and the only
/// internal state is the key generator's random source.
///
/// # Idempotency
///
/// [`Self::get_or_create`] returns the existing record for an exact URL
/// instead of allocating a second key. Two concurrent calls for the same
/// unseen URL can still both create a record; later calls then consistently
/// return the oldest one.
pub struct MiniUrlService<R: MiniUrlRepository + ?Sized = dyn MiniUrlRepository> {
    repository: Arc<R>,
    validator: Arc<dyn UrlValidator>,
    key_generator: KeyGenerator,
    max_key_attempts: usize,
}

impl<R: MiniUrlRepository + ?Sized> MiniUrlService<R> {
    /// Creates a new service.
    ///
    /// `max_key_attempts` below 1 is treated as 1.
    pub fn new(
        repository: Arc<R>,
        validator: Arc<dyn UrlValidator>,
        key_generator: KeyGenerator,
        max_key_attempts: usize,
    ) -> Self {
        Self {
            repository,
            validator,
            key_generator,
            max_key_attempts: max_key_attempts.max(1),
        }
    }

    /// Returns the mapping for `full_url`, creating it if none exists.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL (before any store access)
    /// 2. Return the existing record for the exact URL, if any
    /// 3. Otherwise reserve a fresh key and store a new record
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if validation fails
    /// - [`AppError::KeyspaceExhausted`] if no free key was found
    /// - [`AppError::Internal`] on storage errors
    pub async fn get_or_create(&self, full_url: &str) -> Result<MiniUrl, AppError> {
        self.validate_url(full_url)?;

        if let Some(existing) = self.repository.find_by_full_url(full_url).await? {
            tracing::info!(mini_key = %existing.mini_key, "MiniUrl already exists for this URL");
            return Ok(existing);
        }

        let created = self.create_with_unique_key(full_url).await?;
        tracing::info!(mini_key = %created.mini_key, full_url, "Saved new MiniUrl");

        Ok(created)
    }

    /// Retrieves a mapping by its short key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists for `mini_key`.
    pub async fn get_by_key(&self, mini_key: &str) -> Result<MiniUrl, AppError> {
        self.repository
            .find_by_key(mini_key)
            .await?
            .ok_or_else(|| not_found(mini_key))
    }

    /// Points an existing key at a new URL.
    ///
    /// The key and `created_at` never change; `updated_at` moves forward.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if `new_full_url` fails validation,
    ///   whether or not the key exists
    /// - [`AppError::NotFound`] if no record exists for `mini_key`
    pub async fn update(&self, mini_key: &str, new_full_url: &str) -> Result<MiniUrl, AppError> {
        self.validate_url(new_full_url)?;

        let updated = self
            .repository
            .update_full_url(mini_key, new_full_url)
            .await?
            .ok_or_else(|| not_found(mini_key))?;

        tracing::info!(mini_key, "Updated MiniUrl");
        Ok(updated)
    }

    /// Deletes a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record exists for `mini_key`.
    pub async fn delete(&self, mini_key: &str) -> Result<(), AppError> {
        if !self.repository.delete(mini_key).await? {
            return Err(not_found(mini_key));
        }

        tracing::info!(mini_key, "Deleted MiniUrl");
        Ok(())
    }

    /// Returns every stored mapping.
    pub async fn list_all(&self) -> Result<Vec<MiniUrl>, AppError> {
        tracing::debug!("Fetching all MiniUrls");
        self.repository.list_all().await
    }

    /// Returns `true` if a mapping exists for `mini_key`.
    pub async fn exists(&self, mini_key: &str) -> Result<bool, AppError> {
        self.repository.exists(mini_key).await
    }

    /// Returns `true` if the underlying store is reachable.
    pub async fn health_check(&self) -> bool {
        match self.repository.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Store health check failed");
                false
            }
        }
    }

    fn validate_url(&self, url: &str) -> Result<(), AppError> {
        self.validator.validate(url).map_err(|e| {
            tracing::warn!(url, reason = %e, "Invalid URL");
            AppError::invalid_url(e.to_string(), json!({ "fullUrl": url }))
        })
    }

    /// Reserves a fresh key and stores the record in one atomic step,
    /// regenerating on collision up to `max_key_attempts` times.
    async fn create_with_unique_key(&self, full_url: &str) -> Result<MiniUrl, AppError> {
        for attempt in 1..=self.max_key_attempts {
            let candidate = self.key_generator.generate_key();

            let new_mini_url = NewMiniUrl {
                mini_key: candidate,
                full_url: full_url.to_string(),
            };

            match self.repository.insert_if_absent(new_mini_url).await? {
                InsertOutcome::Inserted(record) => return Ok(record),
                InsertOutcome::KeyTaken => {
                    tracing::debug!(attempt, "MiniKey already exists, regenerating");
                }
            }
        }

        tracing::warn!(
            attempts = self.max_key_attempts,
            key_length = self.key_generator.key_length(),
            "Failed to find a free MiniKey"
        );

        Err(AppError::keyspace_exhausted(
            "Failed to generate a unique MiniKey",
            json!({ "attempts": self.max_key_attempts }),
        ))
    }
}

fn not_found(mini_key: &str) -> AppError {
    AppError::not_found(
        format!("MiniUrl not found with miniKey: {mini_key}"),
        json!({ "miniKey": mini_key }),
    )
}
