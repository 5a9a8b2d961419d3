//! In-memory implementation of the mini URL repository.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use crate::domain::entities::{InsertOutcome, MiniUrl, NewMiniUrl};
use crate::domain::repositories::MiniUrlRepository;
use crate::error::AppError;

/// Process-local store backed by a sharded concurrent map.
///
/// Data is lost on restart. Used for development (`STORAGE_BACKEND=memory`)
/// and HTTP tests.
#[derive(Debug, Default)]
pub struct InMemoryMiniUrlRepository {
    storage: DashMap<String, MiniUrl>,
}

impl InMemoryMiniUrlRepository {
    pub fn new() -> Self {
        debug!("Using in-memory mini URL storage");
        Self {
            storage: DashMap::new(),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl MiniUrlRepository for InMemoryMiniUrlRepository {
    async fn exists(&self, mini_key: &str) -> Result<bool, AppError> {
        Ok(self.storage.contains_key(mini_key))
    }

    async fn find_by_key(&self, mini_key: &str) -> Result<Option<MiniUrl>, AppError> {
        Ok(self.storage.get(mini_key).map(|entry| entry.value().clone()))
    }

    async fn find_by_full_url(&self, full_url: &str) -> Result<Option<MiniUrl>, AppError> {
        Ok(self
            .storage
            .iter()
            .filter(|entry| entry.full_url == full_url)
            .map(|entry| entry.value().clone())
            .min_by(|a, b| {
                a.created_at
                    .cmp(&b.created_at)
                    .then_with(|| a.mini_key.cmp(&b.mini_key))
            }))
    }

    async fn insert_if_absent(&self, new_mini_url: NewMiniUrl) -> Result<InsertOutcome, AppError> {
        // The entry guard holds the shard lock, so check and insert are one step.
        match self.storage.entry(new_mini_url.mini_key) {
            Entry::Occupied(_) => Ok(InsertOutcome::KeyTaken),
            Entry::Vacant(vacant) => {
                let record = MiniUrl::new(
                    vacant.key().clone(),
                    new_mini_url.full_url,
                    Utc::now(),
                );
                vacant.insert(record.clone());
                Ok(InsertOutcome::Inserted(record))
            }
        }
    }

    async fn update_full_url(
        &self,
        mini_key: &str,
        full_url: &str,
    ) -> Result<Option<MiniUrl>, AppError> {
        let Some(mut entry) = self.storage.get_mut(mini_key) else {
            return Ok(None);
        };

        entry.set_full_url(full_url.to_string(), Utc::now());
        Ok(Some(entry.value().clone()))
    }

    async fn delete(&self, mini_key: &str) -> Result<bool, AppError> {
        Ok(self.storage.remove(mini_key).is_some())
    }

    async fn list_all(&self) -> Result<Vec<MiniUrl>, AppError> {
        let mut records: Vec<MiniUrl> = self
            .storage
            .iter()
            .map(|entry| entry.value().clone())
            .collect();

        records.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.mini_key.cmp(&b.mini_key))
        });

        Ok(records)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn new_mini_url(key: &str, url: &str) -> NewMiniUrl {
        NewMiniUrl {
            mini_key: key.to_string(),
            full_url: url.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryMiniUrlRepository::new();

        let outcome = repo
            .insert_if_absent(new_mini_url("abc1234", "https://example.com"))
            .await
            .unwrap();

        let InsertOutcome::Inserted(record) = outcome else {
            panic!("expected insert");
        };
        assert_eq!(record.created_at, record.updated_at);

        let found = repo.find_by_key("abc1234").await.unwrap().unwrap();
        assert_eq!(found, record);
        assert!(repo.exists("abc1234").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_taken_key_does_not_overwrite() {
        let repo = InMemoryMiniUrlRepository::new();

        repo.insert_if_absent(new_mini_url("abc1234", "https://example.com"))
            .await
            .unwrap();

        let outcome = repo
            .insert_if_absent(new_mini_url("abc1234", "https://other.com"))
            .await
            .unwrap();

        assert_eq!(outcome, InsertOutcome::KeyTaken);
        let found = repo.find_by_key("abc1234").await.unwrap().unwrap();
        assert_eq!(found.full_url, "https://example.com");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repo = InMemoryMiniUrlRepository::new();

        assert!(repo.find_by_key("nope123").await.unwrap().is_none());
        assert!(!repo.exists("nope123").await.unwrap());
        assert!(
            repo.find_by_full_url("https://example.com")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_find_by_full_url_is_exact() {
        let repo = InMemoryMiniUrlRepository::new();

        repo.insert_if_absent(new_mini_url("abc1234", "https://example.com"))
            .await
            .unwrap();

        assert!(
            repo.find_by_full_url("https://example.com/")
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            repo.find_by_full_url("HTTPS://EXAMPLE.COM")
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(
            repo.find_by_full_url("https://example.com")
                .await
                .unwrap()
                .unwrap()
                .mini_key,
            "abc1234"
        );
    }

    #[tokio::test]
    async fn test_update_bumps_updated_at() {
        let repo = InMemoryMiniUrlRepository::new();

        repo.insert_if_absent(new_mini_url("abc1234", "https://example.com"))
            .await
            .unwrap();
        let before = repo.find_by_key("abc1234").await.unwrap().unwrap();

        let updated = repo
            .update_full_url("abc1234", "https://rust-lang.org")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.mini_key, "abc1234");
        assert_eq!(updated.full_url, "https://rust-lang.org");
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at >= before.updated_at);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let repo = InMemoryMiniUrlRepository::new();

        let result = repo
            .update_full_url("nope123", "https://example.com")
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_existing_and_missing() {
        let repo = InMemoryMiniUrlRepository::new();

        repo.insert_if_absent(new_mini_url("abc1234", "https://example.com"))
            .await
            .unwrap();

        assert!(repo.delete("abc1234").await.unwrap());
        assert!(!repo.delete("abc1234").await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn test_list_all_returns_every_record() {
        let repo = InMemoryMiniUrlRepository::new();

        for i in 0..5 {
            repo.insert_if_absent(new_mini_url(
                &format!("key{:04}", i),
                &format!("https://example{}.com", i),
            ))
            .await
            .unwrap();
        }

        let records = repo.list_all().await.unwrap();
        assert_eq!(records.len(), 5);
        assert!(records.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test]
    async fn test_concurrent_inserts_of_one_key_admit_exactly_one() {
        let repo = Arc::new(InMemoryMiniUrlRepository::new());
        let mut handles = vec![];

        for i in 0..16 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.insert_if_absent(new_mini_url(
                    "samekey",
                    &format!("https://example{}.com", i),
                ))
                .await
                .unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if matches!(handle.await.unwrap(), InsertOutcome::Inserted(_)) {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(repo.len(), 1);
    }
}
