//! MiniUrl entity: the mapping from a short key to its full URL.

use chrono::{DateTime, Utc};

/// A stored short key to full URL mapping.
///
/// `created_at` is fixed at creation; `updated_at` moves forward whenever
/// `full_url` changes, so `created_at <= updated_at` always holds.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MiniUrl {
    pub mini_key: String,
    pub full_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MiniUrl {
    /// Creates a record whose timestamps are both `now`.
    pub fn new(mini_key: String, full_url: String, now: DateTime<Utc>) -> Self {
        Self {
            mini_key,
            full_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the full URL and bumps `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn set_full_url(&mut self, full_url: String, now: DateTime<Utc>) {
        self.full_url = full_url;
        self.updated_at = now.max(self.updated_at);
    }
}

/// Input for creating a new mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMiniUrl {
    pub mini_key: String,
    pub full_url: String,
}

/// Result of an atomic insert-if-absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The key was free and the record is now stored.
    Inserted(MiniUrl),
    /// Another record already holds the key; nothing was written.
    KeyTaken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_sets_equal_timestamps() {
        let now = Utc::now();
        let mini_url = MiniUrl::new("abc1234".to_string(), "https://example.com".to_string(), now);

        assert_eq!(mini_url.mini_key, "abc1234");
        assert_eq!(mini_url.full_url, "https://example.com");
        assert_eq!(mini_url.created_at, now);
        assert_eq!(mini_url.updated_at, now);
    }

    #[test]
    fn test_set_full_url_bumps_updated_at() {
        let created = Utc::now();
        let mut mini_url =
            MiniUrl::new("abc1234".to_string(), "https://example.com".to_string(), created);

        let later = created + Duration::seconds(5);
        mini_url.set_full_url("https://rust-lang.org".to_string(), later);

        assert_eq!(mini_url.full_url, "https://rust-lang.org");
        assert_eq!(mini_url.created_at, created);
        assert_eq!(mini_url.updated_at, later);
    }

    #[test]
    fn test_set_full_url_never_moves_backwards() {
        let created = Utc::now();
        let mut mini_url =
            MiniUrl::new("abc1234".to_string(), "https://example.com".to_string(), created);

        mini_url.set_full_url(
            "https://rust-lang.org".to_string(),
            created - Duration::seconds(30),
        );

        assert_eq!(mini_url.updated_at, created);
        assert!(mini_url.created_at <= mini_url.updated_at);
    }
}
