use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};

/// One text slot.
///
/// Entries are never mutated in place: an update builds a new entry through
/// [`TextEntry::with_text`] and the store swaps it in whole, so a reader
/// holding a clone always sees a consistent `(text, created_at)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEntry {
    text: Arc<str>,
    created_at: DateTime<Utc>,
}

impl TextEntry {
    /// Fresh slot with empty text, born now
    pub fn new() -> Self {
        Self::born_at(Utc::now())
    }

    pub fn born_at(created_at: DateTime<Utc>) -> Self {
        Self {
            text: Arc::from(""),
            created_at,
        }
    }

    /// Replacement entry carrying `text`; the creation time is kept so the
    /// TTL stays anchored to slot birth.
    pub fn with_text(&self, text: &str) -> Self {
        Self {
            text: Arc::from(text),
            created_at: self.created_at,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shared handle to the text, cloning it is a refcount bump
    pub fn text_shared(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.created_at
    }

    /// An entry is expired once its age is strictly greater than `ttl`.
    #[inline]
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        self.age(now) > ttl
    }
}

impl Default for TextEntry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_empty() {
        let entry = TextEntry::new();
        assert_eq!(entry.text(), "");
        assert!(!entry.is_expired(Utc::now(), TimeDelta::minutes(60)));
    }

    #[test]
    fn test_with_text_preserves_creation_time() {
        let born = Utc::now() - TimeDelta::minutes(30);
        let entry = TextEntry::born_at(born);
        let updated = entry.with_text("aGVsbG8=");

        assert_eq!(updated.text(), "aGVsbG8=");
        assert_eq!(updated.created_at(), born);
        // the source entry is untouched
        assert_eq!(entry.text(), "");
    }

    #[test]
    fn test_expiry_is_strictly_greater_than_ttl() {
        let now = Utc::now();
        let ttl = TimeDelta::minutes(60);

        let at_limit = TextEntry::born_at(now - ttl);
        assert!(!at_limit.is_expired(now, ttl));

        let past_limit = TextEntry::born_at(now - ttl - TimeDelta::seconds(1));
        assert!(past_limit.is_expired(now, ttl));
    }

    #[test]
    fn test_text_shared_returns_same_allocation() {
        let entry = TextEntry::new().with_text("YWJj");
        let a = entry.text_shared();
        let b = entry.text_shared();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
