//! In-memory text store with lazy expiry
//!
//! Entries live in a sharded `DashMap`, so operations on unrelated codes only
//! ever touch their own shard. Every `get`/`update` checks the entry's age
//! against the TTL itself; the background sweeper only reclaims memory for
//! slots nobody comes back to.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use dashmap::DashMap;
use tracing::{debug, trace, warn};

use super::models::TextEntry;
use crate::errors::{Result, TextCopyError};
use crate::utils::{generate_code, is_valid_code, validate_base64_text};

/// Slots live for one hour after creation
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

pub struct TextStore {
    entries: DashMap<String, TextEntry>,
    ttl: TimeDelta,
}

impl TextStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
        }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Open a new empty slot and return its code.
    ///
    /// Codes are random, not reserved: if two creates ever mint the same
    /// code, the later insert replaces the earlier slot.
    pub fn create(&self) -> String {
        let code = generate_code();
        if self
            .entries
            .insert(code.clone(), TextEntry::new())
            .is_some()
        {
            warn!("Code collision on create, existing slot {} replaced", code);
        }
        debug!("Text slot created: {}", code);
        code
    }

    /// Replace the text of a live slot, keeping its creation time.
    ///
    /// Checks run in this order: code syntax, slot lookup (missing or
    /// expired slots are `NotFound`), then the base64 payload. Nothing is
    /// written unless all of them pass.
    pub fn update(&self, code: &str, text: &str) -> Result<String> {
        check_code(code)?;
        let validation = validate_base64_text(text);
        let now = Utc::now();

        {
            let Some(mut slot) = self.entries.get_mut(code) else {
                return Err(not_found());
            };

            if !slot.is_expired(now, self.ttl) {
                validation?;
                let updated = slot.with_text(text);
                *slot = updated;
                debug!("Text slot updated: {} ({} bytes)", code, text.len());
                return Ok(code.to_string());
            }
        }

        self.evict_expired(code);
        Err(not_found())
    }

    /// Current text of a live slot, empty until the first update.
    pub fn get(&self, code: &str) -> Result<Arc<str>> {
        check_code(code)?;
        let now = Utc::now();

        let entry = self
            .entries
            .get(code)
            .map(|slot| slot.value().clone())
            .ok_or_else(not_found)?;

        if entry.is_expired(now, self.ttl) {
            self.evict_expired(code);
            return Err(not_found());
        }

        Ok(entry.text_shared())
    }

    /// Remove every entry older than the TTL and return how many went.
    ///
    /// Expired codes are collected first and then removed one by one, each
    /// removal re-checking the entry under its own key lock. A slot that was
    /// re-created under the same code in the meantime survives.
    pub fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|slot| slot.value().is_expired(now, self.ttl))
            .map(|slot| slot.key().clone())
            .collect();

        let mut removed = 0;
        for code in expired {
            if self
                .entries
                .remove_if(&code, |_, entry| entry.is_expired(now, self.ttl))
                .is_some()
            {
                debug!("Expired entry swept: {}", code);
                removed += 1;
            }
        }
        removed
    }

    /// Number of entries held, expired or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw presence check, without the TTL check applied by `get`
    pub fn contains(&self, code: &str) -> bool {
        self.entries.contains_key(code)
    }

    fn evict_expired(&self, code: &str) {
        let now = Utc::now();
        if self
            .entries
            .remove_if(code, |_, entry| entry.is_expired(now, self.ttl))
            .is_some()
        {
            trace!("Expired entry evicted on access: {}", code);
        }
    }

    #[cfg(test)]
    fn insert_entry(&self, code: &str, entry: TextEntry) {
        self.entries.insert(code.to_string(), entry);
    }
}

impl Default for TextStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

fn check_code(code: &str) -> Result<()> {
    if is_valid_code(code) {
        Ok(())
    } else {
        Err(TextCopyError::invalid_code("invalid code"))
    }
}

fn not_found() -> TextCopyError {
    TextCopyError::not_found("not found")
}
