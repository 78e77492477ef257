//! In-process response cache.
//!
//! Stores upstream JSON bodies keyed by the full upstream URL, each entry
//! carrying its TTL and tags. Invalidation evicts by tag and is infallible
//! in-process; staleness otherwise self-heals at TTL expiry.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;

use crate::cache::registry::{CacheRegistry, CacheTag, FetchDirective, MutationKind};

struct CachedEntry {
    body: Value,
    stored_at: Instant,
    ttl: Duration,
    tags: Vec<CacheTag>,
}

impl CachedEntry {
    fn is_fresh(&self) -> bool {
        self.stored_at.elapsed() < self.ttl
    }
}

/// Tag-indexed cache of backend read responses.
pub struct ResponseCache {
    entries: DashMap<String, CachedEntry>,
}

impl ResponseCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Look up a cached body. Expired entries count as misses and are
    /// evicted lazily.
    pub fn get(&self, key: &str) -> Option<Value> {
        let hit = self
            .entries
            .get(key)
            .map(|entry| entry.is_fresh().then(|| entry.body.clone()));
        match hit {
            Some(Some(body)) => Some(body),
            Some(None) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// Store a response under the directive's TTL and tags. Uncached
    /// directives store nothing.
    pub fn insert(&self, key: impl Into<String>, body: Value, directive: &FetchDirective) {
        let Some(ttl) = directive.revalidate else {
            return;
        };
        self.entries.insert(
            key.into(),
            CachedEntry {
                body,
                stored_at: Instant::now(),
                ttl,
                tags: directive.tags.clone(),
            },
        );
    }

    /// Evict every entry carrying any of the given tags. Returns the number
    /// of entries removed.
    pub fn invalidate(&self, tags: &[CacheTag]) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.tags.iter().any(|t| tags.contains(t)));
        before - self.entries.len()
    }

    /// Invalidate the registry's tag closure for a mutation kind.
    pub fn invalidate_after_mutation(&self, registry: &CacheRegistry, kind: MutationKind) -> usize {
        let tags = registry.tags_for_mutation(kind);
        let evicted = self.invalidate(&tags);
        tracing::debug!(?kind, evicted, "cache invalidated after mutation");
        evicted
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new()
    }
}
