//! Cache tag registry.
//!
//! Maps each read category to a TTL and the tags attached to its cached
//! responses, and maps each mutation kind to the closure of tags that must
//! be invalidated together. The table is built once at startup and never
//! mutated afterwards; only the store it describes changes at runtime.

use std::collections::HashMap;
use std::time::Duration;

/// A label attached to a cached read response; the unit of invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheTag {
    Users,
    Complaints,
    BasicStats,
    TimeTrends,
    CategoryRelationships,
    WordFrequency,
    Cluster,
    Topics,
}

impl CacheTag {
    /// Every known tag, in table order.
    pub const ALL: [CacheTag; 8] = [
        CacheTag::Users,
        CacheTag::Complaints,
        CacheTag::BasicStats,
        CacheTag::TimeTrends,
        CacheTag::CategoryRelationships,
        CacheTag::WordFrequency,
        CacheTag::Cluster,
        CacheTag::Topics,
    ];

    /// Analytics tags derived from complaint content. Any complaint write
    /// can change every downstream statistic, so these invalidate as a set.
    pub const COMPLAINT_DERIVED: [CacheTag; 6] = [
        CacheTag::BasicStats,
        CacheTag::TimeTrends,
        CacheTag::CategoryRelationships,
        CacheTag::WordFrequency,
        CacheTag::Cluster,
        CacheTag::Topics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheTag::Users => "users",
            CacheTag::Complaints => "complaints",
            CacheTag::BasicStats => "basic-stats",
            CacheTag::TimeTrends => "time-trends",
            CacheTag::CategoryRelationships => "category-relationships",
            CacheTag::WordFrequency => "word-frequency",
            CacheTag::Cluster => "cluster",
            CacheTag::Topics => "topics",
        }
    }

    /// Parse a tag name. Unknown names yield `None`; callers decide whether
    /// that is a skip or a client error.
    pub fn parse(s: &str) -> Option<Self> {
        CacheTag::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// Category of read data proxied from the backend. One per tag in the
/// current table, kept as a separate enum so the 1:1 mapping is a policy
/// choice rather than a structural constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadCategory {
    Users,
    Complaints,
    BasicStats,
    TimeTrends,
    CategoryRelationships,
    WordFrequency,
    Cluster,
    Topics,
}

impl ReadCategory {
    pub const ALL: [ReadCategory; 8] = [
        ReadCategory::Users,
        ReadCategory::Complaints,
        ReadCategory::BasicStats,
        ReadCategory::TimeTrends,
        ReadCategory::CategoryRelationships,
        ReadCategory::WordFrequency,
        ReadCategory::Cluster,
        ReadCategory::Topics,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadCategory::Users => "users",
            ReadCategory::Complaints => "complaints",
            ReadCategory::BasicStats => "basic-stats",
            ReadCategory::TimeTrends => "time-trends",
            ReadCategory::CategoryRelationships => "category-relationships",
            ReadCategory::WordFrequency => "word-frequency",
            ReadCategory::Cluster => "cluster",
            ReadCategory::Topics => "topics",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ReadCategory::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

/// Kind of write operation driving invalidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// A user record changed
    User,
    /// A complaint changed; every derived statistic is suspect
    Complaint,
    /// Flush everything (logout, force refresh)
    All,
}

impl MutationKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(MutationKind::User),
            "complaint" => Some(MutationKind::Complaint),
            "all" => Some(MutationKind::All),
            _ => None,
        }
    }
}

/// How an outbound read should be cached.
#[derive(Debug, Clone)]
pub struct FetchDirective {
    /// Maximum age before a cached response goes stale. `None` disables
    /// caching entirely.
    pub revalidate: Option<Duration>,
    /// Tags attached to the cached response
    pub tags: Vec<CacheTag>,
}

impl FetchDirective {
    /// Directive for responses that must never be served from cache.
    pub fn uncached() -> Self {
        Self {
            revalidate: None,
            tags: Vec::new(),
        }
    }

    pub fn is_cached(&self) -> bool {
        self.revalidate.is_some()
    }
}

/// Immutable lookup table from read categories to cache directives.
/// Constructed once at process start and shared by reference.
#[derive(Debug)]
pub struct CacheRegistry {
    entries: HashMap<ReadCategory, (Duration, Vec<CacheTag>)>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        let mut entries = HashMap::new();
        // User-related data changes relatively frequently
        entries.insert(
            ReadCategory::Users,
            (Duration::from_secs(60), vec![CacheTag::Users]),
        );
        // Complaints change whenever users add or modify them
        entries.insert(
            ReadCategory::Complaints,
            (Duration::from_secs(60), vec![CacheTag::Complaints]),
        );
        // Aggregates refresh less often
        entries.insert(
            ReadCategory::BasicStats,
            (Duration::from_secs(300), vec![CacheTag::BasicStats]),
        );
        entries.insert(
            ReadCategory::TimeTrends,
            (Duration::from_secs(900), vec![CacheTag::TimeTrends]),
        );
        entries.insert(
            ReadCategory::CategoryRelationships,
            (
                Duration::from_secs(900),
                vec![CacheTag::CategoryRelationships],
            ),
        );
        entries.insert(
            ReadCategory::WordFrequency,
            (Duration::from_secs(1800), vec![CacheTag::WordFrequency]),
        );
        // Clustering and topic modeling are expensive to recompute
        entries.insert(
            ReadCategory::Cluster,
            (Duration::from_secs(3600), vec![CacheTag::Cluster]),
        );
        entries.insert(
            ReadCategory::Topics,
            (Duration::from_secs(3600), vec![CacheTag::Topics]),
        );
        Self { entries }
    }

    /// Get the fetch directive for a known read category. A category
    /// missing from the table degrades to uncached rather than panicking.
    pub fn cache_options(&self, category: ReadCategory) -> FetchDirective {
        match self.entries.get(&category) {
            Some((ttl, tags)) => FetchDirective {
                revalidate: Some(*ttl),
                tags: tags.clone(),
            },
            None => {
                tracing::warn!(category = category.as_str(), "unknown cache category");
                FetchDirective::uncached()
            }
        }
    }

    /// Boundary variant: resolve a category by name. Unknown names degrade
    /// to an uncached directive.
    pub fn cache_options_for(&self, category: &str) -> FetchDirective {
        match ReadCategory::parse(category) {
            Some(c) => self.cache_options(c),
            None => {
                tracing::warn!(category, "unknown cache category");
                FetchDirective::uncached()
            }
        }
    }

    /// Closure of tags to invalidate after a mutation of the given kind.
    pub fn tags_for_mutation(&self, kind: MutationKind) -> Vec<CacheTag> {
        match kind {
            MutationKind::User => vec![CacheTag::Users],
            MutationKind::Complaint => {
                let mut tags = vec![CacheTag::Complaints];
                tags.extend(CacheTag::COMPLAINT_DERIVED);
                tags
            }
            MutationKind::All => CacheTag::ALL.to_vec(),
        }
    }
}

impl Default for CacheRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_category_has_bounded_ttl_and_one_tag() {
        let registry = CacheRegistry::new();
        for category in ReadCategory::ALL {
            let directive = registry.cache_options(category);
            let ttl = directive.revalidate.expect("known category must cache");
            assert!(ttl >= Duration::from_secs(60), "{:?} ttl too low", category);
            assert!(
                ttl <= Duration::from_secs(3600),
                "{:?} ttl too high",
                category
            );
            assert_eq!(directive.tags.len(), 1, "{:?} tag cardinality", category);
        }
    }

    #[test]
    fn complaint_invalidation_is_strict_superset_of_user() {
        let registry = CacheRegistry::new();
        let user_tags = registry.tags_for_mutation(MutationKind::User);
        let complaint_tags = registry.tags_for_mutation(MutationKind::Complaint);
        assert!(complaint_tags.len() > user_tags.len());
        // Strict superset over the analytics closure; the user tag itself
        // is deliberately untouched by complaint writes.
        for tag in &complaint_tags {
            assert_ne!(*tag, CacheTag::Users);
        }
        assert_eq!(complaint_tags.len(), 7);
    }

    #[test]
    fn all_mutation_covers_every_tag_and_is_idempotent() {
        let registry = CacheRegistry::new();
        let first = registry.tags_for_mutation(MutationKind::All);
        let second = registry.tags_for_mutation(MutationKind::All);
        assert_eq!(first, second);
        assert_eq!(first.len(), CacheTag::ALL.len());
        for tag in CacheTag::ALL {
            assert!(first.contains(&tag), "missing {:?}", tag);
        }
    }

    #[test]
    fn unknown_category_degrades_to_uncached() {
        let registry = CacheRegistry::new();
        let directive = registry.cache_options_for("sentiment");
        assert!(!directive.is_cached());
        assert!(directive.tags.is_empty());
    }

    #[test]
    fn tag_names_round_trip() {
        for tag in CacheTag::ALL {
            assert_eq!(CacheTag::parse(tag.as_str()), Some(tag));
        }
        assert_eq!(CacheTag::parse("no-such-tag"), None);
    }

    #[test]
    fn category_names_resolve_to_their_own_tag() {
        let registry = CacheRegistry::new();
        for category in ReadCategory::ALL {
            let directive = registry.cache_options_for(category.as_str());
            assert_eq!(directive.tags[0].as_str(), category.as_str());
        }
    }
}
