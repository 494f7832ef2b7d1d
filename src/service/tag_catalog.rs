//! In-memory cache of categorized forum tags.
//!
//! Fetching and classifying the briefing forum's tag set is a network round
//! trip, so the partitioned lists are cached per source channel with a
//! 24-hour TTL. A refresh computes both lists completely before swapping the
//! cache entry; no caller ever observes a half-updated catalog.

use std::collections::HashMap;
use std::sync::{LazyLock, RwLock};

use chrono::{DateTime, Duration, Utc};
use regex::Regex;

use crate::service::provider::ContentSource;

/// Matches framework tags exactly: "Framework <major>.<minor>".
/// Every other tag is a composition tag.
pub static FRAMEWORK_TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Framework\s+\d+\.\d+$").expect("valid regex"));

/// One channel's categorized tag lists.
#[derive(Debug, Clone, Default)]
struct TagCatalog {
    framework_tags: Vec<String>,
    composition_tags: Vec<String>,
    last_refreshed: Option<DateTime<Utc>>,
}

/// Cache of tag catalogs keyed by source channel id.
///
/// Owned by the application state and shared behind an `Arc`; the inner lock
/// is only held for in-memory reads and swaps, never across an await.
pub struct TagCatalogCache {
    entries: RwLock<HashMap<u64, TagCatalog>>,
    ttl: Duration,
}

impl Default for TagCatalogCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TagCatalogCache {
    /// Creates a cache with the standard 24-hour TTL.
    pub fn new() -> Self {
        Self::with_ttl(Duration::hours(24))
    }

    /// Creates a cache with a custom TTL. Tests use this to force staleness.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Whether the channel's catalog is missing, empty, or past its TTL.
    pub fn is_stale(&self, channel_id: u64) -> bool {
        let entries = self.entries.read().expect("tag cache lock poisoned");
        match entries.get(&channel_id) {
            Some(catalog) => {
                if catalog.framework_tags.is_empty() && catalog.composition_tags.is_empty() {
                    return true;
                }
                match catalog.last_refreshed {
                    Some(at) => Utc::now() - at > self.ttl,
                    None => true,
                }
            }
            None => true,
        }
    }

    /// Refreshes the channel's catalog only if it is stale.
    pub async fn ensure(&self, source: &dyn ContentSource, channel_id: u64) {
        if self.is_stale(channel_id) {
            self.refresh(source, channel_id).await;
        }
    }

    /// Unconditionally re-fetches and re-partitions the channel's tags.
    ///
    /// A provider failure leaves the prior catalog untouched and is logged
    /// rather than propagated.
    pub async fn refresh(&self, source: &dyn ContentSource, channel_id: u64) {
        let tags = match source.available_tags(channel_id).await {
            Ok(tags) => tags,
            Err(e) => {
                tracing::warn!("Failed to fetch tags for channel {}: {}", channel_id, e);
                return;
            }
        };

        let mut framework_tags = Vec::new();
        let mut composition_tags = Vec::new();
        for tag in tags {
            let trimmed = tag.trim().to_string();
            if FRAMEWORK_TAG_PATTERN.is_match(&trimmed) {
                framework_tags.push(trimmed);
            } else {
                composition_tags.push(trimmed);
            }
        }
        framework_tags.sort();
        composition_tags.sort();

        tracing::info!(
            "Tag cache updated for channel {}: {} framework tags, {} composition tags",
            channel_id,
            framework_tags.len(),
            composition_tags.len()
        );

        let mut entries = self.entries.write().expect("tag cache lock poisoned");
        entries.insert(
            channel_id,
            TagCatalog {
                framework_tags,
                composition_tags,
                last_refreshed: Some(Utc::now()),
            },
        );
    }

    /// Cached framework tags for a channel, sorted lexicographically.
    pub fn framework_tags(&self, channel_id: u64) -> Vec<String> {
        let entries = self.entries.read().expect("tag cache lock poisoned");
        entries
            .get(&channel_id)
            .map(|c| c.framework_tags.clone())
            .unwrap_or_default()
    }

    /// Cached composition tags for a channel, sorted lexicographically.
    pub fn composition_tags(&self, channel_id: u64) -> Vec<String> {
        let entries = self.entries.read().expect("tag cache lock poisoned");
        entries
            .get(&channel_id)
            .map(|c| c.composition_tags.clone())
            .unwrap_or_default()
    }
}
