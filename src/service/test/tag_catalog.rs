use chrono::Duration;

use crate::service::tag_catalog::TagCatalogCache;
use crate::service::test::stubs::StubContentSource;

const CHANNEL: u64 = 42;

#[tokio::test]
/// Expected: tags are partitioned into framework and composition lists,
/// each sorted lexicographically.
async fn partitions_and_sorts_tags() {
    let mut source = StubContentSource::empty();
    source.tags = vec![
        "Mechanized".to_string(),
        "Framework 5.0".to_string(),
        "Infantry".to_string(),
        "framework 4.0".to_string(),
        "Armored".to_string(),
    ];

    let cache = TagCatalogCache::new();
    cache.refresh(&source, CHANNEL).await;

    assert_eq!(
        cache.framework_tags(CHANNEL),
        vec!["Framework 5.0", "framework 4.0"]
    );
    assert_eq!(
        cache.composition_tags(CHANNEL),
        vec!["Armored", "Infantry", "Mechanized"]
    );
}

#[tokio::test]
/// Expected: a provider failure leaves the previously cached catalog intact.
async fn failed_refresh_keeps_prior_catalog() {
    let mut source = StubContentSource::empty();
    source.tags = vec!["Framework 5.0".to_string(), "Infantry".to_string()];

    let cache = TagCatalogCache::new();
    cache.refresh(&source, CHANNEL).await;

    struct FailingTags;
    #[serenity::async_trait]
    impl crate::service::provider::ContentSource for FailingTags {
        async fn list_threads(
            &self,
            _channel_id: u64,
        ) -> Result<Vec<crate::model::candidate::ForumThread>, crate::service::provider::ProviderError>
        {
            Ok(Vec::new())
        }
        async fn get_thread(
            &self,
            _thread_id: u64,
        ) -> Result<Option<crate::model::candidate::ForumThread>, crate::service::provider::ProviderError>
        {
            Ok(None)
        }
        async fn available_tags(
            &self,
            _channel_id: u64,
        ) -> Result<Vec<String>, crate::service::provider::ProviderError> {
            Err(crate::service::provider::ProviderError::Other(
                "tags unavailable".to_string(),
            ))
        }
    }

    cache.refresh(&FailingTags, CHANNEL).await;

    assert_eq!(cache.framework_tags(CHANNEL), vec!["Framework 5.0"]);
    assert_eq!(cache.composition_tags(CHANNEL), vec!["Infantry"]);
}

#[tokio::test]
/// Expected: a zero TTL marks a populated catalog stale immediately.
async fn zero_ttl_forces_staleness() {
    let mut source = StubContentSource::empty();
    source.tags = vec!["Framework 5.0".to_string(), "Infantry".to_string()];

    let cache = TagCatalogCache::with_ttl(Duration::zero());
    assert!(cache.is_stale(CHANNEL));

    cache.refresh(&source, CHANNEL).await;
    assert!(cache.is_stale(CHANNEL));
}

#[tokio::test]
/// Expected: ensure refreshes a missing catalog and then leaves a fresh one
/// alone, even when the source changes underneath.
async fn ensure_refreshes_only_when_stale() {
    let mut source = StubContentSource::empty();
    source.tags = vec!["Framework 5.0".to_string(), "Infantry".to_string()];

    let cache = TagCatalogCache::new();
    cache.ensure(&source, CHANNEL).await;
    assert_eq!(cache.composition_tags(CHANNEL), vec!["Infantry"]);

    source.tags = vec!["Framework 5.0".to_string(), "Armored".to_string()];
    cache.ensure(&source, CHANNEL).await;
    assert_eq!(cache.composition_tags(CHANNEL), vec!["Infantry"]);
}

#[tokio::test]
/// Expected: a catalog whose fetch returned no tags stays stale so the next
/// ensure retries the fetch.
async fn empty_catalog_is_considered_stale() {
    let mut source = StubContentSource::empty();
    source.tags.clear();

    let cache = TagCatalogCache::new();
    cache.refresh(&source, CHANNEL).await;
    assert!(cache.is_stale(CHANNEL));
}
