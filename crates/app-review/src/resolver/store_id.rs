//! Store numeric id resolution via the iTunes lookup service.
//!
//! The lookup is keyed by bundle id and an optional country segment:
//! `http://itunes.apple.com/<country>/lookup?bundleId=<bundleId>`.
//! Without a country the path contains a double slash. It is sent as is.

use std::sync::Arc;

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::cache::IdentityCacheTrait;
use crate::config::ReviewConfig;
use crate::errors::{LookupError, Result};
use crate::provider::StoreLookupClient;

/// Response from the /lookup endpoint
#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<LookupItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupItem {
    /// Numeric store id. Documented as a number; strings are tolerated.
    track_id: Option<Value>,
}

/// Extract `results[0].trackId` from a lookup body.
///
/// Returns `Ok(None)` when the body is valid but has no usable result.
pub(crate) fn parse_track_id(body: &str) -> std::result::Result<Option<String>, LookupError> {
    let response: LookupResponse = serde_json::from_str(body)?;
    let track_id = response
        .results
        .into_iter()
        .next()
        .and_then(|item| item.track_id)
        .and_then(|value| match value {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        });
    Ok(track_id)
}

/// Resolves the App Store numeric id of the running app.
pub struct StoreIdResolver {
    client: Arc<dyn StoreLookupClient>,
    cache: Arc<dyn IdentityCacheTrait>,
    config: ReviewConfig,
}

impl StoreIdResolver {
    pub fn new(
        client: Arc<dyn StoreLookupClient>,
        cache: Arc<dyn IdentityCacheTrait>,
        config: ReviewConfig,
    ) -> Self {
        Self {
            client,
            cache,
            config,
        }
    }

    /// Build the lookup URL. An absent country leaves an empty path segment.
    pub fn lookup_url(&self, bundle_id: &str, country_code: Option<&str>) -> String {
        format!(
            "{}/{}/lookup?bundleId={}",
            self.config.lookup_base_url,
            country_code.unwrap_or(""),
            bundle_id
        )
    }

    /// Look up the store id for `bundle_id`.
    ///
    /// Never fails: an empty bundle id, a timeout, a transport or parse
    /// error, and a lookup without results all yield an empty string.
    /// Nothing is cached here; see [`StoreIdResolver::store_id`].
    pub async fn resolve(&self, bundle_id: &str, country_code: Option<&str>) -> String {
        if bundle_id.is_empty() {
            return String::new();
        }

        let url = self.lookup_url(bundle_id, country_code);
        let timeout = self.config.lookup_timeout;

        let body = match tokio::time::timeout(timeout, self.client.fetch(&url)).await {
            Ok(Ok(body)) => body,
            Ok(Err(e)) => {
                warn!("Store lookup for {} failed: {}", bundle_id, e);
                return String::new();
            }
            Err(_) => {
                warn!(
                    "Store lookup for {} failed: {}",
                    bundle_id,
                    LookupError::Timeout { after: timeout }
                );
                return String::new();
            }
        };

        match parse_track_id(&body) {
            Ok(Some(id)) => {
                info!("App Store id for {}: {}", bundle_id, id);
                id
            }
            Ok(None) => {
                info!("App Store id for {} not found", bundle_id);
                String::new()
            }
            Err(e) => {
                warn!("Store lookup for {} failed: {}", bundle_id, e);
                String::new()
            }
        }
    }

    /// The memoized store id of the running app.
    ///
    /// The first completed lookup is cached for the lifetime of the cache,
    /// including an empty "not found" result, and is never retried.
    /// Only a failure to read the bundle id is returned as an error.
    pub async fn store_id(&self) -> Result<String> {
        if let Some(cached) = self.cache.cached_store_id() {
            debug!("Using cached App Store id {:?}", cached);
            return Ok(cached);
        }

        let bundle_id = self.cache.bundle_id().await?;
        let country = self.country_code();
        let id = self.resolve(&bundle_id, country.as_deref()).await;
        self.cache.set_cached_store_id(id.clone());
        Ok(id)
    }

    /// Country used when the call site does not pass one: the cache override
    /// first, then the configured default.
    pub fn country_code(&self) -> Option<String> {
        self.cache
            .country_code()
            .or_else(|| self.config.country_code.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::cache::IdentityCache;
    use crate::models::PackageInfo;
    use crate::provider::PackageInfoProvider;

    struct StaticPackageInfo(&'static str);

    #[async_trait]
    impl PackageInfoProvider for StaticPackageInfo {
        async fn package_info(&self) -> Result<PackageInfo> {
            Ok(PackageInfo {
                package_id: self.0.to_string(),
                ..PackageInfo::default()
            })
        }
    }

    struct MockLookup {
        body: std::result::Result<String, LookupError>,
        delay: Duration,
        urls: Mutex<Vec<String>>,
        call_count: AtomicUsize,
    }

    impl MockLookup {
        fn ok(body: &str) -> Self {
            Self {
                body: Ok(body.to_string()),
                delay: Duration::ZERO,
                urls: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        fn failing(error: LookupError) -> Self {
            Self {
                body: Err(error),
                ..Self::ok("")
            }
        }
    }

    #[async_trait]
    impl StoreLookupClient for MockLookup {
        async fn fetch(&self, url: &str) -> std::result::Result<String, LookupError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(url.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.body.clone()
        }
    }

    fn resolver_with(lookup: Arc<MockLookup>, bundle: &'static str) -> StoreIdResolver {
        let cache = Arc::new(IdentityCache::new(Arc::new(StaticPackageInfo(bundle))));
        StoreIdResolver::new(lookup, cache, ReviewConfig::default())
    }

    #[test]
    fn test_lookup_url_keeps_empty_country_segment() {
        let resolver = resolver_with(Arc::new(MockLookup::ok("{}")), "com.example.app");
        assert_eq!(
            resolver.lookup_url("com.example.app", None),
            "http://itunes.apple.com//lookup?bundleId=com.example.app"
        );
        assert_eq!(
            resolver.lookup_url("com.example.app", Some("jp")),
            "http://itunes.apple.com/jp/lookup?bundleId=com.example.app"
        );
    }

    #[test]
    fn test_parse_track_id() {
        let body = r#"{"resultCount":1,"results":[{"trackId":284882215,"trackName":"Facebook"}]}"#;
        assert_eq!(parse_track_id(body).unwrap().as_deref(), Some("284882215"));

        let body = r#"{"results":[{"trackId":1},{"trackId":2}]}"#;
        assert_eq!(parse_track_id(body).unwrap().as_deref(), Some("1"));

        assert_eq!(parse_track_id(r#"{"results":[]}"#).unwrap(), None);
        assert_eq!(parse_track_id(r#"{"results":[{}]}"#).unwrap(), None);
        assert_eq!(parse_track_id("{}").unwrap(), None);
        assert!(parse_track_id("<html>").is_err());
    }

    #[tokio::test]
    async fn test_resolve_returns_first_track_id() {
        let lookup = Arc::new(MockLookup::ok(r#"{"results":[{"trackId":123456}]}"#));
        let resolver = resolver_with(lookup.clone(), "com.example.app");

        assert_eq!(resolver.resolve("com.example.app", Some("us")).await, "123456");
        assert_eq!(
            lookup.urls.lock().unwrap().as_slice(),
            &["http://itunes.apple.com/us/lookup?bundleId=com.example.app".to_string()]
        );
    }

    #[tokio::test]
    async fn test_resolve_empty_bundle_skips_network() {
        let lookup = Arc::new(MockLookup::ok(r#"{"results":[{"trackId":1}]}"#));
        let resolver = resolver_with(lookup.clone(), "");

        assert_eq!(resolver.resolve("", None).await, "");
        assert_eq!(lookup.call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_resolve_swallows_errors() {
        for error in [
            LookupError::Transport("connection refused".to_string()),
            LookupError::Status(503),
        ] {
            let resolver = resolver_with(Arc::new(MockLookup::failing(error)), "a.b");
            assert_eq!(resolver.resolve("a.b", None).await, "");
        }

        let resolver = resolver_with(Arc::new(MockLookup::ok("not json")), "a.b");
        assert_eq!(resolver.resolve("a.b", None).await, "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolve_times_out_after_five_seconds() {
        let lookup = Arc::new(MockLookup {
            delay: Duration::from_secs(30),
            ..MockLookup::ok(r#"{"results":[{"trackId":1}]}"#)
        });
        let resolver = resolver_with(lookup, "a.b");

        let started = tokio::time::Instant::now();
        assert_eq!(resolver.resolve("a.b", None).await, "");
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(5));
        assert!(elapsed < Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_store_id_is_memoized() {
        let lookup = Arc::new(MockLookup::ok(r#"{"results":[{"trackId":42}]}"#));
        let resolver = resolver_with(lookup.clone(), "com.example.app");

        assert_eq!(resolver.store_id().await.unwrap(), "42");
        assert_eq!(resolver.store_id().await.unwrap(), "42");
        assert_eq!(lookup.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_store_id_caches_not_found() {
        let lookup = Arc::new(MockLookup::ok(r#"{"results":[]}"#));
        let resolver = resolver_with(lookup.clone(), "com.example.app");

        assert_eq!(resolver.store_id().await.unwrap(), "");
        assert_eq!(resolver.store_id().await.unwrap(), "");
        assert_eq!(lookup.call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_country_precedence() {
        let package_info = Arc::new(StaticPackageInfo("a.b"));
        let cache = Arc::new(IdentityCache::new(package_info));
        let config = ReviewConfig::default().with_country_code("de");
        let resolver = StoreIdResolver::new(
            Arc::new(MockLookup::ok("{}")),
            cache.clone(),
            config,
        );

        assert_eq!(resolver.country_code().as_deref(), Some("de"));
        cache.set_country_code("jp");
        assert_eq!(resolver.country_code().as_deref(), Some("jp"));
        cache.set_country_code("");
        assert_eq!(resolver.country_code().as_deref(), Some("de"));
    }
}
