//! Top-level review orchestration.
//!
//! Every public operation dispatches on the platform at call time:
//!
//! | operation            | iOS                   | Android                          | other |
//! |----------------------|-----------------------|----------------------------------|-------|
//! | `request_review`     | native prompt         | native prompt, else Google Play  | None  |
//! | `is_review_available`| bridge                | bridge, failure = false          | false |
//! | `write_review`       | write-review page     | Google Play                      | None  |
//! | `store_listing`      | App Store listing     | Google Play                      | None  |
//!
//! Native bridge failures on iOS propagate. On Android, channel failures of
//! the prompt fall back to the Play Store and any other bridge failure
//! propagates.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};

use crate::cache::{IdentityCache, IdentityCacheTrait};
use crate::config::ReviewConfig;
use crate::errors::Result;
use crate::models::{AppIdentity, NativePromptResult, PlatformKind, ReviewOutcome};
use crate::provider::{
    HostPlatform, HttpLookupClient, PackageInfoProvider, PlatformProbe, ReviewBridge,
    StoreLookupClient, UrlLauncher,
};
use crate::resolver::StoreIdResolver;
use crate::strategy::UrlStrategy;

/// The host capabilities the orchestrator is built from.
#[derive(Clone)]
pub struct ReviewHost {
    pub platform: Arc<dyn PlatformProbe>,
    pub bridge: Arc<dyn ReviewBridge>,
    pub launcher: Arc<dyn UrlLauncher>,
    pub package_info: Arc<dyn PackageInfoProvider>,
    /// Lookup transport. `None` uses reqwest with the configured timeout.
    pub lookup: Option<Arc<dyn StoreLookupClient>>,
}

impl ReviewHost {
    /// Host with the process platform and the HTTP lookup client.
    pub fn new(
        bridge: Arc<dyn ReviewBridge>,
        launcher: Arc<dyn UrlLauncher>,
        package_info: Arc<dyn PackageInfoProvider>,
    ) -> Self {
        Self {
            platform: Arc::new(HostPlatform),
            bridge,
            launcher,
            package_info,
            lookup: None,
        }
    }

    pub fn with_platform(mut self, platform: Arc<dyn PlatformProbe>) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_lookup(mut self, lookup: Arc<dyn StoreLookupClient>) -> Self {
        self.lookup = Some(lookup);
        self
    }
}

pub struct ReviewOrchestrator {
    platform: Arc<dyn PlatformProbe>,
    bridge: Arc<dyn ReviewBridge>,
    cache: Arc<dyn IdentityCacheTrait>,
    resolver: Arc<StoreIdResolver>,
    strategy: UrlStrategy,
    review_delay: Duration,
}

impl ReviewOrchestrator {
    /// Create an orchestrator with its own identity cache.
    pub fn new(config: ReviewConfig, host: ReviewHost) -> Self {
        let cache = Arc::new(IdentityCache::new(host.package_info.clone()));
        Self::with_cache(config, host, cache)
    }

    /// Create an orchestrator over an existing identity cache.
    pub fn with_cache(
        config: ReviewConfig,
        host: ReviewHost,
        cache: Arc<dyn IdentityCacheTrait>,
    ) -> Self {
        let review_delay = config.review_delay;
        let lookup: Arc<dyn StoreLookupClient> = match host.lookup {
            Some(lookup) => lookup,
            None => Arc::new(HttpLookupClient::with_timeout(config.lookup_timeout)),
        };
        let resolver = Arc::new(StoreIdResolver::new(lookup, cache.clone(), config));
        let strategy = UrlStrategy::new(host.launcher, resolver.clone(), cache.clone());

        Self {
            platform: host.platform,
            bridge: host.bridge,
            cache,
            resolver,
            strategy,
            review_delay,
        }
    }

    /// Ask the bridge for the native prompt and classify the answer.
    async fn native_prompt(&self, platform: PlatformKind) -> Result<NativePromptResult> {
        match platform {
            PlatformKind::Ios => {
                let message = self.bridge.request_review().await?;
                Ok(NativePromptResult::Presented(message))
            }
            PlatformKind::Android => match self.bridge.request_review().await {
                Ok(message) => Ok(NativePromptResult::Presented(message)),
                Err(e) if e.is_channel_failure() => Ok(NativePromptResult::Failed(e)),
                Err(e) => Err(e.into()),
            },
            PlatformKind::Other => Ok(NativePromptResult::Unsupported),
        }
    }

    /// Request the in-app review prompt.
    ///
    /// Returns `None` on platforms without a store.
    pub async fn request_review(&self) -> Result<Option<ReviewOutcome>> {
        let platform = self.platform.platform();
        debug!("Requesting review on {}", platform);

        match self.native_prompt(platform).await? {
            NativePromptResult::Presented(message) => {
                Ok(Some(ReviewOutcome::NativePrompt(message)))
            }
            NativePromptResult::Failed(e) => {
                warn!("Native review prompt failed ({}), opening Google Play", e);
                self.strategy.open_google_play(None).await.map(Some)
            }
            NativePromptResult::Unsupported => Ok(None),
        }
    }

    /// Run [`request_review`](Self::request_review) after `delay`
    /// (default from the configuration) without waiting for it.
    ///
    /// Needs a running tokio runtime; without one nothing is scheduled.
    pub fn request_review_delayed(self: &Arc<Self>, delay: Option<Duration>) {
        let delay = delay.unwrap_or(self.review_delay);

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                error!("Cannot schedule delayed review request: {}", e);
                return;
            }
        };

        let this = Arc::clone(self);
        handle.spawn(async move {
            tokio::time::sleep(delay).await;
            match this.request_review().await {
                Ok(Some(outcome)) => info!("Delayed review request: {}", outcome),
                Ok(None) => debug!("Delayed review request: unsupported platform"),
                Err(e) => warn!("Delayed review request failed: {}", e),
            }
        });
        debug!("Review request scheduled in {:?}", delay);
    }

    /// Whether the native review prompt can be shown.
    ///
    /// Bridge failures propagate on iOS and read as `false` on Android.
    pub async fn is_review_available(&self) -> Result<bool> {
        match self.platform.platform() {
            PlatformKind::Ios => Ok(self.bridge.is_review_prompt_supported().await?),
            PlatformKind::Android => match self.bridge.is_review_prompt_supported().await {
                Ok(supported) => Ok(supported),
                Err(e) => {
                    warn!("Review availability check failed: {}", e);
                    Ok(false)
                }
            },
            PlatformKind::Other => Ok(false),
        }
    }

    /// Open the store page focused on writing a review.
    pub async fn write_review(&self) -> Result<Option<ReviewOutcome>> {
        match self.platform.platform() {
            PlatformKind::Ios => self.strategy.compose_review_url(None).await.map(Some),
            PlatformKind::Android => self.strategy.open_google_play(None).await.map(Some),
            PlatformKind::Other => Ok(None),
        }
    }

    /// Open the store listing of the app.
    pub async fn store_listing(&self) -> Result<Option<ReviewOutcome>> {
        match self.platform.platform() {
            PlatformKind::Ios => self.strategy.open_app_store(None, None).await.map(Some),
            PlatformKind::Android => self.strategy.open_google_play(None).await.map(Some),
            PlatformKind::Other => Ok(None),
        }
    }

    /// Open the App Store listing regardless of platform.
    pub async fn open_app_store(
        &self,
        app_id: Option<&str>,
        fallback_url: Option<&str>,
    ) -> Result<ReviewOutcome> {
        self.strategy.open_app_store(app_id, fallback_url).await
    }

    /// Open the Google Play listing regardless of platform.
    pub async fn open_google_play(&self, fallback_url: Option<&str>) -> Result<ReviewOutcome> {
        self.strategy.open_google_play(fallback_url).await
    }

    /// Open the write-review page for `app_id`, or the resolved store id.
    pub async fn compose_review(&self, app_id: Option<&str>) -> Result<ReviewOutcome> {
        self.strategy.compose_review_url(app_id).await
    }

    /// Override the lookup country for lookups that have not happened yet.
    /// An empty string clears the override.
    pub fn set_country_code(&self, code: &str) {
        self.cache.set_country_code(code);
    }

    pub fn country_code(&self) -> Option<String> {
        self.resolver.country_code()
    }

    /// App Store numeric id, resolved once and memoized. Empty when not found.
    pub async fn app_store_id(&self) -> Result<String> {
        self.resolver.store_id().await
    }

    pub async fn bundle_id(&self) -> Result<String> {
        self.cache.bundle_id().await
    }

    pub fn identity(&self) -> AppIdentity {
        self.cache.snapshot()
    }
}
