//! Store URL construction and dispatch.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::cache::IdentityCacheTrait;
use crate::errors::Result;
use crate::models::ReviewOutcome;
use crate::provider::UrlLauncher;
use crate::resolver::StoreIdResolver;

const APP_STORE_WEB_BASE: &str = "https://itunes.apple.com/app/id";
const APP_STORE_APP_SCHEME: &str = "itms-apps://";
const HTTPS_SCHEME: &str = "https://";
const PLAY_STORE_MARKET_BASE: &str = "market://details?id=";
const PLAY_STORE_WEB_BASE: &str = "https://play.google.com/store/apps/details?id=";

/// `https://itunes.apple.com/app/id<id>`
pub fn app_store_url(app_id: &str) -> String {
    format!("{}{}", APP_STORE_WEB_BASE, app_id)
}

/// Scheme-less write-review location: `itunes.apple.com/app/id<id>?mt=8&action=write-review`
pub fn write_review_location(app_id: &str) -> String {
    format!("itunes.apple.com/app/id{}?mt=8&action=write-review", app_id)
}

/// `market://details?id=<bundle>`
pub fn play_store_market_url(bundle_id: &str) -> String {
    format!("{}{}", PLAY_STORE_MARKET_BASE, bundle_id)
}

/// `https://play.google.com/store/apps/details?id=<bundle>`
pub fn play_store_web_url(bundle_id: &str) -> String {
    format!("{}{}", PLAY_STORE_WEB_BASE, bundle_id)
}

/// Opens store pages, preferring deep links and falling back to web URLs.
pub struct UrlStrategy {
    launcher: Arc<dyn UrlLauncher>,
    resolver: Arc<StoreIdResolver>,
    cache: Arc<dyn IdentityCacheTrait>,
}

impl UrlStrategy {
    pub fn new(
        launcher: Arc<dyn UrlLauncher>,
        resolver: Arc<StoreIdResolver>,
        cache: Arc<dyn IdentityCacheTrait>,
    ) -> Self {
        Self {
            launcher,
            resolver,
            cache,
        }
    }

    async fn app_id_or_resolve(&self, app_id: Option<&str>) -> Result<String> {
        match app_id {
            Some(id) => Ok(id.to_string()),
            None => self.resolver.store_id().await,
        }
    }

    /// Open the App Store listing.
    ///
    /// Uses `app_id` when given, otherwise the resolved store id. Without an
    /// id the fallback URL is opened; without either nothing is opened.
    pub async fn open_app_store(
        &self,
        app_id: Option<&str>,
        fallback_url: Option<&str>,
    ) -> Result<ReviewOutcome> {
        let app_id = self.app_id_or_resolve(app_id).await?;

        if !app_id.is_empty() {
            let url = app_store_url(&app_id);
            self.launcher.open(&url).await?;
            return Ok(ReviewOutcome::AppStoreDirect { url });
        }

        if let Some(fallback) = fallback_url {
            self.launcher.open(fallback).await?;
            return Ok(ReviewOutcome::AppStoreFallback {
                url: fallback.to_string(),
            });
        }

        info!("No App Store id and no fallback URL, nothing opened");
        Ok(ReviewOutcome::AppStoreNotFound)
    }

    /// Open the Google Play listing.
    ///
    /// Order: `market://` deep link, then the fallback URL, then the Play
    /// Store web page.
    pub async fn open_google_play(&self, fallback_url: Option<&str>) -> Result<ReviewOutcome> {
        let bundle_id = self.cache.bundle_id().await?;
        let market_url = play_store_market_url(&bundle_id);

        if self.launcher.can_open(&market_url).await {
            self.launcher.open(&market_url).await?;
            return Ok(ReviewOutcome::PlayStoreDirect { url: market_url });
        }

        debug!("Cannot open {}, trying web alternatives", market_url);

        if let Some(fallback) = fallback_url {
            self.launcher.open(fallback).await?;
            return Ok(ReviewOutcome::PlayStoreFallback {
                url: fallback.to_string(),
            });
        }

        let url = play_store_web_url(&bundle_id);
        self.launcher.open(&url).await?;
        Ok(ReviewOutcome::PlayStoreWeb { url })
    }

    /// Open the App Store in write-review mode.
    ///
    /// Prefers the `itms-apps://` scheme and falls back to `https://`. One of
    /// the two is always dispatched, even when no store id could be resolved.
    pub async fn compose_review_url(&self, app_id: Option<&str>) -> Result<ReviewOutcome> {
        let app_id = self.app_id_or_resolve(app_id).await?;
        if app_id.is_empty() {
            warn!("Opening write-review page without an App Store id");
        }

        let location = write_review_location(&app_id);
        let app_url = format!("{}{}", APP_STORE_APP_SCHEME, location);

        let url = if self.launcher.can_open(&app_url).await {
            app_url
        } else {
            format!("{}{}", HTTPS_SCHEME, location)
        };

        self.launcher.open(&url).await?;
        Ok(ReviewOutcome::WriteReview { url })
    }
}
