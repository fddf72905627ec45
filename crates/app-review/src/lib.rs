//! App Review Crate
//!
//! Requests the in-app store review prompt, or sends the user to the app's
//! store listing, choosing the path per host platform and falling back when
//! the preferred path is unavailable.
//!
//! # Architecture
//!
//! ```text
//! +----------------------+
//! |  ReviewOrchestrator  |  (platform dispatch, native prompt, fallbacks)
//! +----------------------+
//!        |          |
//!        v          v
//! +-------------+  +------------------+
//! | ReviewBridge|  |   UrlStrategy    |  (deep link -> fallback -> web)
//! +-------------+  +------------------+
//!                      |          |
//!                      v          v
//!          +-----------------+  +-------------+
//!          | StoreIdResolver |  | UrlLauncher |
//!          +-----------------+  +-------------+
//!                  |
//!                  v
//!          +-----------------+
//!          |  IdentityCache  |  (bundle id, store id, country override)
//!          +-----------------+
//! ```
//!
//! The host provides the capabilities: the native review bridge, URL
//! dispatch, package metadata and the platform probe. The store id lookup
//! uses reqwest by default.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use app_review::{ReviewConfig, ReviewHost, ReviewOrchestrator};
//!
//! let host = ReviewHost::new(bridge, launcher, package_info);
//! let reviews = Arc::new(ReviewOrchestrator::new(ReviewConfig::from_env(), host));
//!
//! reviews.set_country_code("jp");
//! if let Some(outcome) = reviews.store_listing().await? {
//!     log::info!("{}", outcome);
//! }
//! ```

pub mod cache;
pub mod config;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod provider;
pub mod resolver;
pub mod strategy;

pub use cache::{IdentityCache, IdentityCacheTrait};
pub use config::ReviewConfig;
pub use errors::{BridgeError, LookupError, Result, ReviewError};
pub use models::{AppIdentity, NativePromptResult, PackageInfo, PlatformKind, ReviewOutcome};
pub use orchestrator::{ReviewHost, ReviewOrchestrator};
pub use provider::{
    ChannelReviewBridge, FixedPlatform, HostPlatform, HttpLookupClient, MethodChannel,
    PackageInfoProvider, PlatformProbe, ReviewBridge, StoreLookupClient, UrlLauncher,
};
pub use resolver::StoreIdResolver;
pub use strategy::UrlStrategy;
