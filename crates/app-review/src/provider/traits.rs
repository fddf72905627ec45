//! Host capability traits consumed by the review logic.
//!
//! Each trait is a thin seam over something the host platform owns: the
//! native store-review API, URL dispatch, package metadata and the remote
//! lookup transport. Tests substitute their own implementations.

use async_trait::async_trait;

use crate::errors::{BridgeError, LookupError, Result};
use crate::models::{PackageInfo, PlatformKind};

/// Native store-review capability.
#[async_trait]
pub trait ReviewBridge: Send + Sync {
    /// Whether the host can show the in-app review prompt.
    async fn is_review_prompt_supported(&self) -> std::result::Result<bool, BridgeError>;

    /// Ask the host to show the in-app review prompt.
    ///
    /// Returns the host's diagnostic message, if it sent one.
    async fn request_review(&self) -> std::result::Result<Option<String>, BridgeError>;
}

/// Method-channel style RPC to the host platform.
///
/// Replies are optional strings; errors are already classified.
#[async_trait]
pub trait MethodChannel: Send + Sync {
    async fn invoke(&self, method: &str) -> std::result::Result<Option<String>, BridgeError>;
}

/// URL dispatch.
///
/// `open` only reports whether the URL could be dispatched, not whether the
/// destination loaded.
#[async_trait]
pub trait UrlLauncher: Send + Sync {
    async fn can_open(&self, url: &str) -> bool;

    async fn open(&self, url: &str) -> Result<()>;
}

/// Package metadata of the running app.
#[async_trait]
pub trait PackageInfoProvider: Send + Sync {
    async fn package_info(&self) -> Result<PackageInfo>;
}

/// Reports the platform the process is running on.
pub trait PlatformProbe: Send + Sync {
    fn platform(&self) -> PlatformKind;
}

/// Transport for the store metadata lookup.
#[async_trait]
pub trait StoreLookupClient: Send + Sync {
    /// GET the URL and return the response body.
    async fn fetch(&self, url: &str) -> std::result::Result<String, LookupError>;
}
