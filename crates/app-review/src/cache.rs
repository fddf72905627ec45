//! In-memory identity cache.
//!
//! Holds the memoized bundle identifier, the resolved store numeric id and
//! the caller's country override. One instance is created by the host and
//! shared by the resolver and the orchestrator; it lives as long as they do.
//!
//! The store id follows a "read, fetch, write" pattern with no mutual
//! exclusion across the fetch. Concurrent first-time resolutions may both hit
//! the network and the last writer wins; the values are identical so only
//! bandwidth is lost.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use log::{debug, warn};
use tokio::sync::OnceCell;

use crate::errors::{Result, ReviewError};
use crate::models::AppIdentity;
use crate::provider::PackageInfoProvider;

/// Access to the memoized application identity.
#[async_trait]
pub trait IdentityCacheTrait: Send + Sync {
    /// Bundle identifier of the running app.
    ///
    /// Fetched from the package metadata provider on first success and never
    /// again afterwards. Failures are not cached.
    async fn bundle_id(&self) -> Result<String>;

    /// `None` means no lookup has completed yet. `Some("")` is a cached "not found".
    fn cached_store_id(&self) -> Option<String>;

    /// Store the store id. Concurrent writers race; the last one wins.
    fn set_cached_store_id(&self, value: String);

    fn country_code(&self) -> Option<String>;

    /// Set the country override. An empty string clears it.
    fn set_country_code(&self, code: &str);

    fn snapshot(&self) -> AppIdentity;
}

pub struct IdentityCache {
    package_info: Arc<dyn PackageInfoProvider>,
    bundle_id: OnceCell<String>,
    store_id: RwLock<Option<String>>,
    country_code: RwLock<Option<String>>,
}

impl IdentityCache {
    pub fn new(package_info: Arc<dyn PackageInfoProvider>) -> Self {
        Self {
            package_info,
            bundle_id: OnceCell::new(),
            store_id: RwLock::new(None),
            country_code: RwLock::new(None),
        }
    }

    /// Lock helpers recover from poison: the guarded values are plain strings
    /// that are always left in a valid state.
    fn read_store_id(&self) -> RwLockReadGuard<'_, Option<String>> {
        self.store_id.read().unwrap_or_else(|poisoned| {
            warn!("Store id lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_store_id(&self) -> RwLockWriteGuard<'_, Option<String>> {
        self.store_id.write().unwrap_or_else(|poisoned| {
            warn!("Store id lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn read_country(&self) -> RwLockReadGuard<'_, Option<String>> {
        self.country_code.read().unwrap_or_else(|poisoned| {
            warn!("Country code lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn write_country(&self) -> RwLockWriteGuard<'_, Option<String>> {
        self.country_code.write().unwrap_or_else(|poisoned| {
            warn!("Country code lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl IdentityCacheTrait for IdentityCache {
    async fn bundle_id(&self) -> Result<String> {
        let bundle_id = self
            .bundle_id
            .get_or_try_init(|| async {
                let info = self.package_info.package_info().await?;
                debug!("Resolved bundle id: {}", info.package_id);
                Ok::<_, ReviewError>(info.package_id)
            })
            .await?;
        Ok(bundle_id.clone())
    }

    fn cached_store_id(&self) -> Option<String> {
        self.read_store_id().clone()
    }

    fn set_cached_store_id(&self, value: String) {
        *self.write_store_id() = Some(value);
    }

    fn country_code(&self) -> Option<String> {
        self.read_country().clone()
    }

    fn set_country_code(&self, code: &str) {
        let mut country = self.write_country();
        *country = if code.is_empty() {
            None
        } else {
            Some(code.to_string())
        };
    }

    fn snapshot(&self) -> AppIdentity {
        AppIdentity {
            bundle_id: self.bundle_id.get().cloned(),
            store_numeric_id: self.cached_store_id(),
            country_code: self.country_code(),
        }
    }
}
