//! Application identity as seen by the stores.

use serde::{Deserialize, Serialize};

/// Package metadata reported by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    pub app_name: String,
    /// Bundle identifier (iOS) or application id (Android).
    pub package_id: String,
    pub version: String,
    pub build_number: String,
}

/// Snapshot of the memoized identity values.
///
/// `store_numeric_id` distinguishes `None` (no lookup finished yet) from
/// `Some("")` (lookup finished, nothing found).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppIdentity {
    pub bundle_id: Option<String>,
    pub store_numeric_id: Option<String>,
    pub country_code: Option<String>,
}

impl AppIdentity {
    /// Whether a store lookup has already completed, successfully or not.
    pub fn store_lookup_done(&self) -> bool {
        self.store_numeric_id.is_some()
    }
}
