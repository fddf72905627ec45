//! Shared host doubles for integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use app_review::{
    BridgeError, FixedPlatform, LookupError, PackageInfo, PackageInfoProvider, PlatformKind,
    ReviewBridge, ReviewConfig, ReviewHost, ReviewOrchestrator, StoreLookupClient, UrlLauncher,
};

pub struct CountingBridge {
    pub reply: Result<Option<String>, BridgeError>,
    pub calls: AtomicUsize,
}

impl CountingBridge {
    pub fn new(reply: Result<Option<String>, BridgeError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReviewBridge for CountingBridge {
    async fn is_review_prompt_supported(&self) -> Result<bool, BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn request_review(&self) -> Result<Option<String>, BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

/// Launcher that refuses the listed schemes and records everything opened.
pub struct RecordingLauncher {
    pub refused_schemes: Vec<&'static str>,
    pub can_open_calls: AtomicUsize,
    pub opened: Mutex<Vec<String>>,
}

impl RecordingLauncher {
    pub fn new(refused_schemes: Vec<&'static str>) -> Self {
        Self {
            refused_schemes,
            can_open_calls: AtomicUsize::new(0),
            opened: Mutex::new(Vec::new()),
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }

    pub fn touched(&self) -> bool {
        self.can_open_calls.load(Ordering::SeqCst) > 0 || !self.opened().is_empty()
    }
}

#[async_trait]
impl UrlLauncher for RecordingLauncher {
    async fn can_open(&self, url: &str) -> bool {
        self.can_open_calls.fetch_add(1, Ordering::SeqCst);
        !self.refused_schemes.iter().any(|s| url.starts_with(s))
    }

    async fn open(&self, url: &str) -> app_review::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub struct StaticPackageInfo(pub String);

#[async_trait]
impl PackageInfoProvider for StaticPackageInfo {
    async fn package_info(&self) -> app_review::Result<PackageInfo> {
        Ok(PackageInfo {
            app_name: "Example".to_string(),
            package_id: self.0.clone(),
            version: "1.0.0".to_string(),
            build_number: "1".to_string(),
        })
    }
}

/// Lookup double answering every request with the same body.
pub struct ScriptedLookup {
    pub body: Result<String, LookupError>,
    pub urls: Mutex<Vec<String>>,
}

impl ScriptedLookup {
    pub fn new(body: &str) -> Self {
        Self {
            body: Ok(body.to_string()),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.urls.lock().unwrap().len()
    }
}

#[async_trait]
impl StoreLookupClient for ScriptedLookup {
    async fn fetch(&self, url: &str) -> Result<String, LookupError> {
        self.urls.lock().unwrap().push(url.to_string());
        tokio::task::yield_now().await;
        self.body.clone()
    }
}

pub struct Harness {
    pub orchestrator: Arc<ReviewOrchestrator>,
    pub bridge: Arc<CountingBridge>,
    pub launcher: Arc<RecordingLauncher>,
    pub lookup: Arc<ScriptedLookup>,
}

pub fn harness(
    platform: PlatformKind,
    bundle_id: &str,
    bridge: CountingBridge,
    launcher: RecordingLauncher,
    lookup: ScriptedLookup,
) -> Harness {
    let bridge = Arc::new(bridge);
    let launcher = Arc::new(launcher);
    let lookup = Arc::new(lookup);

    let host = ReviewHost::new(
        bridge.clone(),
        launcher.clone(),
        Arc::new(StaticPackageInfo(bundle_id.to_string())),
    )
    .with_platform(Arc::new(FixedPlatform(platform)))
    .with_lookup(lookup.clone());

    Harness {
        orchestrator: Arc::new(ReviewOrchestrator::new(ReviewConfig::default(), host)),
        bridge,
        launcher,
        lookup,
    }
}
