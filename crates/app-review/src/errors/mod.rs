//! Error types for the app review crate.
//!
//! This module provides:
//! - [`ReviewError`]: The main error enum returned by review operations
//! - [`BridgeError`]: Failures raised at the native bridge boundary
//! - [`LookupError`]: Failures of the remote store-id lookup (never surfaced)

use std::time::Duration;

use thiserror::Error;

/// Type alias for Result using [`ReviewError`].
pub type Result<T> = std::result::Result<T, ReviewError>;

/// Errors that can surface from review and store-navigation operations.
#[derive(Error, Debug)]
pub enum ReviewError {
    /// The native bridge failed in a way the caller must see.
    ///
    /// On iOS every bridge failure lands here. On Android only failures that
    /// are not channel failures do; channel failures fall back to the store.
    #[error("Native bridge error: {0}")]
    Bridge(#[from] BridgeError),

    /// Package metadata could not be read from the host.
    #[error("Package metadata unavailable: {0}")]
    Metadata(String),

    /// The host refused or failed to dispatch a URL.
    #[error("Failed to launch {url}: {message}")]
    Launch {
        /// The URL that was being opened
        url: String,
        /// The reason reported by the host
        message: String,
    },

    /// The remote lookup failed. Only returned by the raw lookup client;
    /// the resolver converts these into an empty store id.
    #[error("Store lookup failed: {0}")]
    Lookup(#[from] LookupError),

    /// A configuration value is unusable.
    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),
}

impl ReviewError {
    /// Create a launch error for the given URL.
    pub fn launch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Launch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a metadata error.
    pub fn metadata(message: impl Into<String>) -> Self {
        Self::Metadata(message.into())
    }
}

/// Failures raised by the native capability bridge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// The host platform handled the call and reported an error.
    #[error("Platform error {code}: {message}")]
    Platform {
        /// Platform-specific error code
        code: String,
        /// Human readable message from the host
        message: String,
    },

    /// No native handler is registered for the method.
    #[error("Method not implemented on host: {method}")]
    NotImplemented {
        /// The method that was invoked
        method: String,
    },

    /// The bridge itself misbehaved (bad reply, closed channel, ...).
    #[error("Bridge failure: {0}")]
    Internal(String),
}

impl BridgeError {
    /// Whether the failure came from the host side of the channel.
    ///
    /// Only channel failures are eligible for the Android store fallback;
    /// internal failures always propagate.
    pub fn is_channel_failure(&self) -> bool {
        matches!(self, Self::Platform { .. } | Self::NotImplemented { .. })
    }

    /// Create a platform error.
    pub fn platform(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Platform {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Failures of the remote store metadata lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No response within the lookup timeout.
    #[error("Lookup timed out after {after:?}")]
    Timeout {
        /// The timeout that elapsed
        after: Duration,
    },

    /// The request could not be sent or the body could not be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not the expected JSON document.
    #[error("Malformed lookup response: {0}")]
    Parse(String),
}

impl LookupError {
    /// Classify a reqwest failure from either the send or the body read.
    ///
    /// `timeout` is the client timeout that applied to the request.
    pub fn from_reqwest(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            Self::Timeout { after: timeout }
        } else if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
