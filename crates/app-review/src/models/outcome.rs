//! Results of review and store-navigation requests.

use std::fmt;

use crate::errors::BridgeError;

/// Which path a review or store request took.
///
/// `Display` renders the human-readable diagnostic line; use the helper
/// methods when a machine-checkable answer is needed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// The native in-app prompt was requested. Carries the host's message, if any.
    NativePrompt(Option<String>),
    /// The App Store listing was opened from the resolved store id.
    AppStoreDirect { url: String },
    /// No store id was found; the caller's fallback URL was opened.
    AppStoreFallback { url: String },
    /// No store id and no fallback. Nothing was opened.
    AppStoreNotFound,
    /// The App Store was opened in write-review mode.
    WriteReview { url: String },
    /// Google Play was opened through the `market://` scheme.
    PlayStoreDirect { url: String },
    /// The marketplace scheme was unavailable; the caller's fallback URL was opened.
    PlayStoreFallback { url: String },
    /// The marketplace scheme was unavailable; the Play Store web page was opened.
    PlayStoreWeb { url: String },
}

impl ReviewOutcome {
    /// The URL that was dispatched, if any.
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::AppStoreDirect { url }
            | Self::AppStoreFallback { url }
            | Self::WriteReview { url }
            | Self::PlayStoreDirect { url }
            | Self::PlayStoreFallback { url }
            | Self::PlayStoreWeb { url } => Some(url),
            Self::NativePrompt(_) | Self::AppStoreNotFound => None,
        }
    }

    /// Whether no store id and no fallback were available, so nothing was opened.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AppStoreNotFound)
    }

    /// Whether a caller-supplied fallback URL was used.
    pub fn is_fallback(&self) -> bool {
        matches!(
            self,
            Self::AppStoreFallback { .. } | Self::PlayStoreFallback { .. }
        )
    }
}

impl fmt::Display for ReviewOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NativePrompt(Some(message)) => write!(f, "{}", message),
            Self::NativePrompt(None) => write!(f, "Requested native review prompt"),
            Self::AppStoreDirect { url } => write!(f, "Launched App Store Directly: {}", url),
            Self::AppStoreFallback { url } => {
                write!(f, "Launched App Store via Fallback: {}", url)
            }
            Self::AppStoreNotFound => write!(f, "Not found in App Store"),
            Self::WriteReview { url } => write!(f, "Launched App Store Write Review: {}", url),
            Self::PlayStoreDirect { url } => write!(f, "Launched Google Play Directly: {}", url),
            Self::PlayStoreFallback { url } => {
                write!(f, "Launched Google Play via Fallback: {}", url)
            }
            Self::PlayStoreWeb { url } => write!(f, "Launched Google Play: {}", url),
        }
    }
}

/// Result of asking the native bridge for a review prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NativePromptResult {
    /// The bridge accepted the request.
    Presented(Option<String>),
    /// The bridge was asked and failed with a channel failure.
    Failed(BridgeError),
    /// The platform has no native prompt.
    Unsupported,
}
