//! Host capability abstractions and their concrete adapters.
//!
//! This module contains:
//! - The capability traits the review logic depends on
//! - `ChannelReviewBridge`, which maps method-channel replies to `ReviewBridge`
//! - `HttpLookupClient`, the reqwest transport for the store lookup
//! - `HostPlatform`, which reads the OS of the running process

mod channel;
mod http;
mod platform;
mod traits;

pub use channel::{ChannelReviewBridge, METHOD_IS_SUPPORTED, METHOD_REQUEST_REVIEW};
pub use http::HttpLookupClient;
pub use platform::{FixedPlatform, HostPlatform};
pub use traits::{
    MethodChannel, PackageInfoProvider, PlatformProbe, ReviewBridge, StoreLookupClient,
    UrlLauncher,
};
