//! Domain models for review requests and application identity.

mod identity;
mod outcome;
mod platform;

pub use identity::{AppIdentity, PackageInfo};
pub use outcome::{NativePromptResult, ReviewOutcome};
pub use platform::PlatformKind;
