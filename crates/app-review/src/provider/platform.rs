use crate::models::PlatformKind;

use super::traits::PlatformProbe;

/// Reads the platform of the running process on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostPlatform;

impl PlatformProbe for HostPlatform {
    fn platform(&self) -> PlatformKind {
        PlatformKind::current()
    }
}

/// Always reports the same platform. Useful for hosts that know their
/// platform up front, and for tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedPlatform(pub PlatformKind);

impl PlatformProbe for FixedPlatform {
    fn platform(&self) -> PlatformKind {
        self.0
    }
}
