//! Host platform classification.

use std::fmt;

/// The operating system family the app is running on.
///
/// Derived at call time and never cached.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum PlatformKind {
    Ios,
    Android,
    Other,
}

impl PlatformKind {
    /// Classify an OS name as reported by `std::env::consts::OS`.
    pub fn from_os_name(os: &str) -> Self {
        match os {
            "ios" => Self::Ios,
            "android" => Self::Android,
            _ => Self::Other,
        }
    }

    /// Platform of the running process.
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Whether this platform has a store review capability at all.
    pub fn is_mobile(self) -> bool {
        matches!(self, Self::Ios | Self::Android)
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ios => write!(f, "iOS"),
            Self::Android => write!(f, "Android"),
            Self::Other => write!(f, "Other"),
        }
    }
}
