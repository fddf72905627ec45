//! Store identity resolution.
//!
//! The bundle id comes from the host's package metadata and is memoized by
//! [`IdentityCache`](crate::cache::IdentityCache). The App Store numeric id
//! needs a remote lookup, which [`StoreIdResolver`] performs and memoizes
//! through the same cache.

mod store_id;

pub use store_id::StoreIdResolver;
