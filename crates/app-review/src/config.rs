//! Runtime configuration for review requests.

use std::time::Duration;

use log::warn;

use crate::errors::{Result, ReviewError};

/// Default base of the store metadata lookup service.
pub const DEFAULT_LOOKUP_BASE_URL: &str = "http://itunes.apple.com";

/// Hard timeout for a single store id lookup.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Delay used by `request_review_delayed` when none is given.
pub const DEFAULT_REVIEW_DELAY: Duration = Duration::from_secs(5 * 60);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewConfig {
    /// Country used for lookups when neither the call nor the cache provides one.
    pub country_code: Option<String>,
    /// Scheme and host of the lookup service, without a trailing slash.
    pub lookup_base_url: String,
    pub lookup_timeout: Duration,
    pub review_delay: Duration,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            country_code: None,
            lookup_base_url: DEFAULT_LOOKUP_BASE_URL.to_string(),
            lookup_timeout: DEFAULT_LOOKUP_TIMEOUT,
            review_delay: DEFAULT_REVIEW_DELAY,
        }
    }
}

impl ReviewConfig {
    /// Build a configuration from `APP_REVIEW_*` environment variables.
    ///
    /// Unset variables keep their defaults. Unparseable numbers are logged and ignored.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let country_code = std::env::var("APP_REVIEW_COUNTRY")
            .ok()
            .filter(|c| !c.is_empty());

        let lookup_base_url = std::env::var("APP_REVIEW_LOOKUP_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.lookup_base_url);

        let config = Self {
            country_code,
            lookup_base_url,
            lookup_timeout: secs_from_env("APP_REVIEW_LOOKUP_TIMEOUT_SECS")
                .unwrap_or(defaults.lookup_timeout),
            review_delay: secs_from_env("APP_REVIEW_DELAY_SECS").unwrap_or(defaults.review_delay),
        };

        match config.validate() {
            Ok(()) => config,
            Err(e) => {
                warn!("{}; using default lookup settings", e);
                Self {
                    country_code: config.country_code,
                    review_delay: config.review_delay,
                    ..Self::default()
                }
            }
        }
    }

    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.country_code = if code.is_empty() { None } else { Some(code) };
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookup_base_url.is_empty() {
            return Err(ReviewError::InvalidConfig(
                "lookup base URL must not be empty".to_string(),
            ));
        }
        if self.lookup_timeout.is_zero() {
            return Err(ReviewError::InvalidConfig(
                "lookup timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn secs_from_env(key: &str) -> Option<Duration> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(e) => {
            warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}
