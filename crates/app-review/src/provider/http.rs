//! reqwest transport for the store metadata lookup.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::DEFAULT_LOOKUP_TIMEOUT;
use crate::errors::LookupError;

use super::traits::StoreLookupClient;

/// Plain HTTP GET client for the lookup service.
#[derive(Debug, Clone)]
pub struct HttpLookupClient {
    client: Client,
    timeout: Duration,
}

impl HttpLookupClient {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_LOOKUP_TIMEOUT)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, timeout }
    }
}

impl Default for HttpLookupClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreLookupClient for HttpLookupClient {
    async fn fetch(&self, url: &str) -> Result<String, LookupError> {
        debug!("Store lookup request: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::from_reqwest(e, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| LookupError::from_reqwest(e, self.timeout))
    }
}
