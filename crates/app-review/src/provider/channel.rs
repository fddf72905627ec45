//! Adapter from a method channel to the `ReviewBridge` capability.

use async_trait::async_trait;
use log::debug;

use crate::errors::BridgeError;

use super::traits::{MethodChannel, ReviewBridge};

/// Channel method answering whether the review prompt is available.
pub const METHOD_IS_SUPPORTED: &str = "isReviewPromptSupported";

/// Channel method that requests the review prompt.
pub const METHOD_REQUEST_REVIEW: &str = "requestReview";

/// Sentinel reply meaning "supported".
const SUPPORTED_SENTINEL: &str = "1";

/// `ReviewBridge` backed by a method channel.
pub struct ChannelReviewBridge<C> {
    channel: C,
}

impl<C: MethodChannel> ChannelReviewBridge<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl<C: MethodChannel> ReviewBridge for ChannelReviewBridge<C> {
    async fn is_review_prompt_supported(&self) -> Result<bool, BridgeError> {
        let reply = self.channel.invoke(METHOD_IS_SUPPORTED).await?;
        debug!("{} replied {:?}", METHOD_IS_SUPPORTED, reply);
        Ok(reply.as_deref() == Some(SUPPORTED_SENTINEL))
    }

    async fn request_review(&self) -> Result<Option<String>, BridgeError> {
        self.channel.invoke(METHOD_REQUEST_REVIEW).await
    }
}
