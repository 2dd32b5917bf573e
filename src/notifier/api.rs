//! Primary HTTP notification API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::ApiConfig;

use super::channel::{expect_ok, NotificationChannel};
use super::error::ChannelError;

/// Request body for `POST {base}/message`.
#[derive(Debug, Serialize)]
struct MessageRequest<'a> {
    token: &'a str,
    message: &'a str,
}

/// Channel posting to the primary notification API.
#[derive(Debug, Clone)]
pub struct PrimaryApiChannel {
    client: Client,
    base_url: String,
    token: String,
}

impl PrimaryApiChannel {
    pub const NAME: &'static str = "api";

    #[must_use]
    pub fn new(client: Client, base_url: String, token: String) -> Self {
        Self {
            client,
            base_url,
            token,
        }
    }

    #[must_use]
    pub fn from_config(client: Client, config: &ApiConfig) -> Self {
        Self::new(client, config.base_url.trim().to_string(), config.token.trim().to_string())
    }

    /// Full endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/message", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl NotificationChannel for PrimaryApiChannel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.token.is_empty()
    }

    async fn send(&self, message: &str) -> Result<(), ChannelError> {
        if !self.is_configured() {
            return Err(ChannelError::Unavailable(Self::NAME.to_string()));
        }

        let url = self.endpoint();
        tracing::debug!(url = %url, "POST notification");

        let response = self
            .client
            .post(&url)
            .json(&MessageRequest {
                token: &self.token,
                message,
            })
            .send()
            .await?;

        expect_ok(Self::NAME, response).await
    }
}
