//! Telegram Bot API channel.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::TelegramConfig;

use super::channel::{expect_ok, NotificationChannel};
use super::error::ChannelError;

/// Parse mode matching the markup produced by `TradeOffer::notification_text`.
pub const PARSE_MODE: &str = "MarkdownV2";

/// Channel calling `sendMessage` on the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramChannel {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
    configured: bool,
}

impl TelegramChannel {
    pub const NAME: &'static str = "telegram";

    #[must_use]
    pub fn from_config(client: Client, config: &TelegramConfig) -> Self {
        Self {
            client,
            api_base: config.api_base.trim().to_string(),
            bot_token: config.bot_token.trim().to_string(),
            chat_id: config.chat_id.trim().to_string(),
            configured: config.is_configured(),
        }
    }

    /// Build the `sendMessage` URL with the message in the query string.
    ///
    /// # Errors
    ///
    /// Returns `ChannelError::InvalidUrl` if the API base is not a valid URL.
    pub fn send_message_url(&self, message: &str) -> Result<Url, ChannelError> {
        let base = format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        );
        Url::parse_with_params(
            &base,
            &[
                ("chat_id", self.chat_id.as_str()),
                ("text", message),
                ("parse_mode", PARSE_MODE),
            ],
        )
        .map_err(|e| ChannelError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    async fn send(&self, message: &str) -> Result<(), ChannelError> {
        if !self.is_configured() {
            return Err(ChannelError::Unavailable(Self::NAME.to_string()));
        }

        let url = self.send_message_url(message)?;
        tracing::debug!(chat_id = %self.chat_id, "GET sendMessage");

        let response = self.client.get(url).send().await?;
        expect_ok(Self::NAME, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> TelegramConfig {
        TelegramConfig {
            bot_token: "123:abc".to_string(),
            chat_id: "42".to_string(),
            api_base: "https://api.telegram.org/".to_string(),
        }
    }

    #[test]
    fn test_send_message_url() {
        let channel = TelegramChannel::from_config(Client::new(), &configured());
        let url = channel.send_message_url("🪙 *150 chaos* Headhunter").unwrap();

        assert_eq!(url.path(), "/bot123:abc/sendMessage");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("chat_id".to_string(), "42".to_string()),
                ("text".to_string(), "🪙 *150 chaos* Headhunter".to_string()),
                ("parse_mode".to_string(), "MarkdownV2".to_string()),
            ]
        );
    }

    #[test]
    fn test_placeholder_credentials_unconfigured() {
        let channel = TelegramChannel::from_config(Client::new(), &TelegramConfig::default());
        assert!(!channel.is_configured());
    }

    #[test]
    fn test_invalid_base_url() {
        let config = TelegramConfig {
            api_base: "not a url".to_string(),
            ..configured()
        };
        let channel = TelegramChannel::from_config(Client::new(), &config);
        assert!(matches!(
            channel.send_message_url("x"),
            Err(ChannelError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_send_unconfigured_is_unavailable() {
        let channel = TelegramChannel::from_config(Client::new(), &TelegramConfig::default());
        let result = channel.send("hello").await;
        assert!(matches!(result, Err(ChannelError::Unavailable(_))));
    }
}
