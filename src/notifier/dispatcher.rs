//! Ordered fallback over notification channels.

use reqwest::Client;

use crate::config::NotifierConfig;

use super::api::PrimaryApiChannel;
use super::channel::NotificationChannel;
use super::error::{ChannelError, DispatchError};
use super::telegram::TelegramChannel;

/// Tries each channel in order until one delivers.
///
/// The channel list is fixed at construction and only read afterwards, so a
/// single dispatcher can be shared by every tail task.
pub struct Dispatcher {
    channels: Vec<Box<dyn NotificationChannel>>,
}

impl Dispatcher {
    /// Dispatcher over explicit channels, tried in the given order.
    #[must_use]
    pub fn new(channels: Vec<Box<dyn NotificationChannel>>) -> Self {
        Self { channels }
    }

    /// Primary API first, Telegram second.
    #[must_use]
    pub fn from_config(config: &NotifierConfig, client: Client) -> Self {
        Self::new(vec![
            Box::new(PrimaryApiChannel::from_config(client.clone(), &config.api)),
            Box::new(TelegramChannel::from_config(client, &config.telegram)),
        ])
    }

    /// Channel names in attempt order.
    #[must_use]
    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    /// Whether any channel is configured at all.
    #[must_use]
    pub fn has_available_channel(&self) -> bool {
        self.channels.iter().any(|c| c.is_configured())
    }

    /// Deliver `message` through the first channel that accepts it.
    ///
    /// Unconfigured channels are skipped without network I/O. Failed
    /// attempts are logged and the next channel is tried. There is no retry
    /// beyond this single pass.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::NoChannelAvailable`] if nothing is
    /// configured, or [`DispatchError::AllChannelsFailed`] carrying the last
    /// attempted channel's failure.
    pub async fn dispatch(&self, message: &str) -> Result<(), DispatchError> {
        let mut last_failure: Option<(String, ChannelError)> = None;

        for channel in &self.channels {
            let name = channel.name();
            if !channel.is_configured() {
                tracing::debug!(channel = name, "Channel not configured, skipping");
                continue;
            }

            tracing::info!(channel = name, "Sending notification");
            match channel.send(message).await {
                Ok(()) => {
                    tracing::info!(channel = name, "Notification delivered");
                    return Ok(());
                }
                Err(ChannelError::Unavailable(_)) => {
                    tracing::debug!(channel = name, "Channel became unavailable, skipping");
                }
                Err(e) => {
                    tracing::warn!(channel = name, error = %e, "Notification attempt failed");
                    last_failure = Some((name.to_string(), e));
                }
            }
        }

        match last_failure {
            Some((channel, source)) => Err(DispatchError::AllChannelsFailed { channel, source }),
            None => Err(DispatchError::NoChannelAvailable),
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("channels", &self.channel_names())
            .finish()
    }
}
