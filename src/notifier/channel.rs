//! Notification channel abstraction.

use async_trait::async_trait;
use reqwest::Client;

use super::error::ChannelError;

/// Response body length kept in errors and logs.
pub(crate) const MAX_BODY_LOG: usize = 200;

/// One outbound notification transport.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether credentials and endpoint are present.
    ///
    /// Unconfigured channels are skipped without any network I/O.
    fn is_configured(&self) -> bool;

    /// Deliver `message`. Only HTTP 200 counts as success.
    async fn send(&self, message: &str) -> Result<(), ChannelError>;
}

/// Build the HTTP client shared by all channels.
///
/// No request timeout is set; a hanging request only stalls the tail that
/// triggered it.
///
/// # Errors
///
/// Returns an error if the TLS backend cannot be initialised.
pub fn build_http_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Check for 200 OK, turning anything else into [`ChannelError::Status`].
pub(crate) async fn expect_ok(
    channel: &str,
    response: reqwest::Response,
) -> Result<(), ChannelError> {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body = truncate_body(&body);

    tracing::debug!(channel, status = status.as_u16(), body = %body, "Channel response");

    if status == reqwest::StatusCode::OK {
        Ok(())
    } else {
        Err(ChannelError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_BODY_LOG {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX_BODY_LOG).collect();
        format!("{cut}...")
    }
}
