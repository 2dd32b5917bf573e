//! Notification error types.

/// Failure of a single channel attempt.
#[derive(thiserror::Error, Debug)]
pub enum ChannelError {
    /// Required credentials or endpoint are not configured.
    #[error("{0} is not configured")]
    Unavailable(String),

    /// Endpoint URL could not be built.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure (connect, TLS, body).
    #[error("Request failed: {0}")]
    Request(String),

    /// Remote answered with something other than 200 OK.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

impl From<reqwest::Error> for ChannelError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL can carry the bot token; keep it out of logs.
        Self::Request(err.without_url().to_string())
    }
}

/// Every channel in the chain was unavailable or failed.
#[derive(thiserror::Error, Debug)]
pub enum DispatchError {
    /// No channel is configured.
    #[error("No notification channel configured")]
    NoChannelAvailable,

    /// The last attempted channel failed and no earlier one succeeded.
    #[error("All notification channels failed, last was {channel}: {source}")]
    AllChannelsFailed {
        channel: String,
        source: ChannelError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ChannelError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");
    }

    #[test]
    fn test_unavailable_display() {
        let err = ChannelError::Unavailable("telegram".to_string());
        assert_eq!(err.to_string(), "telegram is not configured");
    }

    #[test]
    fn test_all_failed_names_channel() {
        let err = DispatchError::AllChannelsFailed {
            channel: "telegram".to_string(),
            source: ChannelError::Request("connection refused".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "All notification channels failed, last was telegram: Request failed: connection refused"
        );
    }
}
