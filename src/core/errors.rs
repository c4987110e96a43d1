use serde_json::Value;
use thiserror::Error;

/// Boxed error handed back by a `NetworkProvider` implementation
pub type TransportSource = Box<dyn std::error::Error + Send + Sync>;

/// Longest raw body kept on a `MalformedResponse`
pub const MAX_BODY_LEN: usize = 2048;

#[derive(Error, Debug)]
pub enum OstError {
    /// An operation ran before credentials and a transport were supplied
    #[error("Client not initialized: {0}")]
    Uninitialized(String),

    #[error("Client already initialized; credentials cannot be replaced")]
    AlreadyInitialized,

    #[error("Transport error: {0}")]
    Transport(#[source] TransportSource),

    /// Well-formed envelope whose `success` flag was absent or false
    #[error("Backend rejected {endpoint}: {body}")]
    Backend { endpoint: String, body: Value },

    /// Response that could not be read as the expected envelope or entity
    ///
    /// `body` holds the raw response text, clipped to [`MAX_BODY_LEN`] bytes.
    #[error("Malformed response from {endpoint} (expected {expected}): {reason}")]
    MalformedResponse {
        endpoint: String,
        expected: String,
        reason: String,
        body: String,
    },

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] crate::core::config::ConfigError),
}

impl OstError {
    pub fn transport(source: impl Into<TransportSource>) -> Self {
        Self::Transport(source.into())
    }

    pub fn malformed(
        endpoint: impl Into<String>,
        expected: impl Into<String>,
        reason: impl Into<String>,
        raw_body: &str,
    ) -> Self {
        Self::MalformedResponse {
            endpoint: endpoint.into(),
            expected: expected.into(),
            reason: reason.into(),
            body: clip_body(raw_body),
        }
    }

    /// Raw backend payload for `Backend` failures
    pub fn backend_body(&self) -> Option<&Value> {
        match self {
            Self::Backend { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_uninitialized(&self) -> bool {
        matches!(self, Self::Uninitialized(_))
    }
}

fn clip_body(raw: &str) -> String {
    if raw.len() <= MAX_BODY_LEN {
        return raw.to_string();
    }
    let mut end = MAX_BODY_LEN;
    while !raw.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &raw[..end])
}

impl From<reqwest::Error> for OstError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}
