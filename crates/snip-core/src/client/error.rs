//! Encode client errors and their two-way classification.

/// Coarse taxonomy used for logging: did the request fail, or its answer?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Request did not complete (connection, DNS, timeout, worker failure).
    Network,
    /// Response was not usable JSON with a non-empty `url`.
    Parse,
    /// A newer request replaced this one.
    Superseded,
}

#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("request failed: {0}")]
    Network(#[source] curl::Error),
    #[error("server answered HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Http { status: u32, message: Option<String> },
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("response has no url{}", .server_error.as_deref().map(|m| format!(" (server said: {m})")).unwrap_or_default())]
    MissingUrl { server_error: Option<String> },
    #[error("request superseded by a newer one")]
    Aborted,
    #[error("encode worker failed: {0}")]
    Worker(String),
}

impl EncodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EncodeError::Network(_) | EncodeError::Worker(_) => ErrorKind::Network,
            // A non-2xx answer carries no usable `url` either.
            EncodeError::Http { .. } | EncodeError::Parse(_) | EncodeError::MissingUrl { .. } => {
                ErrorKind::Parse
            }
            EncodeError::Aborted => ErrorKind::Superseded,
        }
    }
}

impl From<curl::Error> for EncodeError {
    fn from(e: curl::Error) -> Self {
        if e.is_aborted_by_callback() {
            EncodeError::Aborted
        } else {
            EncodeError::Network(e)
        }
    }
}
