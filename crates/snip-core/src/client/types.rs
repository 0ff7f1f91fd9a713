//! Wire types of the encode/decode endpoints.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::error::EncodeError;

/// Query parameter carrying the value to shorten.
pub const ENCODE_PARAM: &str = "value";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeRequest {
    pub value: String,
}

impl EncodeRequest {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// `value=<url-encoded value>`.
    pub fn query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .append_pair(ENCODE_PARAM, &self.value)
            .finish()
    }
}

/// Successful encode answer. `url` is guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeResponse {
    url: String,
}

/// What the server may put in a JSON body: a result or an error message.
#[derive(Debug, Deserialize)]
struct RawBody {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl EncodeResponse {
    pub fn new(url: impl Into<String>) -> Result<Self, EncodeError> {
        let url = url.into();
        if url.is_empty() {
            return Err(EncodeError::MissingUrl { server_error: None });
        }
        Ok(Self { url })
    }

    /// Parse a response body; fails unless it is JSON with a non-empty `url` string.
    pub fn from_body(body: &[u8]) -> Result<Self, EncodeError> {
        let raw: RawBody = serde_json::from_slice(body)?;
        match raw.url {
            Some(url) if !url.is_empty() => Ok(Self { url }),
            _ => Err(EncodeError::MissingUrl {
                server_error: raw.error,
            }),
        }
    }

    /// The identifier handed to the result presenter.
    pub fn identifier(&self) -> &str {
        &self.url
    }
}

/// Answer of `GET /decode?url=`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecodeResponse {
    pub value: String,
    pub clicks: i64,
}
