//! Blocking HTTP calls to the snip service over libcurl.
//!
//! Runs in the current thread; async callers use [`EncodeClient::encode`],
//! which moves the transfer onto `spawn_blocking`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use url::form_urlencoded;

use super::error::EncodeError;
use super::types::{DecodeResponse, EncodeRequest, EncodeResponse};
use super::Encoder;
use crate::config::ClientConfig;

#[derive(Debug, Clone)]
pub struct EncodeClient {
    base_url: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl EncodeClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&ClientConfig {
            server_url: base_url.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn from_config(cfg: &ClientConfig) -> Self {
        Self {
            base_url: cfg.server_url.trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Duration::from_secs(cfg.timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn encode_endpoint(&self, request: &EncodeRequest) -> String {
        format!("{}/encode?{}", self.base_url, request.query_string())
    }

    pub fn decode_endpoint(&self, short_url: &str) -> String {
        let query: String = form_urlencoded::Serializer::new(String::new())
            .append_pair("url", short_url)
            .finish();
        format!("{}/decode?{}", self.base_url, query)
    }

    /// Absolute URL a click on a revealed result leads to (`{base}/{identifier}`).
    pub fn navigation_url(&self, target_path: &str) -> String {
        format!("{}{}", self.base_url, target_path)
    }

    /// GET `url`, returning the body of a 2xx answer.
    fn get(&self, url: &str, abort: Option<&AtomicBool>) -> Result<Vec<u8>, EncodeError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;
        if abort.is_some() {
            easy.progress(true)?;
        }

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            if let Some(abort) = abort {
                // Returning false makes libcurl stop with "aborted by callback".
                transfer.progress_function(|_, _, _, _| !abort.load(Ordering::Relaxed))?;
            }
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            let message = serde_json::from_slice::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string));
            return Err(EncodeError::Http {
                status: code,
                message,
            });
        }
        Ok(body)
    }

    /// Shorten `value`. Blocking.
    pub fn encode_blocking(
        &self,
        value: &str,
        abort: Option<&AtomicBool>,
    ) -> Result<EncodeResponse, EncodeError> {
        let endpoint = self.encode_endpoint(&EncodeRequest::new(value));
        tracing::debug!(%endpoint, "encode request");
        let body = self.get(&endpoint, abort)?;
        EncodeResponse::from_body(&body)
    }

    /// Look up the value behind a short URL. Blocking.
    pub fn decode_blocking(&self, short_url: &str) -> Result<DecodeResponse, EncodeError> {
        let endpoint = self.decode_endpoint(short_url);
        tracing::debug!(%endpoint, "decode request");
        let body = self.get(&endpoint, None)?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Shorten `value` without blocking the async runtime.
    pub async fn encode(&self, value: &str) -> Result<EncodeResponse, EncodeError> {
        let client = self.clone();
        let value = value.to_string();
        tokio::task::spawn_blocking(move || client.encode_blocking(&value, None))
            .await
            .map_err(|e| EncodeError::Worker(e.to_string()))?
    }

    /// Async wrapper around [`EncodeClient::decode_blocking`].
    pub async fn decode(&self, short_url: &str) -> Result<DecodeResponse, EncodeError> {
        let client = self.clone();
        let short_url = short_url.to_string();
        tokio::task::spawn_blocking(move || client.decode_blocking(&short_url))
            .await
            .map_err(|e| EncodeError::Worker(e.to_string()))?
    }
}

impl Encoder for EncodeClient {
    fn encode(&self, value: &str, abort: &AtomicBool) -> Result<EncodeResponse, EncodeError> {
        self.encode_blocking(value, Some(abort))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Instant;

    #[test]
    fn endpoints_escape_values_and_trim_base() {
        let c = EncodeClient::new("http://127.0.0.1:8000/");
        assert_eq!(c.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            c.encode_endpoint(&EncodeRequest::new("example.com")),
            "http://127.0.0.1:8000/encode?value=example.com"
        );
        assert_eq!(
            c.encode_endpoint(&EncodeRequest::new("a b&c")),
            "http://127.0.0.1:8000/encode?value=a+b%26c"
        );
        assert_eq!(
            c.decode_endpoint("https://vite.lol/1"),
            "http://127.0.0.1:8000/decode?url=https%3A%2F%2Fvite.lol%2F1"
        );
        assert_eq!(
            c.navigation_url("/https://vite.lol/1"),
            "http://127.0.0.1:8000/https://vite.lol/1"
        );
    }

    #[test]
    fn unreachable_server_is_network_error() {
        // Port 9 (discard) on localhost is essentially never served.
        let c = EncodeClient::from_config(&ClientConfig {
            server_url: "http://127.0.0.1:9".to_string(),
            connect_timeout_secs: 2,
            timeout_secs: 2,
        });
        let err = c.encode_blocking("example.com", None).unwrap_err();
        assert_eq!(err.kind(), super::super::ErrorKind::Network);
    }

    #[test]
    fn raised_abort_flag_stops_the_transfer() {
        // Accepts the connection and never answers, so only the flag can end the request.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let held: Vec<_> = listener.incoming().take(1).collect();
            std::thread::sleep(Duration::from_secs(10));
            drop(held);
        });

        let c = EncodeClient::from_config(&ClientConfig {
            server_url: format!("http://{addr}"),
            connect_timeout_secs: 2,
            timeout_secs: 8,
        });
        let abort = Arc::new(AtomicBool::new(false));
        let raiser = Arc::clone(&abort);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(300));
            raiser.store(true, Ordering::Relaxed);
        });

        let started = Instant::now();
        let err = c.encode_blocking("example.com", Some(&*abort)).unwrap_err();
        assert!(matches!(err, EncodeError::Aborted), "{err:?}");
        assert_eq!(err.kind(), super::super::ErrorKind::Superseded);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn unset_abort_flag_lets_the_request_run() {
        let c = EncodeClient::from_config(&ClientConfig {
            server_url: "http://127.0.0.1:9".to_string(),
            connect_timeout_secs: 2,
            timeout_secs: 2,
        });
        let abort = AtomicBool::new(false);
        let err = c.encode_blocking("example.com", Some(&abort)).unwrap_err();
        assert!(matches!(err, EncodeError::Network(_)), "{err:?}");
    }
}
