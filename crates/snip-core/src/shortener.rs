//! Short-link service: turns values into short URLs and short URLs back into values.
//!
//! Codes are the link row id in base 62 (optionally passed through the
//! passphrase obfuscator). A short URL is `{protocol}://{host}/{code}`; the
//! bare `{host}/{code}` form is accepted wherever a short URL is expected.

use serde::Serialize;

use crate::charset::UrlCharset;
use crate::codec::Codec;
use crate::config::SnipConfig;
use crate::link_db::{LinkDb, LinkId};
use crate::obfuscator::{Obfuscator, ObfuscatorError};

/// Row id 0 never exists; decoding it answers this fixed value instead of "not found".
pub const ZERO_ID_VALUE: &str = "https://en.wikipedia.org/wiki/0#Computer_science";
/// Click count reported for [`ZERO_ID_VALUE`].
pub const ZERO_ID_CLICKS: i64 = -1;

#[derive(Debug, thiserror::Error)]
pub enum ShortenError {
    #[error("No URL or text provided")]
    EmptyValue,
    #[error("No URL provided")]
    NoUrl,
    #[error("Not a valid URL")]
    InvalidUrl,
    #[error("No such shortened URL found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Result of decoding a short URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded {
    pub value: String,
    pub clicks: i64,
}

/// What `/determine` should do with a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Determined {
    /// Looks like one of our short URLs.
    Decode(String),
    /// Anything else is a value to shorten.
    Encode(String),
}

/// Where following a short link leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    /// The stored value is an http(s) URL.
    External(String),
    /// The stored value is plain text; show it through `/decode?url=<code>`.
    Decode(String),
}

#[derive(Clone)]
pub struct Shortener {
    db: LinkDb,
    codec: Codec,
    obfuscator: Option<Obfuscator>,
    domain_name: String,
    short_prefix: String,
}

impl Shortener {
    pub fn new(
        db: LinkDb,
        protocol: &str,
        host: &str,
        passphrase: Option<&str>,
    ) -> Result<Self, ObfuscatorError> {
        let charset = UrlCharset::alphanumeric();
        let obfuscator = passphrase
            .map(|p| Obfuscator::new(charset.clone(), p))
            .transpose()?;
        Ok(Self {
            db,
            codec: Codec::new(charset),
            obfuscator,
            domain_name: format!("{protocol}://{host}/"),
            short_prefix: format!("{host}/"),
        })
    }

    pub fn from_config(db: LinkDb, cfg: &SnipConfig) -> anyhow::Result<Self> {
        Ok(Self::new(db, &cfg.protocol, &cfg.host, cfg.passphrase.as_deref())?)
    }

    pub fn db(&self) -> &LinkDb {
        &self.db
    }

    /// Public prefix of issued short URLs, e.g. `https://snip.example/`.
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn code_for(&self, id: LinkId) -> String {
        let code = self.codec.encode(id.max(0) as u64);
        match &self.obfuscator {
            // Codec output is always inside the charset.
            Some(o) => o.transform(&code).unwrap_or(code),
            None => code,
        }
    }

    fn id_for(&self, code: &str) -> Result<u64, ShortenError> {
        let plain = match &self.obfuscator {
            Some(o) => o.restore(code).map_err(|_| ShortenError::InvalidUrl)?,
            None => code.to_string(),
        };
        self.codec.decode(&plain).map_err(|_| ShortenError::InvalidUrl)
    }

    /// Store `value` and return its short URL.
    pub async fn encode(&self, value: &str) -> Result<String, ShortenError> {
        if value.is_empty() {
            return Err(ShortenError::EmptyValue);
        }
        let id = self.db.insert_value(value).await?;
        let short = format!("{}{}", self.domain_name, self.code_for(id));
        tracing::debug!(id, %short, "value shortened");
        Ok(short)
    }

    /// Reduce a short URL (full, bare-host or code-only form) to its code.
    pub fn strip_prefix<'a>(&self, url: &'a str) -> &'a str {
        url.strip_prefix(self.domain_name.as_str())
            .or_else(|| url.strip_prefix(self.short_prefix.as_str()))
            .unwrap_or(url)
    }

    /// Look up the value behind a short URL without counting a click.
    pub async fn decode(&self, url: &str) -> Result<Decoded, ShortenError> {
        let code = self.strip_prefix(url);
        if code.is_empty() {
            return Err(ShortenError::NoUrl);
        }
        let id = self.id_for(code)?;
        if id == 0 {
            return Ok(Decoded {
                value: ZERO_ID_VALUE.to_string(),
                clicks: ZERO_ID_CLICKS,
            });
        }
        let id = LinkId::try_from(id).map_err(|_| ShortenError::NotFound)?;
        match self.db.get_value(id).await? {
            Some(record) => Ok(Decoded {
                value: record.value,
                clicks: record.clicks,
            }),
            None => Err(ShortenError::NotFound),
        }
    }

    pub fn determine(&self, query: &str) -> Determined {
        if query.starts_with(self.domain_name.as_str())
            || query.starts_with(self.short_prefix.as_str())
        {
            Determined::Decode(query.to_string())
        } else {
            Determined::Encode(query.to_string())
        }
    }

    /// Resolve a short link for a visitor: counts the click and says where to send them.
    pub async fn follow(&self, url: &str) -> Result<Redirect, ShortenError> {
        let decoded = self.decode(url).await?;
        let code = self.strip_prefix(url).to_string();
        if let Ok(id) = LinkId::try_from(self.id_for(&code)?) {
            self.db.increment_clicks(id).await?;
        }
        if is_http_url(&decoded.value) {
            Ok(Redirect::External(decoded.value))
        } else {
            Ok(Redirect::Decode(code))
        }
    }
}

/// True for absolute `http`/`https` URLs with a host.
pub fn is_http_url(value: &str) -> bool {
    match url::Url::parse(value) {
        Ok(u) => matches!(u.scheme(), "http" | "https") && u.host().is_some(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link_db::open_memory;

    async fn shortener(passphrase: Option<&str>) -> Shortener {
        let db = open_memory().await.unwrap();
        Shortener::new(db, "https", "vite.lol", passphrase).unwrap()
    }

    #[tokio::test]
    async fn encode_then_decode() {
        let s = shortener(None).await;
        let short = s.encode("https://www.wikipedia.org/").await.unwrap();
        assert_eq!(short, "https://vite.lol/1");
        let decoded = s.decode(&short).await.unwrap();
        assert_eq!(decoded.value, "https://www.wikipedia.org/");
        assert_eq!(decoded.clicks, 0);
    }

    #[tokio::test]
    async fn empty_inputs_rejected() {
        let s = shortener(None).await;
        assert!(matches!(s.encode("").await, Err(ShortenError::EmptyValue)));
        assert!(matches!(s.decode("").await, Err(ShortenError::NoUrl)));
        assert!(matches!(
            s.decode("https://vite.lol/").await,
            Err(ShortenError::NoUrl)
        ));
    }

    #[tokio::test]
    async fn zero_code_answers_fixed_value() {
        let s = shortener(None).await;
        let decoded = s.decode("https://vite.lol/0").await.unwrap();
        assert_eq!(decoded.value, ZERO_ID_VALUE);
        assert_eq!(decoded.clicks, -1);
    }

    #[tokio::test]
    async fn invalid_and_unknown_codes() {
        let s = shortener(None).await;
        assert!(matches!(s.decode("$").await, Err(ShortenError::InvalidUrl)));
        assert!(matches!(
            s.decode("https://vite.lol/1").await,
            Err(ShortenError::NotFound)
        ));
        assert!(matches!(
            s.decode("ZZZZZZZZZZZZZZZ").await,
            Err(ShortenError::InvalidUrl)
        ));
    }

    #[tokio::test]
    async fn bare_host_and_code_forms_decode() {
        let s = shortener(None).await;
        s.encode("https://www.wikipedia.org/").await.unwrap();
        for form in ["vite.lol/1", "https://vite.lol/1", "1"] {
            assert_eq!(
                s.decode(form).await.unwrap().value,
                "https://www.wikipedia.org/"
            );
        }
    }

    #[tokio::test]
    async fn determine_by_prefix() {
        let s = shortener(None).await;
        assert_eq!(
            s.determine("https://www.wikipedia.org/"),
            Determined::Encode("https://www.wikipedia.org/".into())
        );
        assert_eq!(
            s.determine("vite.lol/1"),
            Determined::Decode("vite.lol/1".into())
        );
        assert_eq!(
            s.determine("https://vite.lol/1"),
            Determined::Decode("https://vite.lol/1".into())
        );
    }

    #[tokio::test]
    async fn follow_counts_clicks_and_picks_target() {
        let s = shortener(None).await;
        let url = s.encode("https://www.wikipedia.org/").await.unwrap();
        let text = s.encode("Hello World!").await.unwrap();

        assert_eq!(
            s.follow(&url).await.unwrap(),
            Redirect::External("https://www.wikipedia.org/".into())
        );
        assert_eq!(s.follow(&text).await.unwrap(), Redirect::Decode("2".into()));
        assert_eq!(s.decode(&url).await.unwrap().clicks, 1);
        assert_eq!(s.decode(&text).await.unwrap().clicks, 1);
    }

    #[tokio::test]
    async fn passphrase_obfuscates_codes() {
        let s = shortener(Some("snippy")).await;
        let short = s.encode("https://www.wikipedia.org/").await.unwrap();
        let code = s.strip_prefix(&short).to_string();
        assert_ne!(code, "1");
        assert_eq!(
            s.decode(&short).await.unwrap().value,
            "https://www.wikipedia.org/"
        );
        // The plain code no longer resolves to row 1.
        assert!(!matches!(s.decode("1").await, Ok(d) if d.value == "https://www.wikipedia.org/"));
    }

    #[test]
    fn http_url_detection() {
        assert!(is_http_url("https://www.wikipedia.org/"));
        assert!(is_http_url("http://example.com/a?b=c"));
        assert!(!is_http_url("Hello World!"));
        assert!(!is_http_url("ftp://example.com/file"));
        assert!(!is_http_url("example.com"));
    }
}
