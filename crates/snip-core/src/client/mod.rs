//! Client for the encode/decode endpoints.
//!
//! Canonical contract: `GET /encode?value=<url-encoded text>` answers
//! `{"url": "<full short url>"}`; the `url` string is used verbatim as the
//! result identifier.

mod encode;
mod error;
mod gate;
mod types;

pub use encode::EncodeClient;
pub use error::{EncodeError, ErrorKind};
pub use gate::{RequestGate, Ticket};
pub use types::{DecodeResponse, EncodeRequest, EncodeResponse};

use std::sync::atomic::AtomicBool;

/// Something that can turn a value into an [`EncodeResponse`].
///
/// Blocking; callers run it under `spawn_blocking`. Implementations should
/// give up with [`EncodeError::Aborted`] once `abort` is set.
pub trait Encoder: Send + Sync + 'static {
    fn encode(&self, value: &str, abort: &AtomicBool) -> Result<EncodeResponse, EncodeError>;
}
