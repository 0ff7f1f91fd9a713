//! `snip encode <value>` – shorten through a running service.

use anyhow::{Context, Result};
use snip_core::client::EncodeClient;
use snip_core::config::ClientConfig;

pub async fn run_encode(cfg: &ClientConfig, value: &str) -> Result<()> {
    let client = EncodeClient::from_config(cfg);
    let response = client
        .encode(value)
        .await
        .with_context(|| format!("encoding via {}", client.base_url()))?;
    println!("{}", response.identifier());
    Ok(())
}
