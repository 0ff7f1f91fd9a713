//! `snip decode <url>` – look up a short URL without counting a click.

use anyhow::{Context, Result};
use snip_core::client::EncodeClient;
use snip_core::config::ClientConfig;

pub async fn run_decode(cfg: &ClientConfig, url: &str) -> Result<()> {
    let client = EncodeClient::from_config(cfg);
    let decoded = client
        .decode(url)
        .await
        .with_context(|| format!("decoding {url} via {}", client.base_url()))?;
    println!("{}", decoded.value);
    println!("clicks: {}", decoded.clicks);
    Ok(())
}
