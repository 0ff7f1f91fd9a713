//! `snip serve` – run the HTTP service until Ctrl-C.

use anyhow::Result;
use snip_core::config::SnipConfig;
use snip_core::link_db::LinkDb;
use snip_core::server::{self, ServerState};
use snip_core::shortener::Shortener;
use std::sync::Arc;

pub async fn run_serve(db: LinkDb, cfg: &SnipConfig) -> Result<()> {
    let shortener = Shortener::from_config(db, cfg)?;
    println!("Serving {} on {}", shortener.domain_name(), cfg.bind);
    let state = Arc::new(ServerState {
        shortener,
        static_dir: cfg.static_dir.clone(),
    });
    server::serve(&cfg.bind, state).await
}
