//! CLI for the snip URL shortener.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use snip_core::config;
use snip_core::link_db::LinkDb;

use commands::{run_decode, run_encode, run_interactive, run_list, run_remove, run_serve};

/// Top-level CLI for the snip URL shortener.
#[derive(Debug, Parser)]
#[command(name = "snip")]
#[command(about = "snip: URL and text shortener with an interactive client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the HTTP shortening service.
    Serve {
        /// Listen address (overrides `bind` from config.toml).
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Shorten a URL or piece of text through a running service.
    Encode {
        /// URL or text to shorten.
        value: String,
        /// Service base URL (overrides `[client] server_url`).
        #[arg(long, value_name = "URL")]
        server: Option<String>,
    },

    /// Show the value behind a short URL.
    Decode {
        /// Short URL, bare `host/code` form, or code.
        url: String,
        /// Service base URL (overrides `[client] server_url`).
        #[arg(long, value_name = "URL")]
        server: Option<String>,
    },

    /// Read values from stdin, one per line, and show each short link as it arrives.
    Interactive {
        /// Service base URL (overrides `[client] server_url`).
        #[arg(long, value_name = "URL")]
        server: Option<String>,
    },

    /// List links stored in the local database.
    List,

    /// Remove a link from the local database by its ID.
    Remove {
        /// Link identifier (as shown by `snip list`).
        id: i64,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Serve { bind } => {
                if let Some(bind) = bind {
                    cfg.bind = bind;
                }
                let db = LinkDb::open_default().await?;
                run_serve(db, &cfg).await?;
            }
            CliCommand::Encode { value, server } => {
                override_server(&mut cfg, server);
                run_encode(&cfg.client, &value).await?;
            }
            CliCommand::Decode { url, server } => {
                override_server(&mut cfg, server);
                run_decode(&cfg.client, &url).await?;
            }
            CliCommand::Interactive { server } => {
                override_server(&mut cfg, server);
                run_interactive(&cfg.client).await?;
            }
            CliCommand::List => {
                let db = LinkDb::open_default().await?;
                run_list(&db).await?;
            }
            CliCommand::Remove { id } => {
                let db = LinkDb::open_default().await?;
                run_remove(&db, id).await?;
            }
        }

        Ok(())
    }
}

fn override_server(cfg: &mut config::SnipConfig, server: Option<String>) {
    if let Some(server) = server {
        cfg.client.server_url = server;
    }
}

#[cfg(test)]
mod tests;
