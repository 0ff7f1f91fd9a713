//! `snip interactive` – each stdin line is typed into the field and submitted with Enter.
//!
//! Results are drawn on stdout; a newer line supersedes a request still in flight.

use anyhow::Result;
use snip_core::client::EncodeClient;
use snip_core::config::ClientConfig;
use snip_core::input::Key;
use snip_core::presenter::ResultElement;
use snip_core::session::{EncodeSession, UiEvent};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedSender;

/// Result line on the terminal. Clicking is shown as the URL to open.
struct TerminalElement {
    base_url: String,
    text: String,
    target: String,
}

impl ResultElement for TerminalElement {
    fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_click_target(&mut self, target: &str) {
        self.target = target.to_string();
    }

    fn reset_transform(&mut self) {}

    fn play_slide_in(&mut self) {
        println!("-> {}  (open {}{})", self.text, self.base_url, self.target);
    }
}

pub async fn run_interactive(cfg: &ClientConfig) -> Result<()> {
    let client = EncodeClient::from_config(cfg);
    let element = TerminalElement {
        base_url: client.base_url().to_string(),
        text: String::new(),
        target: String::new(),
    };
    let base_url = client.base_url().to_string();
    let (mut session, mut rx) = EncodeSession::new(Arc::new(client), element);
    tokio::spawn(feed_stdin(session.sender()));
    session.run(&mut rx).await;

    match session.presenter().state() {
        Some(state) if state.revealed => println!("Last link: {}{}", base_url, state.target_url),
        _ => println!("No link produced."),
    }
    Ok(())
}

async fn feed_stdin(tx: UnboundedSender<UiEvent>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if tx.send(UiEvent::Replace(line)).is_err()
                    || tx.send(UiEvent::Key(Key::Enter)).is_err()
                {
                    return;
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("reading stdin: {}", e);
                break;
            }
        }
    }
    let _ = tx.send(UiEvent::Shutdown);
}
