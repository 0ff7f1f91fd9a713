//! Real snip service on an ephemeral localhost port, backed by a temp database.

use snip_core::link_db::LinkDb;
use snip_core::server::{serve_with_listener, ServerState};
use snip_core::shortener::Shortener;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct TestServer {
    /// `http://127.0.0.1:<port>`, also the host of issued short URLs.
    pub base_url: String,
    pub db: LinkDb,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
    _state_dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        let state_dir = tempfile::tempdir().unwrap();
        let db = LinkDb::open_at(state_dir.path().join("links.db"))
            .await
            .unwrap();

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shortener = Shortener::new(db.clone(), "http", &addr.to_string(), None).unwrap();
        let state = Arc::new(ServerState {
            shortener,
            static_dir: None,
        });

        let (tx, rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                let _ = rx.await;
            };
            serve_with_listener(listener, state, shutdown).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            db,
            shutdown: Some(tx),
            handle: Some(handle),
            _state_dir: state_dir,
        }
    }

    /// Stop serving and wait for the listener to close.
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}
