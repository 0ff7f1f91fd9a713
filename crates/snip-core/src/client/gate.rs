//! Request supersession: only the newest encode request may update the UI.
//!
//! Every submission gets a generation number and an abort token. Issuing a
//! new ticket raises the previous ticket's token, so its transfer stops
//! early, and completions carrying an older generation are rejected.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Handle for one submitted request.
#[derive(Debug, Clone)]
pub struct Ticket {
    pub generation: u64,
    pub abort: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
pub struct RequestGate {
    latest: AtomicU64,
    in_flight: Mutex<Option<Arc<AtomicBool>>>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding (and aborting) any in-flight one.
    pub fn issue(&self) -> Ticket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let abort = Arc::new(AtomicBool::new(false));
        let previous = self
            .in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(Arc::clone(&abort));
        if let Some(previous) = previous {
            previous.store(true, Ordering::Relaxed);
        }
        Ticket { generation, abort }
    }

    /// True if no newer ticket has been issued since `generation`.
    pub fn is_current(&self, generation: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == generation
    }

    /// Mark the current request as done. Stale generations are ignored.
    pub fn finish(&self, generation: u64) {
        if self.is_current(generation) {
            self.in_flight
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .take();
        }
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}
