//! Event loop tying the input field, the encode client and the result presenter together.
//!
//! All presenter state is owned by the loop and only touched from
//! [`EncodeSession::handle`]. Encode requests run on the blocking pool and
//! report back through the same event channel; the [`RequestGate`] makes
//! sure only the newest request's answer reaches the presenter.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::client::{EncodeError, EncodeResponse, Encoder, ErrorKind, RequestGate};
use crate::input::{InputListener, Key, TextBuffer};
use crate::presenter::{ResultElement, ResultPresenter};

/// Answer for one submitted value.
#[derive(Debug)]
pub struct Completion {
    pub generation: u64,
    pub value: String,
    pub result: Result<EncodeResponse, EncodeError>,
}

#[derive(Debug)]
pub enum UiEvent {
    /// A key pressed in the field.
    Key(Key),
    /// Field content replaced wholesale (paste, or a new line of terminal input).
    Replace(String),
    Completed(Completion),
    /// Slide-in finished for the reveal with this sequence number.
    AnimationEnd(u64),
    /// No more input; stop once in-flight requests have answered.
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct EncodeSession<C, R> {
    encoder: Arc<C>,
    listener: InputListener<TextBuffer>,
    presenter: ResultPresenter<R>,
    gate: RequestGate,
    events: UnboundedSender<UiEvent>,
    animation: Duration,
    reveals: u64,
    pending: usize,
    closing: bool,
}

impl<C: Encoder, R: ResultElement> EncodeSession<C, R> {
    pub fn new(encoder: Arc<C>, element: R) -> (Self, UnboundedReceiver<UiEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let session = Self {
            encoder,
            listener: InputListener::new(TextBuffer::new()),
            presenter: ResultPresenter::new(element),
            gate: RequestGate::new(),
            events,
            animation: Duration::ZERO,
            reveals: 0,
            pending: 0,
            closing: false,
        };
        (session, rx)
    }

    /// How long the element's slide-in takes before `AnimationEnd` fires.
    pub fn with_animation(mut self, duration: Duration) -> Self {
        self.animation = duration;
        self
    }

    /// Sender for feeding input events from outside the loop.
    pub fn sender(&self) -> UnboundedSender<UiEvent> {
        self.events.clone()
    }

    pub fn presenter(&self) -> &ResultPresenter<R> {
        &self.presenter
    }

    /// Process events until shutdown completes or every sender is gone.
    pub async fn run(&mut self, rx: &mut UnboundedReceiver<UiEvent>) {
        while let Some(event) = rx.recv().await {
            if self.handle(event) == Flow::Stop {
                break;
            }
        }
    }

    pub fn handle(&mut self, event: UiEvent) -> Flow {
        match event {
            UiEvent::Key(key) => {
                self.listener.field_mut().apply(key);
                if let Some(value) = self.listener.on_key(key) {
                    self.submit(value);
                }
            }
            UiEvent::Replace(text) => self.listener.field_mut().set_text(text),
            UiEvent::Completed(completion) => self.complete(completion),
            UiEvent::AnimationEnd(seq) => {
                if seq == self.reveals {
                    self.presenter.on_animation_end();
                }
            }
            UiEvent::Shutdown => self.closing = true,
        }
        if self.closing && self.pending == 0 {
            Flow::Stop
        } else {
            Flow::Continue
        }
    }

    fn submit(&mut self, value: String) {
        let ticket = self.gate.issue();
        self.pending += 1;
        tracing::debug!(generation = ticket.generation, %value, "encode submitted");

        let encoder = Arc::clone(&self.encoder);
        let tx = self.events.clone();
        tokio::spawn(async move {
            let generation = ticket.generation;
            let input = value.clone();
            let result =
                tokio::task::spawn_blocking(move || encoder.encode(&input, &ticket.abort))
                    .await
                    .unwrap_or_else(|e| Err(EncodeError::Worker(e.to_string())));
            let _ = tx.send(UiEvent::Completed(Completion {
                generation,
                value,
                result,
            }));
        });
    }

    fn complete(&mut self, completion: Completion) {
        self.pending = self.pending.saturating_sub(1);
        let Completion {
            generation,
            value,
            result,
        } = completion;

        if !self.gate.is_current(generation) {
            tracing::debug!(
                generation,
                latest = self.gate.latest(),
                "dropping superseded response"
            );
            return;
        }
        self.gate.finish(generation);

        match result {
            Ok(response) => {
                if self.presenter.reveal(response.identifier()) {
                    self.reveals += 1;
                    self.schedule_animation_end(self.reveals);
                }
            }
            Err(e) if e.kind() == ErrorKind::Superseded => {
                tracing::debug!(generation, "encode aborted");
            }
            Err(e) => {
                // Failures stay invisible to the user; the log is the only trace.
                tracing::error!(%value, kind = ?e.kind(), "encode failed: {}", e);
            }
        }
    }

    fn schedule_animation_end(&self, seq: u64) {
        let tx = self.events.clone();
        let delay = self.animation;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(UiEvent::AnimationEnd(seq));
        });
    }
}
