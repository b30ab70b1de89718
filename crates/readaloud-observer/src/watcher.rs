use std::sync::Arc;
use std::time::Duration;

use readaloud_bus::{BusHandle, Envelope, Message, MessageKind, SenderId, Subscription};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::debounce::DebounceTimer;
use crate::keepalive::KeepAliveTimer;

/// Timing configuration for the observer context. Tunable without touching
/// the state machine.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Quiet window after the last selection change before capture (ms).
    pub debounce_ms: u64,
    /// Keep-alive refresh period while speech is active (ms).
    pub keepalive_period_ms: u64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            keepalive_period_ms: 5000,
        }
    }
}

/// Access to the hosted document's current text selection.
pub trait SelectionSource: Send + Sync {
    fn current_selection(&self) -> String;
}

/// Observer-context actor: debounces selection changes into read requests,
/// answers capture requests from the controller, and drives the keep-alive
/// timer from speech lifecycle messages.
pub struct SelectionWatcher {
    bus: BusHandle,
    messages: Subscription,
    selection_changes: mpsc::UnboundedReceiver<()>,
    selection: Arc<dyn SelectionSource>,
    debounce: DebounceTimer,
    keepalive: KeepAliveTimer,
    expected_sender: SenderId,
}

impl SelectionWatcher {
    pub fn new(
        bus: BusHandle,
        selection: Arc<dyn SelectionSource>,
        selection_changes: mpsc::UnboundedReceiver<()>,
        expected_sender: SenderId,
        config: ObserverConfig,
    ) -> Self {
        let messages = bus.subscribe(&[
            MessageKind::SelectedText,
            MessageKind::StartedSpeaking,
            MessageKind::EndedSpeaking,
            MessageKind::FinishedSpeaking,
        ]);
        Self {
            bus,
            messages,
            selection_changes,
            selection,
            debounce: DebounceTimer::new(Duration::from_millis(config.debounce_ms)),
            keepalive: KeepAliveTimer::new(Duration::from_millis(config.keepalive_period_ms)),
            expected_sender,
        }
    }

    /// Run until the selection-change feed and the bus are both gone.
    pub async fn run(mut self) {
        info!("selection watcher started");
        loop {
            tokio::select! {
                maybe = self.messages.recv() => {
                    match maybe {
                        Some(envelope) => self.handle_message(envelope).await,
                        None => break,
                    }
                }
                maybe = self.selection_changes.recv() => {
                    match maybe {
                        Some(()) => self.debounce.arm(),
                        None => break,
                    }
                }
                _ = self.debounce.expired() => {
                    self.capture_and_publish().await;
                }
            }
        }
        self.keepalive.stop();
        info!("selection watcher stopped");
    }

    async fn handle_message(&mut self, envelope: Envelope) {
        if !envelope.is_from(&self.expected_sender) {
            debug!(sender = %envelope.sender, kind = %envelope.kind(), "discarding foreign message");
            return;
        }
        match envelope.message {
            Message::SelectedText => {
                // Direct capture request bypasses the debounce window.
                self.debounce.cancel();
                self.capture_and_publish().await;
            }
            Message::StartedSpeaking => {
                self.keepalive.start(self.bus.clone());
                self.bus.publish(Message::GotStartedSpeaking).await;
            }
            Message::EndedSpeaking => {
                self.keepalive.stop();
                self.bus.publish(Message::GotEndSpeaking).await;
            }
            Message::FinishedSpeaking => {
                self.keepalive.stop();
                self.bus.publish(Message::GotFinishedSpeaking).await;
            }
            other => debug!(kind = %other.kind(), "unexpected message in observer"),
        }
    }

    /// Read the current selection and publish a read request for it.
    /// An empty or whitespace-only selection publishes nothing.
    async fn capture_and_publish(&mut self) {
        let selection = self.selection.current_selection();
        let text = selection.trim();
        if text.is_empty() {
            debug!("selection empty, nothing to read");
            return;
        }
        debug!(chars = text.chars().count(), "publishing read request");
        self.bus
            .publish(Message::ReadRequest {
                text: text.to_string(),
            })
            .await;
    }
}
