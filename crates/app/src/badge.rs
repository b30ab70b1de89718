//! Badge counter collaborator
//!
//! Subscribes to the same lifecycle messages as the observer and renders a
//! "currently speaking" indicator. The core never calls it directly; it
//! rides the bus like any other consumer.

use readaloud_bus::{BusHandle, Message, MessageKind, SenderId, Subscription};
use tracing::{debug, info};

/// Rendering surface for the badge text.
pub trait Badge: Send + Sync {
    fn render(&self, text: &str);
}

/// Badge that renders through the log.
#[derive(Debug, Default)]
pub struct TracingBadge;

impl Badge for TracingBadge {
    fn render(&self, text: &str) {
        if text.is_empty() {
            info!("badge cleared");
        } else {
            info!(badge = text, "badge updated");
        }
    }
}

/// Speaking indicator driven by speech lifecycle messages.
///
/// `STARTED_SPEAKING` is re-announced once per dispatched phrase, so repeats
/// while already lit must not accumulate: the badge is a boolean, lit on the
/// first start and cleared when the session ends or finishes.
pub struct BadgeCounter {
    messages: Subscription,
    expected_sender: SenderId,
    badge: Box<dyn Badge>,
    speaking: bool,
}

impl BadgeCounter {
    pub fn new(bus: &BusHandle, expected_sender: SenderId, badge: Box<dyn Badge>) -> Self {
        let messages = bus.subscribe(&[
            MessageKind::StartedSpeaking,
            MessageKind::EndedSpeaking,
            MessageKind::FinishedSpeaking,
        ]);
        Self {
            messages,
            expected_sender,
            badge,
            speaking: false,
        }
    }

    pub async fn run(mut self) {
        while let Some(envelope) = self.messages.recv().await {
            if !envelope.is_from(&self.expected_sender) {
                debug!(sender = %envelope.sender, "discarding foreign lifecycle message");
                continue;
            }
            let speaking = match envelope.message {
                Message::StartedSpeaking => true,
                Message::EndedSpeaking | Message::FinishedSpeaking => false,
                _ => continue,
            };
            if speaking == self.speaking {
                continue;
            }
            self.speaking = speaking;
            self.badge.render(if speaking { "1" } else { "" });
        }
    }
}
