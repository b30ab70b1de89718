use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::message::{Envelope, Message, MessageKind, SenderId};

type Topic = Vec<mpsc::UnboundedSender<Envelope>>;

#[derive(Default)]
struct Registry {
    topics: RwLock<HashMap<MessageKind, Topic>>,
}

/// Shared pub/sub registry connecting the observer and controller contexts.
///
/// The bus itself is transport only: it attaches the publisher's identity,
/// attempts delivery once per subscriber, and forgets the message. Lost or
/// undeliverable messages are logged, never retried.
#[derive(Clone, Default)]
pub struct MessageBus {
    inner: Arc<Registry>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle that publishes under the given identity.
    pub fn handle(&self, id: SenderId) -> BusHandle {
        BusHandle {
            id,
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Per-context view of the bus, carrying that context's sender identity.
#[derive(Clone)]
pub struct BusHandle {
    id: SenderId,
    inner: Arc<Registry>,
}

impl BusHandle {
    pub fn sender_id(&self) -> &SenderId {
        &self.id
    }

    /// Publish fire-and-forget. Resolves once delivery has been attempted to
    /// every subscriber of the message's kind; a subscriber whose context is
    /// gone is logged and skipped. Having no subscriber at all is a silent
    /// success.
    pub async fn publish(&self, message: Message) {
        let kind = message.kind();
        let envelope = Envelope {
            sender: self.id.clone(),
            message,
        };

        let mut topics = self.inner.topics.write();
        let Some(subscribers) = topics.get_mut(&kind) else {
            debug!(%kind, "no subscriber for message");
            return;
        };
        subscribers.retain(|tx| {
            if tx.send(envelope.clone()).is_ok() {
                true
            } else {
                warn!(%kind, "subscriber context gone, dropping message");
                false
            }
        });
    }

    /// Register one receiver under each of the given kinds. For a single
    /// subscription, messages of one kind arrive in publish order; no order
    /// is guaranteed across kinds or across subscriptions.
    pub fn subscribe(&self, kinds: &[MessageKind]) -> Subscription {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut topics = self.inner.topics.write();
        for kind in kinds {
            topics.entry(*kind).or_default().push(tx.clone());
        }
        Subscription { rx }
    }
}

/// Receiving end of a bus subscription.
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<Envelope>,
}

impl Subscription {
    /// Wait for the next envelope. Returns `None` once the bus side is gone.
    pub async fn recv(&mut self) -> Option<Envelope> {
        self.rx.recv().await
    }

    /// Non-blocking receive for drain loops and tests.
    pub fn try_recv(&mut self) -> Option<Envelope> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus_pair() -> (BusHandle, BusHandle) {
        let bus = MessageBus::new();
        let a = bus.handle(SenderId::new("context-a"));
        let b = bus.handle(SenderId::new("context-b"));
        (a, b)
    }

    #[tokio::test]
    async fn publish_without_subscriber_is_silent_success() {
        let (a, _b) = bus_pair();
        a.publish(Message::RefreshTts).await;
    }

    #[tokio::test]
    async fn delivers_with_sender_identity() {
        let (a, b) = bus_pair();
        let mut sub = b.subscribe(&[MessageKind::ReadRequest]);

        a.publish(Message::ReadRequest {
            text: "hello".to_string(),
        })
        .await;

        let env = sub.recv().await.unwrap();
        assert!(env.is_from(a.sender_id()));
        assert_eq!(
            env.message,
            Message::ReadRequest {
                text: "hello".to_string()
            }
        );
    }

    #[tokio::test]
    async fn per_kind_order_matches_publish_order() {
        let (a, b) = bus_pair();
        let mut sub = b.subscribe(&[MessageKind::ReadRequest]);

        for i in 0..10 {
            a.publish(Message::ReadRequest {
                text: format!("chunk {i}"),
            })
            .await;
        }
        for i in 0..10 {
            let env = sub.recv().await.unwrap();
            assert_eq!(
                env.message,
                Message::ReadRequest {
                    text: format!("chunk {i}")
                }
            );
        }
    }

    #[tokio::test]
    async fn subscription_receives_only_registered_kinds() {
        let (a, b) = bus_pair();
        let mut sub = b.subscribe(&[MessageKind::StartedSpeaking, MessageKind::EndedSpeaking]);

        a.publish(Message::RefreshTts).await;
        a.publish(Message::StartedSpeaking).await;

        let env = sub.recv().await.unwrap();
        assert_eq!(env.kind(), MessageKind::StartedSpeaking);
        assert!(sub.try_recv().is_none());
    }

    #[tokio::test]
    async fn dropped_subscriber_does_not_fail_publish() {
        let (a, b) = bus_pair();
        let sub = b.subscribe(&[MessageKind::FinishedSpeaking]);
        drop(sub);

        // First publish prunes the dead subscriber, both succeed.
        a.publish(Message::FinishedSpeaking).await;
        a.publish(Message::FinishedSpeaking).await;

        let mut live = b.subscribe(&[MessageKind::FinishedSpeaking]);
        a.publish(Message::FinishedSpeaking).await;
        assert_eq!(live.recv().await.unwrap().kind(), MessageKind::FinishedSpeaking);
    }
}
