//! Behavioral tests for the selection watcher and its timers.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use readaloud_bus::{BusHandle, Message, MessageBus, MessageKind, SenderId, Subscription};
use readaloud_observer::{ObserverConfig, SelectionSource, SelectionWatcher};
use tokio::sync::mpsc;
use tokio::task::yield_now;

#[derive(Default)]
struct SharedSelection(RwLock<String>);

impl SharedSelection {
    fn set(&self, text: &str) {
        *self.0.write() = text.to_string();
    }
}

impl SelectionSource for SharedSelection {
    fn current_selection(&self) -> String {
        self.0.read().clone()
    }
}

struct Harness {
    controller: BusHandle,
    foreign: BusHandle,
    selection: Arc<SharedSelection>,
    changes: mpsc::UnboundedSender<()>,
}

fn spawn_watcher() -> Harness {
    let bus = MessageBus::new();
    let extension = SenderId::new("readaloud-extension");
    let selection = Arc::new(SharedSelection::default());
    let (changes, changes_rx) = mpsc::unbounded_channel();

    let watcher = SelectionWatcher::new(
        bus.handle(extension.clone()),
        Arc::clone(&selection) as Arc<dyn SelectionSource>,
        changes_rx,
        extension.clone(),
        ObserverConfig::default(),
    );
    tokio::spawn(watcher.run());

    Harness {
        controller: bus.handle(extension),
        foreign: bus.handle(SenderId::new("some-other-extension")),
        selection,
        changes,
    }
}

async fn settle() {
    for _ in 0..10 {
        yield_now().await;
    }
}

fn read_request_sub(h: &Harness) -> Subscription {
    h.controller.subscribe(&[MessageKind::ReadRequest])
}

#[tokio::test(start_paused = true)]
async fn burst_of_selection_changes_yields_one_read_request() {
    let h = spawn_watcher();
    let mut requests = read_request_sub(&h);

    h.selection.set("first draft");
    h.changes.send(()).unwrap();
    settle().await;
    tokio::time::advance(Duration::from_millis(100)).await;

    h.selection.set("second draft");
    h.changes.send(()).unwrap();
    settle().await;
    tokio::time::advance(Duration::from_millis(100)).await;

    h.selection.set("final text");
    h.changes.send(()).unwrap();
    settle().await;

    let env = requests.recv().await.unwrap();
    assert_eq!(
        env.message,
        Message::ReadRequest {
            text: "final text".to_string()
        }
    );

    let extra = tokio::time::timeout(Duration::from_secs(10), requests.recv()).await;
    assert!(extra.is_err(), "a burst must publish exactly once");
}

#[tokio::test(start_paused = true)]
async fn identical_repeated_selections_still_publish_once() {
    let h = spawn_watcher();
    let mut requests = read_request_sub(&h);

    h.selection.set("same text");
    for _ in 0..5 {
        h.changes.send(()).unwrap();
        settle().await;
    }

    let env = requests.recv().await.unwrap();
    assert_eq!(
        env.message,
        Message::ReadRequest {
            text: "same text".to_string()
        }
    );
    let extra = tokio::time::timeout(Duration::from_secs(10), requests.recv()).await;
    assert!(extra.is_err());
}

#[tokio::test(start_paused = true)]
async fn empty_selection_publishes_nothing() {
    let h = spawn_watcher();
    let mut requests = read_request_sub(&h);

    h.selection.set("   \n\t ");
    h.changes.send(()).unwrap();
    settle().await;

    let extra = tokio::time::timeout(Duration::from_secs(10), requests.recv()).await;
    assert!(extra.is_err(), "whitespace-only selection is a silent no-op");
}

#[tokio::test(start_paused = true)]
async fn selected_text_request_bypasses_debounce() {
    let h = spawn_watcher();
    let mut requests = read_request_sub(&h);

    h.selection.set("capture me now");
    h.controller.publish(Message::SelectedText).await;

    // No time advance beyond task scheduling: the capture is immediate.
    let env = requests.recv().await.unwrap();
    assert_eq!(
        env.message,
        Message::ReadRequest {
            text: "capture me now".to_string()
        }
    );
}

#[tokio::test(start_paused = true)]
async fn keepalive_runs_between_started_and_ended() {
    let h = spawn_watcher();
    let mut refreshes = h.controller.subscribe(&[MessageKind::RefreshTts]);
    let mut acks = h.controller.subscribe(&[
        MessageKind::GotStartedSpeaking,
        MessageKind::GotEndSpeaking,
    ]);

    h.controller.publish(Message::StartedSpeaking).await;
    assert_eq!(acks.recv().await.unwrap().kind(), MessageKind::GotStartedSpeaking);

    // At least two refresh periods elapse.
    assert_eq!(refreshes.recv().await.unwrap().kind(), MessageKind::RefreshTts);
    assert_eq!(refreshes.recv().await.unwrap().kind(), MessageKind::RefreshTts);

    h.controller.publish(Message::EndedSpeaking).await;
    assert_eq!(acks.recv().await.unwrap().kind(), MessageKind::GotEndSpeaking);
    while refreshes.try_recv().is_some() {}

    let extra = tokio::time::timeout(Duration::from_secs(30), refreshes.recv()).await;
    assert!(extra.is_err(), "no refresh may follow ENDED_SPEAKING");
}

#[tokio::test(start_paused = true)]
async fn finished_speaking_also_cancels_keepalive() {
    let h = spawn_watcher();
    let mut refreshes = h.controller.subscribe(&[MessageKind::RefreshTts]);
    let mut acks = h.controller.subscribe(&[MessageKind::GotFinishedSpeaking]);

    h.controller.publish(Message::StartedSpeaking).await;
    refreshes.recv().await.unwrap();

    h.controller.publish(Message::FinishedSpeaking).await;
    assert_eq!(
        acks.recv().await.unwrap().kind(),
        MessageKind::GotFinishedSpeaking
    );
    while refreshes.try_recv().is_some() {}

    let extra = tokio::time::timeout(Duration::from_secs(30), refreshes.recv()).await;
    assert!(extra.is_err());
}

#[tokio::test(start_paused = true)]
async fn repeated_started_speaking_never_doubles_refreshes() {
    let h = spawn_watcher();
    let mut refreshes = h.controller.subscribe(&[MessageKind::RefreshTts]);

    // The controller re-announces start on every chunk; the keep-alive must
    // restart idempotently rather than stack intervals.
    h.controller.publish(Message::StartedSpeaking).await;
    h.controller.publish(Message::StartedSpeaking).await;
    h.controller.publish(Message::StartedSpeaking).await;
    settle().await;

    refreshes.recv().await.unwrap();
    let second = tokio::time::timeout(Duration::from_secs(2), refreshes.recv()).await;
    assert!(second.is_err(), "one interval only, one refresh per period");
}

#[tokio::test(start_paused = true)]
async fn foreign_lifecycle_messages_are_discarded() {
    let h = spawn_watcher();
    let mut refreshes = h.controller.subscribe(&[MessageKind::RefreshTts]);
    let mut acks = h
        .controller
        .subscribe(&[MessageKind::GotStartedSpeaking]);
    let mut requests = read_request_sub(&h);

    h.selection.set("secret text");
    h.foreign.publish(Message::StartedSpeaking).await;
    h.foreign.publish(Message::SelectedText).await;
    settle().await;

    assert!(acks.try_recv().is_none(), "no ack for a foreign sender");
    assert!(requests.try_recv().is_none(), "no capture for a foreign sender");
    let refresh = tokio::time::timeout(Duration::from_secs(30), refreshes.recv()).await;
    assert!(refresh.is_err(), "keep-alive must not start for a foreign sender");
}
