use std::sync::Arc;

use readaloud_bus::{BusHandle, Envelope, Message, MessageKind, SenderId, Subscription};
use readaloud_phrase::{PhraseQueue, DEFAULT_MAX_PHRASE_CHARS};
use readaloud_tts::{EngineEvent, PreferenceStore, SpeakOptions, SpeechEngine};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::report::ErrorReporter;
use crate::state::SessionState;

/// Local commands from the controller context's own UI surface
/// (toolbar click, keyboard shortcut, stop control).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerCommand {
    /// Ask the observer to capture and forward the current selection.
    ReadSelection,
    /// Stop the current session, if any.
    Stop,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Maximum utterance length handed to the engine, in characters.
    pub max_phrase_chars: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_phrase_chars: DEFAULT_MAX_PHRASE_CHARS,
        }
    }
}

/// The speech-session state machine.
///
/// Exactly one instance drives the engine. Phrases are dispatched strictly
/// one at a time: the next is handed to the engine only after the previous
/// one's end event, so spoken output is totally ordered. A new read request
/// while speaking replaces the session (last writer wins).
pub struct SpeechSessionController {
    bus: BusHandle,
    messages: Subscription,
    commands: mpsc::UnboundedReceiver<ControllerCommand>,
    engine: Box<dyn SpeechEngine>,
    engine_events: mpsc::UnboundedReceiver<EngineEvent>,
    prefs: Arc<dyn PreferenceStore>,
    reporter: Arc<dyn ErrorReporter>,
    expected_sender: SenderId,
    max_phrase_chars: usize,
    state: SessionState,
    queue: PhraseQueue,
    options: SpeakOptions,
    /// Index of the utterance currently being voiced, from session start.
    active_utterance: usize,
}

impl SpeechSessionController {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        bus: BusHandle,
        commands: mpsc::UnboundedReceiver<ControllerCommand>,
        engine: Box<dyn SpeechEngine>,
        engine_events: mpsc::UnboundedReceiver<EngineEvent>,
        prefs: Arc<dyn PreferenceStore>,
        reporter: Arc<dyn ErrorReporter>,
        expected_sender: SenderId,
        config: ControllerConfig,
    ) -> Self {
        let messages = bus.subscribe(&[
            MessageKind::ReadRequest,
            MessageKind::RefreshTts,
            MessageKind::GotStartedSpeaking,
            MessageKind::GotEndSpeaking,
            MessageKind::GotFinishedSpeaking,
        ]);
        Self {
            bus,
            messages,
            commands,
            engine,
            engine_events,
            prefs,
            reporter,
            expected_sender,
            max_phrase_chars: config.max_phrase_chars,
            state: SessionState::Idle,
            queue: PhraseQueue::default(),
            options: SpeakOptions::default(),
            active_utterance: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run until the bus, the command feed and the engine-event feed are gone.
    pub async fn run(mut self) {
        info!("speech session controller started");
        loop {
            tokio::select! {
                maybe = self.messages.recv() => {
                    match maybe {
                        Some(envelope) => self.handle_message(envelope).await,
                        None => break,
                    }
                }
                maybe = self.engine_events.recv() => {
                    match maybe {
                        Some(event) => self.handle_engine_event(event).await,
                        None => break,
                    }
                }
                maybe = self.commands.recv() => {
                    match maybe {
                        Some(command) => self.handle_command(command).await,
                        None => break,
                    }
                }
            }
        }
        info!("speech session controller stopped");
    }

    async fn handle_message(&mut self, envelope: Envelope) {
        if !envelope.is_from(&self.expected_sender) {
            debug!(sender = %envelope.sender, kind = %envelope.kind(), "discarding foreign message");
            return;
        }
        match envelope.message {
            Message::ReadRequest { text } => self.start_session(text).await,
            Message::RefreshTts => self.refresh_engine().await,
            ack @ (Message::GotStartedSpeaking
            | Message::GotEndSpeaking
            | Message::GotFinishedSpeaking) => {
                debug!(kind = %ack.kind(), "observer acknowledged");
            }
            other => debug!(kind = %other.kind(), "unexpected message in controller"),
        }
    }

    async fn handle_command(&mut self, command: ControllerCommand) {
        match command {
            ControllerCommand::ReadSelection => {
                self.bus.publish(Message::SelectedText).await;
            }
            ControllerCommand::Stop => self.stop_session().await,
        }
    }

    async fn handle_engine_event(&mut self, event: EngineEvent) {
        if !self.state.is_active() {
            // Late events from a stopped or replaced session.
            debug!(?event, "ignoring engine event while idle");
            return;
        }
        match event {
            EngineEvent::Start => {
                // Re-announced on every phrase; consumers tolerate repeats.
                self.bus.publish(Message::StartedSpeaking).await;
            }
            EngineEvent::End => match self.state {
                SessionState::Speaking => self.dispatch_next().await,
                SessionState::Draining => {
                    info!(utterances = self.active_utterance, "session ended naturally");
                    self.transition(SessionState::Idle);
                    self.bus.publish(Message::EndedSpeaking).await;
                }
                SessionState::Idle => unreachable!("guarded by is_active"),
            },
            EngineEvent::Interrupted => {
                debug!("utterance interrupted");
                self.queue.clear();
                self.transition(SessionState::Idle);
                self.bus.publish(Message::FinishedSpeaking).await;
            }
            EngineEvent::Error { message } => {
                self.session_error(message.as_deref().unwrap_or("undefined"))
                    .await;
            }
        }
    }

    /// Begin a new session, replacing any active one (last writer wins).
    async fn start_session(&mut self, text: String) {
        if self.state.is_active() {
            debug!("read request while speaking, replacing session");
            self.silence_engine().await;
        }
        self.options = self.prefs.speak_options().await;
        self.queue = PhraseQueue::new(&text, self.max_phrase_chars);
        self.active_utterance = 0;
        if self.queue.is_empty() {
            debug!("read request with no speakable text");
            self.transition(SessionState::Idle);
            return;
        }
        info!(phrases = self.queue.remaining(), "starting speech session");
        self.dispatch_next().await;
    }

    /// Hand the next queued phrase to the engine, or go idle.
    async fn dispatch_next(&mut self) {
        match self.queue.next_phrase() {
            Some(phrase) => {
                self.transition(if self.queue.is_empty() {
                    SessionState::Draining
                } else {
                    SessionState::Speaking
                });
                self.active_utterance += 1;
                debug!(
                    utterance = self.active_utterance,
                    remaining = self.queue.remaining(),
                    "dispatching phrase"
                );
                if let Err(e) = self.engine.speak(&phrase, &self.options).await {
                    self.session_error(&e.to_string()).await;
                }
            }
            None => self.transition(SessionState::Idle),
        }
    }

    /// Explicit user stop. Idempotent: stopping while idle publishes nothing.
    async fn stop_session(&mut self) {
        if !self.state.is_active() {
            debug!("stop requested while idle");
            return;
        }
        self.silence_engine().await;
        self.transition(SessionState::Idle);
        self.bus.publish(Message::FinishedSpeaking).await;
    }

    /// Fatal-to-the-session engine failure: stop, report, return to idle.
    async fn session_error(&mut self, message: &str) {
        self.silence_engine().await;
        self.transition(SessionState::Idle);
        self.bus.publish(Message::FinishedSpeaking).await;
        self.reporter.log_error(&format!("Error: {message}"));
    }

    /// Keep-alive nudge: pause then resume without touching logical state.
    async fn refresh_engine(&mut self) {
        if !self.state.is_active() {
            debug!("ignoring refresh while idle");
            return;
        }
        if let Err(e) = self.engine.pause().await {
            warn!(error = %e, "keep-alive pause failed");
            return;
        }
        if let Err(e) = self.engine.resume().await {
            warn!(error = %e, "keep-alive resume failed");
            return;
        }
        // Defined synchronization point: consult the engine's own view once
        // per refresh instead of polling it continuously.
        if !self.engine.is_speaking().await {
            debug!("engine reports idle after refresh");
        }
    }

    /// Stop the engine and discard everything queued, swallowing the
    /// engine's reactive events so they cannot masquerade as lifecycle
    /// transitions of the next session.
    async fn silence_engine(&mut self) {
        if let Err(e) = self.engine.stop().await {
            warn!(error = %e, "engine stop failed");
        }
        self.queue.clear();
        while self.engine_events.try_recv().is_ok() {}
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!(from = %self.state, to = %next, "session state transition");
            self.state = next;
        }
    }
}
