//! Speech-engine interface and lifecycle events

use crate::error::TtsResult;
use crate::types::{SpeakOptions, VoiceInfo};
use async_trait::async_trait;

/// Lifecycle events an engine reports while voicing utterances.
///
/// Engines are constructed with a `tokio::sync::mpsc::UnboundedSender` of
/// these and push events as voicing progresses; the session controller owns
/// the receiving end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The engine began voicing the current utterance.
    Start,
    /// The current utterance finished naturally.
    End,
    /// The current utterance was cut off (stop or replacement).
    Interrupted,
    /// The engine failed mid-utterance. The message may be absent.
    Error { message: Option<String> },
}

/// Interface to a platform speech-synthesis engine.
///
/// The engine is a single exclusive resource; exactly one controller drives
/// it. `speak` dispatches one utterance and returns once the request is
/// accepted — completion arrives as [`EngineEvent`]s. Implementations must
/// not emit lifecycle events for `pause`/`resume`, which exist solely as a
/// keep-alive nudge against the platform's idle timeout.
#[async_trait]
pub trait SpeechEngine: Send {
    /// Dispatch one utterance. An `Err` means the engine rejected the
    /// request outright; no events will follow for it.
    async fn speak(&mut self, text: &str, options: &SpeakOptions) -> TtsResult<()>;

    /// Stop any in-flight utterance. Idempotent.
    async fn stop(&mut self) -> TtsResult<()>;

    /// Pause voicing without ending the utterance.
    async fn pause(&mut self) -> TtsResult<()>;

    /// Resume a paused utterance.
    async fn resume(&mut self) -> TtsResult<()>;

    /// Whether an utterance is currently being voiced.
    async fn is_speaking(&self) -> bool;

    /// Enumerate the voices this engine offers.
    async fn list_voices(&self) -> TtsResult<Vec<VoiceInfo>>;
}
