//! Core types for speech synthesis

use serde::{Deserialize, Serialize};

/// Options applied to every utterance of a speech session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakOptions {
    /// Speaking rate multiplier (1.0 is the engine's normal rate).
    pub rate: f32,
    /// Voice pitch (0.0-2.0).
    pub pitch: f32,
    /// Volume (0.0-1.0).
    pub volume: f32,
    /// Voice to use; `None` lets the engine pick its default.
    pub voice_name: Option<String>,
    /// Queue utterances inside the engine instead of cutting each other off.
    pub enqueue: bool,
}

impl Default for SpeakOptions {
    fn default() -> Self {
        Self {
            rate: 1.2,
            pitch: 0.0,
            volume: 1.0,
            voice_name: None,
            enqueue: true,
        }
    }
}

/// Voice information reported by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Human-readable voice name, as accepted in `SpeakOptions::voice_name`.
    pub name: String,
    /// Language code (e.g. "en-GB").
    pub language: String,
}
