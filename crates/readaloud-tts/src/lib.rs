//! Speech-engine abstraction layer for readaloud
//!
//! This crate provides the types and traits the session controller drives:
//! the engine interface, its lifecycle events, speak options, and the
//! read-only preference store the options come from.

pub mod engine;
pub mod error;
pub mod prefs;
pub mod types;

pub use engine::{EngineEvent, SpeechEngine};
pub use error::{TtsError, TtsResult};
pub use prefs::{MemoryPrefs, PreferenceStore};
pub use types::{SpeakOptions, VoiceInfo};
