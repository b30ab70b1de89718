//! Error types for speech synthesis

use thiserror::Error;

/// TTS error types
#[derive(Error, Debug)]
pub enum TtsError {
    /// Engine is not available on this system
    #[error("speech engine not available: {0}")]
    EngineNotAvailable(String),

    /// Engine rejected or failed an utterance
    #[error("synthesis failed: {0}")]
    SynthesisError(String),

    /// Voice not found or not supported
    #[error("voice not found: {0}")]
    VoiceNotFound(String),

    /// IO error (process spawning, device access)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Engine-specific error
    #[error("engine error ({engine}): {message}")]
    EngineSpecific { engine: String, message: String },
}

/// Result type for TTS operations
pub type TtsResult<T> = Result<T, TtsError>;
