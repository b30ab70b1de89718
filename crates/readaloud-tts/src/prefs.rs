//! Preference store consumed by the session controller
//!
//! The controller reads the current speak options at the start of every
//! session. How the values are edited (options page, context menu) is the
//! UI's concern; this crate only defines the read path and an in-memory
//! implementation.

use crate::types::SpeakOptions;
use async_trait::async_trait;
use parking_lot::RwLock;

/// Read access to the user's speak options.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Current speak options, falling back to defaults for unset values.
    async fn speak_options(&self) -> SpeakOptions;
}

/// In-memory preference store.
#[derive(Debug, Default)]
pub struct MemoryPrefs {
    options: RwLock<SpeakOptions>,
}

impl MemoryPrefs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: SpeakOptions) -> Self {
        Self {
            options: RwLock::new(options),
        }
    }

    pub fn set_rate(&self, rate: f32) {
        self.options.write().rate = rate;
    }

    pub fn set_pitch(&self, pitch: f32) {
        self.options.write().pitch = pitch;
    }

    pub fn set_voice(&self, voice_name: impl Into<String>) {
        self.options.write().voice_name = Some(voice_name.into());
    }

    /// Restore the built-in defaults.
    pub fn reset(&self) {
        *self.options.write() = SpeakOptions::default();
    }
}

#[async_trait]
impl PreferenceStore for MemoryPrefs {
    async fn speak_options(&self) -> SpeakOptions {
        self.options.read().clone()
    }
}
