//! Binary configuration
//!
//! Timing and sizing knobs live in an optional `readaloud.toml` next to the
//! binary; every field falls back to the reference defaults.

use std::path::Path;

use anyhow::Context;
use readaloud_controller::ControllerConfig;
use readaloud_observer::ObserverConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub observer: ObserverConfig,
    pub controller: ControllerConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Simulated voicing speed, characters per second at rate 1.0.
    pub chars_per_sec: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { chars_per_sec: 60 }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `path` if it exists, otherwise the defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}
