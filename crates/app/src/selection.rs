//! In-memory selection source
//!
//! Stands in for the hosted document's selection API: whatever was last set
//! is what the watcher captures.

use parking_lot::RwLock;
use readaloud_observer::SelectionSource;

#[derive(Debug, Default)]
pub struct StaticSelection {
    text: RwLock<String>,
}

impl StaticSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, text: impl Into<String>) {
        *self.text.write() = text.into();
    }

    pub fn clear(&self) {
        self.text.write().clear();
    }
}

impl SelectionSource for StaticSelection {
    fn current_selection(&self) -> String {
        self.text.read().clone()
    }
}
