//! Observer context for readaloud
//!
//! The observer runs inside the hosted document. It turns noisy selection
//! changes into a single read request, answers capture requests from the
//! controller, and keeps the speech engine alive during long utterances by
//! nudging the controller on a timer.

pub mod debounce;
pub mod keepalive;
pub mod watcher;

pub use debounce::DebounceTimer;
pub use keepalive::KeepAliveTimer;
pub use watcher::{ObserverConfig, SelectionSource, SelectionWatcher};
