//! Controller context for readaloud
//!
//! Exclusively owns the speech engine. Read requests arriving over the bus
//! become speech sessions: the text is split into bounded phrases and the
//! engine is driven through them strictly one at a time, with lifecycle
//! messages published back for the observer and any counter collaborator.

pub mod controller;
pub mod report;
pub mod state;

pub use controller::{ControllerCommand, ControllerConfig, SpeechSessionController};
pub use report::{ErrorReporter, TracingErrorReporter};
pub use state::SessionState;
