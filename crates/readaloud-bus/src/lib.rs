//! Cross-context message bus for readaloud
//!
//! The observer and controller contexts never share memory; everything that
//! crosses between them travels as a fire-and-forget message over this bus.
//! Every delivered message carries the identity of its publisher so handlers
//! can discard traffic from unrelated senders sharing the same transport.

pub mod bus;
pub mod message;

pub use bus::{BusHandle, MessageBus, Subscription};
pub use message::{Envelope, Message, MessageKind, SenderId};
