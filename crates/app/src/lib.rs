//! Application glue for readaloud
//!
//! Hosts the pieces that sit around the core: the simulated speech engine
//! and selection source, the badge counter collaborator, and configuration
//! loading for the binary.

pub mod badge;
pub mod config;
pub mod engine;
pub mod selection;
