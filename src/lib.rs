//! mtags - Microtag log decoder and analyzer
//!
//! Decodes flat logs of base64-encoded microtags emitted by instrumented
//! embedded targets and reconstructs their higher-level structure: scoped
//! time intervals, instantaneous events, scalar samples and multi-fragment
//! byte payloads.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::MtagsError;
