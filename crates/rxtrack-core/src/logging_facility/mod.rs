//! Structured logging facility for RxTrack
//!
//! Single initialization point via `init(profile)`. Handlers and repos emit
//! plain `tracing` events; the profile decides formatting and default level.

pub mod init;

pub use init::{init, Profile};
