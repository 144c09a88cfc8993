//! Schema migrations
//!
//! SQL ships inside the binary and is applied in order, once, inside a
//! transaction per migration. Applied SQL is checksummed so later edits to
//! history are detected instead of silently ignored.

mod checksums;
mod embedded;
mod runner;

pub use runner::apply_migrations;
