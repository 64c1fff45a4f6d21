//! Observability for the planning engine.
//! `tracing` crate with `EnvFilter`, per-module log levels.

pub mod setup;

pub use setup::{init_tracing, init_tracing_with, resolve_filter, DEFAULT_DIRECTIVES};
