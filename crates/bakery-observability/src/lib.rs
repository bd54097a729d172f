//! Observability infrastructure for the bakery cart workspace.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with component context
//! - `LogBuilder` - Fluent construction of entries with typed fields
//! - `LogSink` - Where entries go (stderr, or an in-memory capture for tests)

mod logging;

pub use logging::*;
