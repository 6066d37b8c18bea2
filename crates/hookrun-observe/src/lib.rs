//! Observability setup for hookrun: structured logging and optional
//! OpenTelemetry span export.

pub mod tracing_setup;
