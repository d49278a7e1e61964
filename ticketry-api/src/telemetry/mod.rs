//! Ticketry Telemetry - Logging Infrastructure
//!
//! Structured `tracing` output for the API layer plus a per-request span
//! middleware.

pub mod middleware;
pub mod tracer;

pub use middleware::observability_middleware;
pub use tracer::{init_tracing, LogFormat, TelemetryConfig};
