//! # Observability
//!
//! Prometheus metrics for the function. Logging goes through `tracing` and is
//! configured in `runtime::initialization`.

pub mod metrics;
