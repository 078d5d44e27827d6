//! Observability: logging, metrics, and trace-context propagation.
//!
//! # Responsibilities
//! - Initialize the logging subsystem
//! - Expose a Prometheus-compatible metrics endpoint
//! - Propagate correlation headers onto outbound middletier calls
//!
//! Propagation is an injectable decorator so the request handlers stay
//! tracing-agnostic; the untraced deployment variant swaps in a no-op.

pub mod logging;
pub mod metrics;
pub mod propagation;

pub use propagation::{NoopDecorator, RequestDecorator, RequestIdPropagator};
