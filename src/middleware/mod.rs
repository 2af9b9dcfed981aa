//! Middleware layer.
//!
//! Cross-cutting concerns wrapped around every routed request.
//!
//! - [`trace`]: one log event per request with method, path, status, latency

mod trace;

pub(crate) use trace::trace;
