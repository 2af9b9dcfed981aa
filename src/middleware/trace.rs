//! Per-request access logging.

use std::future::Future;
use std::time::Instant;

use tracing::info;

use crate::method::Method;
use crate::response::Response;

/// Awaits `handle` and logs the outcome at `info` level.
pub(crate) async fn trace<F>(method: Method, path: &str, handle: F) -> Response
where
    F: Future<Output = Response>,
{
    let started = Instant::now();
    let res = handle.await;
    info!(
        method = %method,
        path,
        status = res.status_code(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request handled"
    );
    res
}
